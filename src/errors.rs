use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main error type for the battle engine
#[derive(Debug, thiserror::Error)]
pub enum BattleEngineError {
    /// A player action was rejected
    #[error("Action error: {0}")]
    Action(#[from] ActionError),
    /// A battle setup could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Broad classes of rejected actions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong phase, missing or defeated target, unselected or unknown skill
    InvalidAction,
    /// Not enough mana for the selected skill
    InsufficientResource,
}

/// Reasons a player action can be refused. A refused action leaves the battle
/// untouched and does not advance the turn.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("actions are not accepted during {phase}")]
    WrongPhase { phase: String },
    #[error("no skill selected")]
    NoSkillSelected,
    #[error("skill index {0} does not exist")]
    UnknownSkill(usize),
    #[error("no enemy at index {0}")]
    NoTarget(usize),
    #[error("target {0} is already defeated")]
    TargetDefeated(String),
    #[error("needs {required} MP but only has {available}")]
    InsufficientMana { required: u32, available: u32 },
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::InsufficientMana { .. } => ErrorKind::InsufficientResource,
            _ => ErrorKind::InvalidAction,
        }
    }
}

/// Errors raised while loading a battle setup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported setup format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("unknown prefab roster: {0}")]
    UnknownRoster(String),
    #[error("invalid battle setup: {0}")]
    Invalid(String),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
