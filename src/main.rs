//! Command-line demo: runs one battle and prints its log and final state.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rpg_battle::prefab_rosters::{get_prefab_roster, get_prefab_rosters};
use rpg_battle::script::{apply_step, auto_steps, parse_script, ScriptStep};
use rpg_battle::{BattleRunner, BattleSetup, CharacterInfo, ConfigError, GameState, TurnRng};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Safety net for autoplay against enemies that cannot be killed.
const MAX_AUTO_ROUNDS: usize = 500;

/// Turn-based RPG battle resolver
#[derive(Parser, Debug)]
#[command(name = "rpg-battle")]
#[command(about = "Resolve a turn-based RPG battle from a setup file or a prefab roster")]
#[command(version)]
struct Cli {
    /// Battle setup file (.ron or .json)
    #[arg(long, value_name = "SETUP_FILE", conflicts_with = "roster")]
    setup: Option<PathBuf>,

    /// Prefab roster id (see --list-rosters)
    #[arg(long, default_value = "zone1")]
    roster: String,

    /// List the prefab rosters and exit
    #[arg(long)]
    list_rosters: bool,

    /// Seed for the crit rolls; omit for a random battle
    #[arg(long)]
    seed: Option<u64>,

    /// Comma separated steps: a, s, s<N>, t<N>, r
    #[arg(long, conflicts_with = "auto")]
    script: Option<String>,

    /// Let the autopilot play until the battle ends
    #[arg(long)]
    auto: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    if cli.list_rosters {
        for roster in get_prefab_rosters() {
            println!("{:<12} {} - {}", roster.id, roster.name, roster.description);
        }
        return Ok(());
    }

    let setup = match &cli.setup {
        Some(path) => BattleSetup::load(path)
            .with_context(|| format!("loading battle setup {}", path.display()))?,
        None => {
            get_prefab_roster(&cli.roster)
                .ok_or_else(|| ConfigError::UnknownRoster(cli.roster.clone()))?
                .setup
        }
    };

    let rng = match cli.seed {
        Some(seed) => TurnRng::from_seed(seed),
        None => TurnRng::new_random(),
    };
    let mut runner = setup.into_runner("cli_battle".to_string(), rng);
    tracing::info!(pacing = ?runner.pacing(), "battle ready");

    if let Some(script) = &cli.script {
        let steps = parse_script(script)?;
        run_steps(&mut runner, steps)?;
    } else if cli.auto {
        run_autopilot(&mut runner)?;
    } else {
        bail!("nothing to do: pass --script or --auto (or --list-rosters)");
    }

    for line in runner.log() {
        println!("{}", line);
    }
    println!();
    print_snapshot(&runner);

    Ok(())
}

fn setup_logging(default_filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn run_steps(runner: &mut BattleRunner, steps: Vec<ScriptStep>) -> Result<()> {
    for step in steps {
        if runner.is_battle_ended() {
            tracing::warn!(?step, "battle already over, ignoring remaining steps");
            break;
        }
        apply_step(runner, step).with_context(|| format!("applying step {:?}", step))?;
    }
    Ok(())
}

fn run_autopilot(runner: &mut BattleRunner) -> Result<()> {
    for _ in 0..MAX_AUTO_ROUNDS {
        if runner.is_battle_ended() {
            return Ok(());
        }

        if runner.battle_state().game_state() == GameState::ResolvingEnemyTurn {
            runner.resume_enemy_phase()?;
            continue;
        }

        let steps = auto_steps(runner.battle_state());
        run_steps(runner, steps)?;
    }

    tracing::warn!(rounds = MAX_AUTO_ROUNDS, "autopilot stopped before the battle ended");
    Ok(())
}

fn print_snapshot(runner: &BattleRunner) {
    let info = runner.get_battle_info();
    println!("Turn {} - {}", info.turn_number, info.game_state);
    print_character(&info.player);
    for enemy in &info.enemies {
        print_character(enemy);
    }
    if let Some(rewards) = runner.rewards() {
        println!("Rewards: {} EXP, {} coins", rewards.exp, rewards.coins);
    }
}

fn print_character(character: &CharacterInfo) {
    println!(
        "  {:<14} HP {:>4}/{:<4} MP {:>3}/{:<3} ATK {:>3} DEF {:>3} Shield {}/{}{}",
        character.name,
        character.hp,
        character.max_hp,
        character.mp,
        character.max_mp,
        character.attack,
        character.defense,
        character.shield,
        character.max_shield,
        if character.is_defeated { " (defeated)" } else { "" }
    );
}
