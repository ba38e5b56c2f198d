// RPG Battle Schema - Shared content definitions
// This crate holds the immutable content records (skills, buff kinds and
// character templates) shared between the battle engine and anything that
// authors or stores battle content.

// Re-export the main types
pub use character_data::*;
pub use skill_types::*;

pub mod character_data;
pub mod skill_types;
