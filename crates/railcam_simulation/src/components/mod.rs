//! Shared ECS components (используются несколькими доменами)
//!
//! - player: маркер player character (PlayerCharacter)

pub mod player;

pub use player::*;
