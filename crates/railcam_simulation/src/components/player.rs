//! Player marker component
//!
//! Камеры берут позицию игрока из Transform entity с этим маркером.

use bevy::prelude::Component;

/// Marker component для player character
///
/// # Single-player
/// Камеры следят за первым найденным entity с маркером.
/// Пока такого entity нет — camera step пропускается (ждём spawn игрока).
///
/// # Possession
/// ```ignore
/// commands.entity(old_pawn).remove::<PlayerCharacter>();
/// commands.entity(new_pawn).insert(PlayerCharacter);
/// ```
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerCharacter;
