//! Camera ECS components / resources (кроме самого FixedCamera)

use bevy::prelude::*;

use super::error::CameraConfigError;

/// References камеры на другие entities (не владеет ими)
///
/// - rail: entity с `CameraRail` (обязателен для CameraType::Rail)
/// - focus_target: entity с Transform (обязателен для FocusTarget / MidPlayerAndTarget)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CameraLinks {
    pub rail: Option<Entity>,
    pub focus_target: Option<Entity>,
}

impl CameraLinks {
    pub fn rail(rail: Entity) -> Self {
        Self {
            rail: Some(rail),
            focus_target: None,
        }
    }

    pub fn focus_target(target: Entity) -> Self {
        Self {
            rail: None,
            focus_target: Some(target),
        }
    }

    pub fn with_focus_target(mut self, target: Entity) -> Self {
        self.focus_target = Some(target);
        self
    }
}

/// Маркер: камера не прошла валидацию (остаётся Uninitialized, больше не стартует)
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ConfigurationFailed(pub CameraConfigError);

/// Камера, которую core последней попросил сделать active view
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveView {
    pub camera: Option<Entity>,
}
