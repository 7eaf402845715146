//! Camera events (host ↔ core)
//!
//! Host → core: FixedCameraCommand (ручной activate/deactivate)
//! Core → host: ActivateViewRequest, CameraDeactivated, CameraConfigurationFailed

use bevy::prelude::*;

use super::blend::ViewBlend;
use super::error::CameraConfigError;

/// Core → host: сделай эту камеру active view с этим blend'ом
///
/// Blend анимация — целиком на стороне host'а (fire-and-forget).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActivateViewRequest {
    pub camera: Entity,
    pub blend: ViewBlend,
}

/// Core → host: камера больше не active (host выключает свой camera component)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraDeactivated {
    pub camera: Entity,
}

/// Core → host: камера не прошла валидацию при старте
///
/// Отправляется один раз; host решает показать диалог / остановить сцену.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CameraConfigurationFailed {
    pub camera: Entity,
    pub error: CameraConfigError,
}

/// Host → core: ручное управление камерой (gameplay scripts, cutscenes)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum FixedCameraCommand {
    Activate { camera: Entity, blend: ViewBlend },
    Deactivate { camera: Entity },
}
