//! Fixed camera domain
//!
//! ECS ответственность:
//! - Camera state machine (Uninitialized / Idle / Active)
//! - Rail движение + focus ориентация + сглаживание
//! - Activate/deactivate протокол (view requests для host'а)
//!
//! Host ответственность:
//! - Копировать Transform камеры в render camera
//! - Проигрывать view blend по ActivateViewRequest

use bevy::prelude::*;

pub mod blend;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod systems;

#[cfg(test)]
mod config_tests;

pub use blend::{BlendCurve, ViewBlend};
pub use components::{ActiveView, CameraLinks, ConfigurationFailed};
pub use config::{CameraType, FixedCameraConfig, FocusMode};
pub use controller::{
    look_at, rail_travel_fraction, smoothing_alpha, CameraPhase, CameraRuntimeState, FixedCamera, SkipReason,
    StartOutcome, StepOutcome,
};
pub use error::{CameraConfigError, CameraStateError};
pub use events::{ActivateViewRequest, CameraConfigurationFailed, CameraDeactivated, FixedCameraCommand};

/// Порядок camera pipeline внутри FixedUpdate
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraSystems {
    /// Старт/валидация новых камер
    Start,
    /// Ручные команды host'а
    Commands,
    /// Trigger zones (overlap → handoff)
    Overlaps,
    /// Per-step pose update
    Step,
}

/// Camera Plugin
///
/// Регистрирует camera системы в FixedUpdate.
/// Порядок выполнения:
/// 1. start_fixed_cameras — валидация + старт (activate on play)
/// 2. apply_camera_commands — ручные activate/deactivate
/// 3. (TriggerPlugin) zone overlaps → handoff
/// 4. step_fixed_cameras — pose update + запись в Transform
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ActivateViewRequest>()
            .add_event::<CameraDeactivated>()
            .add_event::<CameraConfigurationFailed>()
            .add_event::<FixedCameraCommand>()
            .init_resource::<ActiveView>();

        app.configure_sets(
            FixedUpdate,
            (
                CameraSystems::Start,
                CameraSystems::Commands,
                CameraSystems::Overlaps,
                CameraSystems::Step,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::start_fixed_cameras.in_set(CameraSystems::Start),
                systems::apply_camera_commands.in_set(CameraSystems::Commands),
                systems::step_fixed_cameras.in_set(CameraSystems::Step),
            ),
        );
    }
}
