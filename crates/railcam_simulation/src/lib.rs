//! RAILCAM Simulation Core
//!
//! Fixed / rail камеры + trigger handoff на Bevy 0.16 (headless ECS)
//!
//! HOST / CORE граница:
//! - Core = camera state machine, focus/smoothing math, trigger hysteresis
//! - Host = rendering, overlap detection, view blend анимация
//!
//! Host → core: Transform игрока, ZoneOverlapEvent, FixedCameraCommand
//! Core → host: Transform камер, ActivateViewRequest, CameraDeactivated,
//! CameraConfigurationFailed

use bevy::prelude::*;

// Публичные модули
pub mod camera;
pub mod components;
pub mod logger;
pub mod rail;
pub mod scene;
pub mod trigger;

// Re-export для удобства
pub use camera::{
    ActivateViewRequest, ActiveView, BlendCurve, CameraConfigError, CameraConfigurationFailed, CameraDeactivated,
    CameraLinks, CameraPhase, CameraPlugin, CameraRuntimeState, CameraStateError, CameraSystems, CameraType,
    FixedCamera, FixedCameraCommand, FixedCameraConfig, FocusMode, ViewBlend,
};
pub use components::*;
pub use logger::{
    init_logger, log, log_error, log_info, log_level, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, ConsoleLogger, LogLevel, LogPrinter,
};
pub use rail::{CameraRail, RailError, RailPath};
pub use scene::{spawn_scene, SceneDescription, SceneError, SceneHandles};
pub use trigger::{
    RapierTriggerBridgePlugin, TriggerPlugin, TriggerSwitch, TriggerSwitchLayout, TriggerZone, ZoneBinding,
    ZoneOverlapEvent, ZoneSide,
};

/// Частота simulation tick'а (FixedUpdate)
pub const SIMULATION_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для camera step
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // CameraPlugin добавляется TriggerPlugin'ом
            .add_plugins(TriggerPlugin);
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ)); // 60Hz FixedUpdate

    app
}

/// Runtime state всех fixed камер, отсортированный по entity index
///
/// Сравнивается напрямую (pose + phase + tick), без текстовой сериализации.
pub fn camera_snapshot(world: &mut World) -> Vec<(u32, CameraRuntimeState)> {
    let mut query = world.query::<(Entity, &FixedCamera)>();
    let mut snapshot: Vec<_> = query
        .iter(world)
        .map(|(entity, camera)| (entity.index(), *camera.state()))
        .collect();
    snapshot.sort_by_key(|(index, _)| *index);
    snapshot
}
