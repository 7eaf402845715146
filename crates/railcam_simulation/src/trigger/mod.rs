//! Trigger zone domain
//!
//! ECS ответственность:
//! - Occupancy двух зон каждого switch'а
//! - Hysteresis: handoff только при полном выходе (не в sibling зоне)
//! - Deactivate sibling камеры → activate камеры зоны
//!
//! Host ответственность:
//! - Overlap detection (engine, rapier sensors, или TriggerSwitchLayout polling)

use bevy::prelude::*;

pub mod events;
pub mod rapier_bridge;
pub mod switch;
pub mod systems;

#[cfg(test)]
mod switch_tests;

pub use events::ZoneOverlapEvent;
pub use rapier_bridge::{
    forward_sensor_events, spawn_trigger_switch_sensors, spawn_trigger_zone_sensor, RapierTriggerBridgePlugin,
};
pub use switch::{
    CameraHandoff, HandoffDecision, TriggerSwitch, TriggerSwitchLayout, TriggerZone, ZoneBinding, ZoneOccupancy,
    ZoneSide,
};
pub use systems::{apply_zone_overlaps, poll_zone_volumes, SensorZones};

use crate::camera::{CameraPlugin, CameraSystems};

/// Trigger Plugin
///
/// Порядок внутри CameraSystems::Overlaps:
/// 1. poll_zone_volumes — switch'и с TriggerSwitchLayout (без SensorZones)
/// 2. (RapierTriggerBridgePlugin) forward_sensor_events
/// 3. apply_zone_overlaps — occupancy + handoff
pub struct TriggerPlugin;

impl Plugin for TriggerPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CameraPlugin>() {
            app.add_plugins(CameraPlugin);
        }

        app.add_event::<ZoneOverlapEvent>();

        app.add_systems(
            FixedUpdate,
            (systems::poll_zone_volumes, systems::apply_zone_overlaps)
                .chain()
                .in_set(CameraSystems::Overlaps),
        );
    }
}
