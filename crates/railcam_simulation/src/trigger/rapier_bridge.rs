//! Rapier sensor bridge: CollisionEvent → ZoneOverlapEvent
//!
//! Опционально. Core от physics не зависит — bridge нужен только если зоны
//! switch'а заданы sensor collider'ами (RapierPhysicsPlugin добавляет host).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::events::ZoneOverlapEvent;
use super::switch::{TriggerSwitchLayout, TriggerZone, ZoneSide};
use super::systems::{apply_zone_overlaps, SensorZones};
use crate::camera::CameraSystems;

/// Bridge plugin (добавлять вместе с TriggerPlugin)
pub struct RapierTriggerBridgePlugin;

impl Plugin for RapierTriggerBridgePlugin {
    fn build(&self, app: &mut App) {
        // Без RapierPhysicsPlugin events никто не пишет, но reader должен существовать
        app.add_event::<CollisionEvent>();

        app.add_systems(
            FixedUpdate,
            forward_sensor_events
                .in_set(CameraSystems::Overlaps)
                .before(apply_zone_overlaps),
        );
    }
}

/// Система: collision events с участием TriggerZone sensor'а → overlap events
///
/// Любой другой collider считается actor'ом (как overlap в engine).
/// Entered пишутся раньше Exited (см. ZoneOverlapEvent).
pub fn forward_sensor_events(
    mut collisions: EventReader<CollisionEvent>,
    zones: Query<&TriggerZone>,
    mut overlaps: EventWriter<ZoneOverlapEvent>,
) {
    let mut entered = Vec::new();
    let mut exited = Vec::new();

    for collision in collisions.read() {
        let (first, second, started) = match *collision {
            CollisionEvent::Started(first, second, _) => (first, second, true),
            CollisionEvent::Stopped(first, second, _) => (first, second, false),
        };

        let (zone, actor) = match (zones.get(first), zones.get(second)) {
            (Ok(zone), Err(_)) => (zone, second),
            (Err(_), Ok(zone)) => (zone, first),
            // Зона с зоной (соседние sensor'ы) или вообще не зоны
            _ => continue,
        };

        if started {
            entered.push(ZoneOverlapEvent::entered(zone.switch, zone.side, actor));
        } else {
            exited.push(ZoneOverlapEvent::exited(zone.switch, zone.side, actor));
        }
    }

    overlaps.write_batch(entered.into_iter().chain(exited));
}

/// Spawn sensor collider одной зоны (коробка из TriggerSwitchLayout)
pub fn spawn_trigger_zone_sensor(
    commands: &mut Commands,
    switch: Entity,
    side: ZoneSide,
    layout: &TriggerSwitchLayout,
) -> Entity {
    let half = layout.half_extents.abs();

    commands
        .spawn((
            TriggerZone { switch, side },
            Transform::from_translation(layout.zone_center(side)).with_rotation(layout.rotation()),
            GlobalTransform::default(),
            // Sensor: только detection, без contact response
            Collider::cuboid(half.x, half.y, half.z),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            // Kinematic character против static sensor'а тоже должен давать events
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        ))
        .id()
}

/// Обе зоны switch'а как sensors; switch помечается SensorZones (polling выключается)
pub fn spawn_trigger_switch_sensors(
    commands: &mut Commands,
    switch: Entity,
    layout: &TriggerSwitchLayout,
) -> [Entity; 2] {
    commands.entity(switch).insert(SensorZones);
    ZoneSide::BOTH.map(|side| spawn_trigger_zone_sensor(commands, switch, side, layout))
}
