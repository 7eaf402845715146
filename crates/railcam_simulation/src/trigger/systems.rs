//! Trigger systems (FixedUpdate, CameraSystems::Overlaps)

use bevy::prelude::*;

use super::events::ZoneOverlapEvent;
use super::switch::{CameraHandoff, HandoffDecision, TriggerSwitch, TriggerSwitchLayout, ZoneSide};
use crate::camera::systems::{activate_camera, deactivate_camera};
use crate::camera::{ActivateViewRequest, ActiveView, CameraDeactivated, CameraPhase, FixedCamera};
use crate::components::PlayerCharacter;

/// Маркер: зоны switch'а — physics sensors, polling не нужен
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SensorZones;

/// Система: overlap events → occupancy → camera handoff
pub fn apply_zone_overlaps(
    mut overlaps: EventReader<ZoneOverlapEvent>,
    mut switches: Query<&mut TriggerSwitch>,
    mut cameras: Query<&mut FixedCamera>,
    mut view_requests: EventWriter<ActivateViewRequest>,
    mut deactivated_events: EventWriter<CameraDeactivated>,
    mut active_view: ResMut<ActiveView>,
) {
    for event in overlaps.read() {
        let Ok(mut switch) = switches.get_mut(event.switch()) else {
            crate::log_warning(&format!("ZoneOverlapEvent: {:?} is not a trigger switch", event.switch()));
            continue;
        };

        match *event {
            ZoneOverlapEvent::Entered { switch: entity, side, actor } => {
                if switch.on_enter(side, actor) {
                    crate::log(&format!("🚪 {:?} entered zone {:?} of {:?}", actor, side, entity));
                }
            }
            ZoneOverlapEvent::Exited {
                switch: entity,
                side,
                actor,
                sibling_occupied,
            } => match switch.on_exit(side, actor, sibling_occupied) {
                HandoffDecision::Deferred => {
                    crate::log(&format!(
                        "🚪 {:?} left zone {:?} of {:?} (still in {:?}, no switch)",
                        actor,
                        side,
                        entity,
                        side.sibling()
                    ));
                }
                HandoffDecision::MissingCamera { side } => {
                    crate::log_warning(&format!("🚪 {:?}: zone {:?} has no camera assigned, switch skipped", entity, side));
                }
                HandoffDecision::Switch(handoff) => {
                    apply_handoff(
                        entity,
                        handoff,
                        &mut cameras,
                        &mut view_requests,
                        &mut deactivated_events,
                        &mut active_view,
                    );
                }
            },
        }
    }
}

/// Сначала deactivate sibling камеры, потом activate камеры зоны
///
/// Камеру зоны нельзя активировать (нет / не стартовала) → sibling не трогаем.
fn apply_handoff(
    switch: Entity,
    handoff: CameraHandoff,
    cameras: &mut Query<&mut FixedCamera>,
    view_requests: &mut EventWriter<ActivateViewRequest>,
    deactivated_events: &mut EventWriter<CameraDeactivated>,
    active_view: &mut ActiveView,
) {
    match cameras.get(handoff.activate) {
        Ok(camera) if camera.phase() == CameraPhase::Uninitialized => {
            crate::log_warning(&format!(
                "🚪 {:?}: camera {:?} not started, switch skipped",
                switch, handoff.activate
            ));
            return;
        }
        Ok(_) => {}
        Err(_) => {
            crate::log_warning(&format!("🚪 {:?}: camera {:?} not found, switch skipped", switch, handoff.activate));
            return;
        }
    }

    match handoff.deactivate {
        Some(entity) => match cameras.get_mut(entity) {
            Ok(mut camera) => deactivate_camera(entity, &mut camera, deactivated_events, active_view),
            Err(_) => crate::log_warning(&format!("🚪 {:?}: sibling camera {:?} not found", switch, entity)),
        },
        None => crate::log_warning(&format!("🚪 {:?}: sibling zone has no camera assigned", switch)),
    }

    if let Ok(mut camera) = cameras.get_mut(handoff.activate) {
        activate_camera(handoff.activate, &mut camera, handoff.blend, view_requests, active_view);
    }
}

/// Система: point-in-box overlap для switch'ей с TriggerSwitchLayout
///
/// Для headless запуска без physics. Actors — entities с PlayerCharacter.
/// Actor, который пропал (despawn / снят маркер), считается вышедшим.
/// Быстрый actor может перескочить зону за один tick — тогда enter/exit не будет.
pub fn poll_zone_volumes(
    switches: Query<(Entity, &TriggerSwitch, &TriggerSwitchLayout), Without<SensorZones>>,
    actors: Query<(Entity, &Transform), With<PlayerCharacter>>,
    mut overlaps: EventWriter<ZoneOverlapEvent>,
) {
    for (entity, switch, layout) in switches.iter() {
        let mut entered = Vec::new();
        let mut exited = Vec::new();

        for side in ZoneSide::BOTH {
            let occupancy = switch.occupancy(side);

            for (actor, transform) in actors.iter() {
                let inside = layout.zone_contains(side, transform.translation);
                match (occupancy.contains(actor), inside) {
                    (false, true) => entered.push(ZoneOverlapEvent::entered(entity, side, actor)),
                    (true, false) => exited.push(ZoneOverlapEvent::exited(entity, side, actor)),
                    _ => {}
                }
            }

            for actor in occupancy.iter().filter(|&actor| !actors.contains(actor)) {
                exited.push(ZoneOverlapEvent::exited(entity, side, actor));
            }
        }

        // Entered первыми: exit из A при входе в B в том же tick'е должен видеть B занятой
        overlaps.write_batch(entered.into_iter().chain(exited));
    }
}
