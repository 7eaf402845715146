//! Fixed camera systems (FixedUpdate)

use std::collections::HashMap;

use bevy::prelude::*;

use super::blend::ViewBlend;
use super::components::{ActiveView, CameraLinks, ConfigurationFailed};
use super::config::CameraType;
use super::controller::{CameraPhase, FixedCamera, StartOutcome, StepOutcome};
use super::error::CameraConfigError;
use super::events::{ActivateViewRequest, CameraConfigurationFailed, CameraDeactivated, FixedCameraCommand};
use crate::components::PlayerCharacter;
use crate::rail::{CameraRail, RailPath};

/// Система: старт новых камер (Uninitialized → Idle / Active)
///
/// Ошибка валидации → CameraConfigurationFailed event + ConfigurationFailed маркер,
/// так что ошибка всплывает ровно один раз.
pub fn start_fixed_cameras(
    mut commands: Commands,
    mut cameras: Query<
        (Entity, &mut FixedCamera, &mut Transform, Option<&CameraLinks>),
        Without<ConfigurationFailed>,
    >,
    // Focus target — любой entity с Transform, в том числе другая камера
    targets: Query<(), With<Transform>>,
    rails: Query<&CameraRail>,
    mut view_requests: EventWriter<ActivateViewRequest>,
    mut failures: EventWriter<CameraConfigurationFailed>,
    mut active_view: ResMut<ActiveView>,
) {
    for (entity, mut camera, mut transform, links) in cameras.iter_mut() {
        if camera.phase() != CameraPhase::Uninitialized {
            continue;
        }

        let links = links.copied().unwrap_or_default();
        let rail = links.rail.and_then(|rail| rails.get(rail).ok());
        let target_assigned = links.focus_target.is_some_and(|target| targets.contains(target));

        let result = if camera.config().camera_type == CameraType::Rail && links.rail.is_some() && rail.is_none() {
            // Reference есть, но entity без CameraRail
            Err(CameraConfigError::RailNotFound)
        } else {
            camera.start(rail.map(|rail| rail as &dyn RailPath), target_assigned)
        };

        match result {
            Ok(outcome) => {
                transform.translation = camera.position();
                transform.rotation = camera.orientation();

                if let StartOutcome::Activated(blend) = outcome {
                    crate::log_info(&format!("📷 {:?} started → Active (activate on play)", entity));
                    view_requests.write(ActivateViewRequest { camera: entity, blend });
                    active_view.camera = Some(entity);
                } else {
                    crate::log(&format!("📷 {:?} started → Idle", entity));
                }
            }
            Err(error) => {
                crate::log_error(&format!("📷 {:?} configuration error: {}", entity, error));
                failures.write(CameraConfigurationFailed {
                    camera: entity,
                    error: error.clone(),
                });
                commands.entity(entity).insert(ConfigurationFailed(error));
            }
        }
    }
}

/// Система: ручные activate/deactivate от host'а
pub fn apply_camera_commands(
    mut camera_commands: EventReader<FixedCameraCommand>,
    mut cameras: Query<&mut FixedCamera>,
    mut view_requests: EventWriter<ActivateViewRequest>,
    mut deactivated_events: EventWriter<CameraDeactivated>,
    mut active_view: ResMut<ActiveView>,
) {
    for command in camera_commands.read() {
        match *command {
            FixedCameraCommand::Activate { camera: entity, blend } => {
                let Ok(mut camera) = cameras.get_mut(entity) else {
                    crate::log_warning(&format!("FixedCameraCommand::Activate: {:?} is not a fixed camera", entity));
                    continue;
                };
                activate_camera(entity, &mut camera, blend, &mut view_requests, &mut active_view);
            }
            FixedCameraCommand::Deactivate { camera: entity } => {
                let Ok(mut camera) = cameras.get_mut(entity) else {
                    crate::log_warning(&format!("FixedCameraCommand::Deactivate: {:?} is not a fixed camera", entity));
                    continue;
                };
                deactivate_camera(entity, &mut camera, &mut deactivated_events, &mut active_view);
            }
        }
    }
}

/// Система: per-step обновление pose всех камер с включённым tick
///
/// Нет игрока → step пропускается (ретрай на следующем tick).
/// Pose пишется в Transform камеры — host копирует его в render camera.
/// Focus target-камера отдаёт позу на начало tick'а.
pub fn step_fixed_cameras(
    time: Res<Time<Fixed>>,
    mut cameras: Query<(Entity, &mut FixedCamera, &mut Transform, Option<&CameraLinks>)>,
    players: Query<&Transform, (With<PlayerCharacter>, Without<FixedCamera>)>,
    targets: Query<&Transform, Without<FixedCamera>>,
    rails: Query<&CameraRail>,
) {
    let delta = time.delta_secs();
    let player = players.iter().next().map(|transform| transform.translation);

    let camera_positions: HashMap<Entity, Vec3> = cameras
        .iter()
        .map(|(entity, camera, _, _)| (entity, camera.position()))
        .collect();

    for (_, mut camera, mut transform, links) in cameras.iter_mut() {
        if !camera.tick_enabled() {
            continue;
        }

        let links = links.copied().unwrap_or_default();
        let focus_target = links.focus_target.and_then(|target| {
            targets
                .get(target)
                .map(|target| target.translation)
                .ok()
                .or_else(|| camera_positions.get(&target).copied())
        });
        let rail = links.rail.and_then(|rail| rails.get(rail).ok());

        let outcome = camera.step(delta, player, focus_target, rail.map(|rail| rail as &dyn RailPath));
        if outcome == StepOutcome::Updated {
            transform.translation = camera.position();
            transform.rotation = camera.orientation();
        }
    }
}

/// Idle → Active + view request. Возвращает false если камера ещё не стартовала.
pub(crate) fn activate_camera(
    entity: Entity,
    camera: &mut FixedCamera,
    blend: ViewBlend,
    view_requests: &mut EventWriter<ActivateViewRequest>,
    active_view: &mut ActiveView,
) -> bool {
    match camera.activate(blend) {
        Ok(blend) => {
            crate::log_info(&format!(
                "📷 {:?} → Active (blend {:.2}s {:?})",
                entity, blend.duration, blend.curve
            ));
            view_requests.write(ActivateViewRequest { camera: entity, blend });
            active_view.camera = Some(entity);
            true
        }
        Err(error) => {
            crate::log_error(&format!("📷 {:?} activate rejected: {}", entity, error));
            false
        }
    }
}

/// Active → Idle (+ CameraDeactivated если камера была active)
pub(crate) fn deactivate_camera(
    entity: Entity,
    camera: &mut FixedCamera,
    deactivated_events: &mut EventWriter<CameraDeactivated>,
    active_view: &mut ActiveView,
) {
    if camera.deactivate() {
        crate::log(&format!("📷 {:?} → Idle (tick {})", entity, camera.tick_enabled()));
        deactivated_events.write(CameraDeactivated { camera: entity });
    }

    if active_view.camera == Some(entity) {
        active_view.camera = None;
    }
}
