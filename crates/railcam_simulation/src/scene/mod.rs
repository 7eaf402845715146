//! Scene description (RON) → entities
//!
//! Authoring data сцены: игрок, focus targets, rails, камеры, trigger switches.
//! Ссылки между объектами — по имени; `spawn_scene` резолвит их в Entity.
//! Все ссылки проверяются ДО spawn'а: при ошибке мир не меняется.
//!
//! Валидация config'а камер (Rail без rail и т.п.) — не здесь, а при старте
//! камеры (CameraConfigurationFailed).

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{look_at, CameraLinks, FixedCamera, FixedCameraConfig, ViewBlend};
use crate::components::PlayerCharacter;
use crate::rail::{CameraRail, RailError};
use crate::trigger::{TriggerSwitch, TriggerSwitchLayout, ZoneBinding};


/// Scene file (RON)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub player_start: [f32; 3],
    pub focus_targets: Vec<FocusTargetDescription>,
    pub rails: Vec<RailDescription>,
    pub cameras: Vec<CameraDescription>,
    pub switches: Vec<SwitchDescription>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTargetDescription {
    pub name: String,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailDescription {
    pub name: String,
    /// Control points (world space), минимум 2
    pub points: Vec<[f32; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub name: String,
    pub position: [f32; 3],
    /// Начальная ориентация: смотреть на эту точку (иначе identity)
    #[serde(default)]
    pub look_at: Option<[f32; 3]>,
    #[serde(default)]
    pub config: FixedCameraConfig,
    #[serde(default)]
    pub rail: Option<String>,
    #[serde(default)]
    pub focus_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchDescription {
    pub name: String,
    /// Стык двух зон
    pub origin: [f32; 3],
    #[serde(default = "default_axis")]
    pub axis: [f32; 3],
    #[serde(default = "default_half_extents")]
    pub half_extents: [f32; 3],
    #[serde(default)]
    pub zone_a: ZoneDescription,
    #[serde(default)]
    pub zone_b: ZoneDescription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDescription {
    pub camera: Option<String>,
    pub blend: ViewBlend,
}

fn default_axis() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

fn default_half_extents() -> [f32; 3] {
    [0.5, 2.0, 2.0]
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("camera '{camera}' references unknown rail '{rail}'")]
    UnknownRail { camera: String, rail: String },

    #[error("camera '{camera}' references unknown focus target '{target}'")]
    UnknownFocusTarget { camera: String, target: String },

    #[error("switch '{switch}' references unknown camera '{camera}'")]
    UnknownCamera { switch: String, camera: String },

    #[error("rail '{name}' is invalid")]
    InvalidRail {
        name: String,
        #[source]
        source: RailError,
    },
}

impl SceneDescription {
    pub fn from_ron(text: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_ron(&text)
    }
}

/// Entities заспавненной сцены (по имени из description)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHandles {
    pub player: Entity,
    pub focus_targets: HashMap<String, Entity>,
    pub rails: HashMap<String, Entity>,
    pub cameras: HashMap<String, Entity>,
    pub switches: HashMap<String, Entity>,
}

impl SceneHandles {
    pub fn camera(&self, name: &str) -> Option<Entity> {
        self.cameras.get(name).copied()
    }

    pub fn switch(&self, name: &str) -> Option<Entity> {
        self.switches.get(name).copied()
    }
}

/// Проверить description и заспавнить сцену в `world`
pub fn spawn_scene(world: &mut World, description: &SceneDescription) -> Result<SceneHandles, SceneError> {
    let rails = validate(description)?;

    let player = world
        .spawn((
            PlayerCharacter,
            Transform::from_translation(Vec3::from_array(description.player_start)),
            Name::new("Player"),
        ))
        .id();

    let mut focus_targets = HashMap::new();
    for target in &description.focus_targets {
        let entity = world
            .spawn((
                Transform::from_translation(Vec3::from_array(target.position)),
                Name::new(target.name.clone()),
            ))
            .id();
        focus_targets.insert(target.name.clone(), entity);
    }

    let mut rail_entities = HashMap::new();
    for (rail_description, rail) in description.rails.iter().zip(rails) {
        let entity = world.spawn((rail, Name::new(rail_description.name.clone()))).id();
        rail_entities.insert(rail_description.name.clone(), entity);
    }

    let mut cameras = HashMap::new();
    for camera in &description.cameras {
        let position = Vec3::from_array(camera.position);
        let orientation = camera
            .look_at
            .map(|target| look_at(position, Vec3::from_array(target), Quat::IDENTITY))
            .unwrap_or(Quat::IDENTITY);

        // Ссылки уже проверены в validate()
        let links = CameraLinks {
            rail: camera.rail.as_ref().and_then(|name| rail_entities.get(name).copied()),
            focus_target: camera.focus_target.as_ref().and_then(|name| focus_targets.get(name).copied()),
        };

        let entity = world
            .spawn((
                FixedCamera::new(camera.config.clone(), position, orientation),
                Transform::from_translation(position).with_rotation(orientation),
                links,
                Name::new(camera.name.clone()),
            ))
            .id();
        cameras.insert(camera.name.clone(), entity);
    }

    let mut switches = HashMap::new();
    for switch in &description.switches {
        let binding = |zone: &ZoneDescription| ZoneBinding {
            camera: zone.camera.as_ref().and_then(|name| cameras.get(name).copied()),
            blend: zone.blend,
        };
        let layout = TriggerSwitchLayout::new(
            Vec3::from_array(switch.origin),
            Vec3::from_array(switch.axis),
            Vec3::from_array(switch.half_extents),
        );

        let entity = world
            .spawn((
                TriggerSwitch::new(binding(&switch.zone_a), binding(&switch.zone_b)),
                layout,
                Transform::from_translation(layout.origin),
                Name::new(switch.name.clone()),
            ))
            .id();
        switches.insert(switch.name.clone(), entity);
    }

    crate::log_info(&format!(
        "🎬 Scene spawned: {} cameras, {} rails, {} switches, {} focus targets",
        cameras.len(),
        rail_entities.len(),
        switches.len(),
        focus_targets.len()
    ));

    Ok(SceneHandles {
        player,
        focus_targets,
        rails: rail_entities,
        cameras,
        switches,
    })
}

/// Все проверки до spawn'а; возвращает построенные rails (в порядке description)
fn validate(description: &SceneDescription) -> Result<Vec<CameraRail>, SceneError> {
    unique_names("focus target", description.focus_targets.iter().map(|t| t.name.as_str()))?;
    unique_names("rail", description.rails.iter().map(|r| r.name.as_str()))?;
    unique_names("camera", description.cameras.iter().map(|c| c.name.as_str()))?;
    unique_names("switch", description.switches.iter().map(|s| s.name.as_str()))?;

    let rails = description
        .rails
        .iter()
        .map(|rail| {
            CameraRail::new(rail.points.iter().copied().map(Vec3::from_array)).map_err(|source| {
                SceneError::InvalidRail {
                    name: rail.name.clone(),
                    source,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for camera in &description.cameras {
        if let Some(rail) = &camera.rail {
            if !description.rails.iter().any(|r| &r.name == rail) {
                return Err(SceneError::UnknownRail {
                    camera: camera.name.clone(),
                    rail: rail.clone(),
                });
            }
        }
        if let Some(target) = &camera.focus_target {
            if !description.focus_targets.iter().any(|t| &t.name == target) {
                return Err(SceneError::UnknownFocusTarget {
                    camera: camera.name.clone(),
                    target: target.clone(),
                });
            }
        }
    }

    for switch in &description.switches {
        for zone in [&switch.zone_a, &switch.zone_b] {
            if let Some(camera) = &zone.camera {
                if !description.cameras.iter().any(|c| &c.name == camera) {
                    return Err(SceneError::UnknownCamera {
                        switch: switch.name.clone(),
                        camera: camera.clone(),
                    });
                }
            }
        }
    }

    Ok(rails)
}

fn unique_names<'a>(kind: &'static str, names: impl Iterator<Item = &'a str>) -> Result<(), SceneError> {
    let mut seen = Vec::new();
    for name in names {
        if seen.contains(&name) {
            return Err(SceneError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
        seen.push(name);
    }
    Ok(())
}
