//! Trigger switch — пара соседних зон между двумя камерами
//!
//! Переключение только на exit: пока actor внутри sibling зоны, switch ждёт
//! (hysteresis на границе зон, один handoff на одно пересечение).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::ViewBlend;

/// Какая из двух зон switch'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum ZoneSide {
    A,
    B,
}

impl ZoneSide {
    pub const BOTH: [ZoneSide; 2] = [ZoneSide::A, ZoneSide::B];

    pub fn sibling(self) -> Self {
        match self {
            ZoneSide::A => ZoneSide::B,
            ZoneSide::B => ZoneSide::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            ZoneSide::A => 0,
            ZoneSide::B => 1,
        }
    }
}

/// Actors внутри одной зоны (порядок входа сохраняется)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneOccupancy {
    actors: Vec<Entity>,
}

impl ZoneOccupancy {
    /// false если actor уже был внутри
    pub fn insert(&mut self, actor: Entity) -> bool {
        if self.actors.contains(&actor) {
            return false;
        }
        self.actors.push(actor);
        true
    }

    /// false если actor'а не было
    pub fn remove(&mut self, actor: Entity) -> bool {
        let before = self.actors.len();
        self.actors.retain(|&occupant| occupant != actor);
        self.actors.len() != before
    }

    pub fn contains(&self, actor: Entity) -> bool {
        self.actors.contains(&actor)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.actors.iter().copied()
    }
}

/// Камера зоны + blend, с которым она активируется при выходе из этой зоны
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneBinding {
    pub camera: Option<Entity>,
    pub blend: ViewBlend,
}

impl ZoneBinding {
    pub fn new(camera: Entity, blend: ViewBlend) -> Self {
        Self {
            camera: Some(camera),
            blend,
        }
    }
}

/// Что сделать с камерами после exit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraHandoff {
    pub activate: Entity,
    /// Камера sibling зоны (None — не назначена, activate всё равно выполняется)
    pub deactivate: Option<Entity>,
    pub blend: ViewBlend,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandoffDecision {
    /// Actor всё ещё в sibling зоне — ждём его выхода оттуда
    Deferred,
    /// У зоны нет камеры — switch в эту сторону no-op
    MissingCamera { side: ZoneSide },
    Switch(CameraHandoff),
}

/// Trigger switch компонент (occupancy + bindings обеих зон)
///
/// Сами зоны (volumes) — забота host'а / physics; сюда приходят только enter/exit.
#[derive(Component, Debug, Clone, Default)]
pub struct TriggerSwitch {
    bindings: [ZoneBinding; 2],
    occupancy: [ZoneOccupancy; 2],
}

impl TriggerSwitch {
    pub fn new(zone_a: ZoneBinding, zone_b: ZoneBinding) -> Self {
        Self {
            bindings: [zone_a, zone_b],
            occupancy: Default::default(),
        }
    }

    pub fn binding(&self, side: ZoneSide) -> &ZoneBinding {
        &self.bindings[side.index()]
    }

    pub fn occupancy(&self, side: ZoneSide) -> &ZoneOccupancy {
        &self.occupancy[side.index()]
    }

    /// Actor вошёл в зону. Камеры не трогаем.
    pub fn on_enter(&mut self, side: ZoneSide, actor: Entity) -> bool {
        self.occupancy[side.index()].insert(actor)
    }

    /// Actor вышел из зоны → решение о handoff
    ///
    /// `sibling_occupied` — ответ host'а "actor ещё в соседней зоне?";
    /// None → берём из собственной occupancy.
    pub fn on_exit(&mut self, side: ZoneSide, actor: Entity, sibling_occupied: Option<bool>) -> HandoffDecision {
        self.occupancy[side.index()].remove(actor);

        let sibling = side.sibling();
        let in_sibling = sibling_occupied.unwrap_or_else(|| self.occupancy(sibling).contains(actor));
        if in_sibling {
            return HandoffDecision::Deferred;
        }

        let binding = self.binding(side);
        let Some(activate) = binding.camera else {
            return HandoffDecision::MissingCamera { side };
        };

        HandoffDecision::Switch(CameraHandoff {
            activate,
            deactivate: self.binding(sibling).camera,
            blend: binding.blend,
        })
    }
}

/// Зона на отдельном entity (sensor collider host'а) → к какому switch'у относится
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct TriggerZone {
    pub switch: Entity,
    pub side: ZoneSide,
}

/// Геометрия switch'а: две коробки вдоль `axis`, стык в `origin`
///
/// `half_extents` — половинные размеры одной зоны (x — вдоль axis).
/// Зона A лежит со стороны −axis, зона B — со стороны +axis.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TriggerSwitchLayout {
    pub origin: Vec3,
    pub axis: Vec3,
    pub half_extents: Vec3,
}

impl TriggerSwitchLayout {
    pub fn new(origin: Vec3, axis: Vec3, half_extents: Vec3) -> Self {
        Self {
            origin,
            axis,
            half_extents,
        }
    }

    /// Нормализованная axis (вырожденная → +X)
    pub fn direction(&self) -> Vec3 {
        self.axis.try_normalize().unwrap_or(Vec3::X)
    }

    /// Поворот local X → axis
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_arc(Vec3::X, self.direction())
    }

    /// [центр A, центр B]
    pub fn zone_centers(&self) -> [Vec3; 2] {
        let offset = self.direction() * self.half_extents.x;
        [self.origin - offset, self.origin + offset]
    }

    pub fn zone_center(&self, side: ZoneSide) -> Vec3 {
        self.zone_centers()[side.index()]
    }

    /// Точка внутри коробки зоны (границы включительно)
    pub fn zone_contains(&self, side: ZoneSide, point: Vec3) -> bool {
        let local = self.rotation().inverse() * (point - self.zone_center(side));
        local.abs().cmple(self.half_extents.abs()).all()
    }
}
