//! Camera rail — spline путь для Rail камер
//!
//! Тонкая обёртка над bevy_math cubic splines (Catmull-Rom через все control points).
//! Камера спрашивает только три вещи: длину, точку по дистанции, стартовую точку.
//!
//! Rail неизменяем после создания, поэтому несколько камер читают его без синхронизации.

use bevy::math::cubic_splines::{CubicCardinalSpline, CubicCurve, CubicGenerator};
use bevy::prelude::*;
use thiserror::Error;

/// Сэмплов на один сегмент кривой для arc-length таблицы
pub const SAMPLES_PER_SEGMENT: usize = 32;

/// Путь, по которому едет Rail камера (seam для host кривых)
pub trait RailPath {
    /// Полная длина дуги
    fn length(&self) -> f32;

    /// Точка на дистанции `distance` от начала (world space)
    fn point_at_distance(&self, distance: f32) -> Vec3;

    /// Первая control point — сюда садится Rail камера при старте
    fn initial_point(&self) -> Vec3;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RailError {
    #[error("rail needs at least 2 control points, got {given}")]
    NotEnoughControlPoints { given: usize },
}

/// Rail компонент (authoring data + precomputed arc-length таблица)
///
/// Control points в world space: Transform entity rail'а не применяется.
#[derive(Component, Debug, Clone)]
pub struct CameraRail {
    control_points: Vec<Vec3>,
    curve: CubicCurve<Vec3>,
    /// (параметр кривой, накопленная длина) — монотонно по обоим
    arc_table: Vec<(f32, f32)>,
}

impl CameraRail {
    pub fn new(control_points: impl IntoIterator<Item = Vec3>) -> Result<Self, RailError> {
        let control_points: Vec<Vec3> = control_points.into_iter().collect();
        if control_points.len() < 2 {
            return Err(RailError::NotEnoughControlPoints {
                given: control_points.len(),
            });
        }

        let curve = CubicCardinalSpline::new_catmull_rom(control_points.iter().copied())
            .to_curve()
            .map_err(|_| RailError::NotEnoughControlPoints {
                given: control_points.len(),
            })?;

        // Endpoints зеркалятся внутри bevy → segments = points - 1, параметр в [0, segments]
        let segments = control_points.len() - 1;
        let arc_table = build_arc_table(&curve, segments);

        Ok(Self {
            control_points,
            curve,
            arc_table,
        })
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    /// Параметр кривой для заданной дистанции (линейная интерполяция внутри таблицы)
    fn parameter_at_distance(&self, distance: f32) -> f32 {
        let total = self.length();
        let distance = distance.clamp(0.0, total);

        let upper = self
            .arc_table
            .partition_point(|&(_, length)| length < distance)
            .min(self.arc_table.len() - 1);
        if upper == 0 {
            return self.arc_table[0].0;
        }

        let (t0, l0) = self.arc_table[upper - 1];
        let (t1, l1) = self.arc_table[upper];
        let span = l1 - l0;
        if span <= f32::EPSILON {
            return t1;
        }

        t0 + (t1 - t0) * ((distance - l0) / span)
    }
}

impl RailPath for CameraRail {
    fn length(&self) -> f32 {
        self.arc_table.last().map(|&(_, length)| length).unwrap_or(0.0)
    }

    /// За пределами [0, length] возвращает концы (без экстраполяции)
    fn point_at_distance(&self, distance: f32) -> Vec3 {
        self.curve.position(self.parameter_at_distance(distance))
    }

    fn initial_point(&self) -> Vec3 {
        self.control_points[0]
    }
}

fn build_arc_table(curve: &CubicCurve<Vec3>, segments: usize) -> Vec<(f32, f32)> {
    let samples = segments * SAMPLES_PER_SEGMENT;
    let mut table = Vec::with_capacity(samples + 1);

    let mut previous = curve.position(0.0);
    let mut accumulated = 0.0;
    table.push((0.0, 0.0));

    for i in 1..=samples {
        let t = segments as f32 * i as f32 / samples as f32;
        let point = curve.position(t);
        accumulated += point.distance(previous);
        previous = point;
        table.push((t, accumulated));
    }

    table
}

#[cfg(test)]
mod rail_tests;
