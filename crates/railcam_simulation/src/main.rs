//! Headless симуляция RAILCAM
//!
//! Загружает RON сцену (путь из argv или встроенный corridor), ведёт игрока
//! вдоль +X и печатает переключения камер.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use railcam_simulation::{
    create_headless_app, log_error, log_info, spawn_scene, ActivateViewRequest, CameraConfigurationFailed,
    CameraSystems, FixedCamera, PlayerCharacter, SceneDescription, SimulationPlugin, SIMULATION_HZ,
};

const BUNDLED_SCENE: &str = include_str!("../scenes/corridor.ron");

/// Скорость игрока (м/с)
const WALK_SPEED: f32 = 3.0;
/// Игрок дошёл до конца коридора
const WALK_END_X: f32 = 30.0;
const MAX_TICKS: u32 = 1200;

fn main() {
    let description = match std::env::args().nth(1) {
        Some(path) => SceneDescription::load(&path),
        None => SceneDescription::from_ron(BUNDLED_SCENE),
    };
    let description = match description {
        Ok(description) => description,
        Err(error) => {
            eprintln!("Failed to load scene: {}", error);
            std::process::exit(1);
        }
    };

    let mut app = create_headless_app();
    // Каждый app.update() = ровно один FixedUpdate tick
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / SIMULATION_HZ,
    )))
    .add_plugins(SimulationPlugin)
    .add_systems(FixedUpdate, walk_player.before(CameraSystems::Start))
    .add_systems(Update, (report_view_requests, report_configuration_failures));

    if let Err(error) = spawn_scene(app.world_mut(), &description) {
        log_error(&format!("Scene rejected: {}", error));
        std::process::exit(1);
    }

    println!("Starting RAILCAM headless simulation ({} Hz)", SIMULATION_HZ);

    for tick in 0..MAX_TICKS {
        app.update();

        let world = app.world_mut();
        let player_x = world
            .query_filtered::<&Transform, With<PlayerCharacter>>()
            .iter(world)
            .next()
            .map(|transform| transform.translation.x)
            .unwrap_or_default();

        if tick % 60 == 0 {
            for (name, camera) in world.query::<(&Name, &FixedCamera)>().iter(world) {
                println!(
                    "Tick {}: player x={:.2} | {} {:?} at {:.2?}",
                    tick,
                    player_x,
                    name,
                    camera.phase(),
                    camera.position()
                );
            }
        }

        if player_x >= WALK_END_X {
            break;
        }
    }

    println!("Simulation complete!");
}

/// Игрок идёт вдоль +X с постоянной скоростью
fn walk_player(time: Res<Time<Fixed>>, mut players: Query<&mut Transform, With<PlayerCharacter>>) {
    for mut transform in players.iter_mut() {
        transform.translation.x += WALK_SPEED * time.delta_secs();
    }
}

fn report_view_requests(mut requests: EventReader<ActivateViewRequest>, names: Query<&Name>) {
    for request in requests.read() {
        let name = names.get(request.camera).map(|name| name.as_str()).unwrap_or("<unnamed>");
        log_info(&format!(
            "View → {} (blend {:.2}s {:?}, exp {})",
            name, request.blend.duration, request.blend.curve, request.blend.exponent
        ));
    }
}

fn report_configuration_failures(mut failures: EventReader<CameraConfigurationFailed>, names: Query<&Name>) {
    for failure in failures.read() {
        let name = names.get(failure.camera).map(|name| name.as_str()).unwrap_or("<unnamed>");
        log_error(&format!("Camera {} misconfigured: {}", name, failure.error));
    }
}
