//! Runs a small skirmish headless and prints the outcome.
//!
//! ```sh
//! RUST_LOG=duskwatch_core=debug cargo run --example skirmish
//! ```

use duskwatch_core::runtime::Runtime;
use duskwatch_core::scenario::Scenario;
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;
const SECONDS: u32 = 20;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "duskwatch_core=info".into()),
        )
        .init();

    let json = r#"{
        "player": { "position": [0.0, 0.0], "max_health": 400 },
        "actors": [
            { "position": [14.0, 0.0],
              "movement": { "kind": "charger" },
              "attack": { "kind": "melee" } },
            { "position": [-14.0, 3.0],
              "movement": { "kind": "zig_zag" },
              "attack": { "kind": "melee" } },
            { "position": [0.0, 15.0],
              "movement": { "kind": "stop_and_shoot" },
              "attack": { "kind": "shooter" } },
            { "position": [0.0, -15.0],
              "movement": { "kind": "orbit", "orbit_radius": 7.0 } },
            { "position": [-10.0, -10.0],
              "movement": { "kind": "medic_support" },
              "attack": { "kind": "medic_heal" } },
            { "position": [12.0, 12.0],
              "movement": { "kind": "anchor" },
              "attack": { "kind": "grenade" },
              "boss": true, "max_health": 60 }
        ]
    }"#;
    let scenario: Scenario = serde_json::from_str(json).expect("embedded roster parses");

    let mut runtime = Runtime::new(2024);
    let ids = scenario.spawn_into(&mut runtime).expect("roster deploys");
    println!("deployed {} actors", ids.len());

    for step in 0..(SECONDS * 60) {
        // The player strafes in a slow circle.
        let t = step as f32 * DT * 0.4;
        runtime
            .battlefield_mut()
            .move_player(Vec2::new(t.cos() * 4.0, t.sin() * 4.0));
        runtime.step(DT);
    }

    let field = runtime.battlefield();
    println!("after {SECONDS}s ({} ticks):", field.current_tick());
    if let Some(player) = field.player() {
        println!(
            "  player at ({:.1}, {:.1}) with {}/{} hp",
            player.position.x,
            player.position.y,
            player.health.current(),
            player.health.maximum()
        );
    }
    for actor in field.actors() {
        println!(
            "  {}{} {} at ({:.1}, {:.1}) with {}/{} hp",
            actor.id(),
            if actor.is_boss() { " [boss]" } else { "" },
            actor.faction(),
            actor.transform.position.x,
            actor.transform.position.y,
            actor.health.current(),
            actor.health.maximum()
        );
    }
}
