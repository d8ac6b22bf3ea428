//! Roll On entry point
//!
//! Headless native runner: drives the simulation with a scripted pilot at
//! the fixed timestep and logs the outcome. The rendered build embeds the
//! same `Simulation` behind a display loop.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use roll_on::consts::SIM_DT;
    use roll_on::persistence::FileStore;
    use roll_on::{ControlIntent, GamePhase, LevelConfig, Simulation};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let config = LevelConfig { seed, ..LevelConfig::default() };
    log::info!(
        "Roll On starting: seed {seed}, {} segments",
        config.count
    );

    let mut sim = Simulation::new(config, Box::new(FileStore::open()));

    // Scripted pilot: hold forward, hop every second or so
    const MAX_TICKS: u32 = 60 * 120;
    for _ in 0..2 {
        let mut ticks = 0;
        while sim.phase() != GamePhase::Ended && ticks < MAX_TICKS {
            let intent = ControlIntent {
                forward: true,
                jump: ticks % 70 == 0,
                ..Default::default()
            };
            sim.tick(intent, SIM_DT);
            ticks += 1;
        }
        log::info!(
            "run over after {:.1}s: distance {:.2}, high score {:.2}",
            sim.elapsed(),
            sim.score(),
            sim.high_score()
        );
        sim.restart();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is loaded as a module; the host page's frame loop
    // drives `roll_on::wasm::Game` directly
}
