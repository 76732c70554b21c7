//! corridor: pedestrians walking down a walled corridor to an exit line.
//!
//! Reads a JSON scenario (first argument, or the bundled `scenario.json`),
//! spawns agents at seeded random positions and speeds, and writes CSV output
//! to `output/corridor`.  Most agents head straight for the exit, every fourth
//! (offset one) detours through the checkpoint centre first, and every fourth
//! (offset three) stops at the checkpoint zone instead.
//!
//! Set `RUST_LOG=info` (or `debug`) for run logging.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use ps_agent::{AgentConfig, AgentStoreBuilder, SocialForce};
use ps_core::{AgentId, Crossing, CrossingId, SimConfig, SimRng, TransitionZone, Vec2, ZoneId, centroid};
use ps_env::WallIndexBuilder;
use ps_output::{CsvWriter, SimOutputObserver};
use ps_sim::{RetirePolicy, SimBuilder};

const DEFAULT_SCENARIO: &str = include_str!("../scenario.json");
const OUTPUT_DIR:       &str = "output/corridor";

// ── Scenario file ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Scenario {
    sim:        SimConfig,
    /// Open polylines; each consecutive vertex pair becomes one wall.
    walls:      Vec<Vec<Vec2>>,
    exit:       Vec<Vec2>,
    checkpoint: Vec<Vec2>,
    spawn:      Area,
    agents:     u32,
    speed:      SpeedRange,
}

#[derive(Deserialize)]
struct Area {
    min: Vec2,
    max: Vec2,
}

#[derive(Deserialize)]
struct SpeedRange {
    min: f32,
    max: f32,
}

fn load_scenario() -> Result<Scenario> {
    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading scenario {path}"))?,
        None => DEFAULT_SCENARIO.to_owned(),
    };
    let scenario: Scenario = serde_json::from_str(&text).context("parsing scenario")?;

    if scenario.speed.min <= 0.0 || scenario.speed.min > scenario.speed.max {
        bail!("speed range must satisfy 0 < min <= max");
    }
    if scenario.spawn.min.cmpgt(scenario.spawn.max).any() {
        bail!("spawn area min must not exceed max");
    }
    log::info!(
        "scenario: {} agents, {} wall polylines, exit with {} vertices",
        scenario.agents,
        scenario.walls.len(),
        scenario.exit.len()
    );
    Ok(scenario)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let scenario = load_scenario()?;
    let config = scenario.sim.clone();
    println!("=== corridor: pedsim ===");
    println!(
        "Agents: {}  |  Ticks: {} × {} s  |  Seed: {}",
        scenario.agents, config.total_ticks, config.dt_secs, config.seed
    );

    // 1. Static geometry.
    let mut walls = WallIndexBuilder::new();
    for polyline in &scenario.walls {
        walls.add_polyline(polyline);
    }
    let walls = walls.build()?;
    println!("Walls: {} segments", walls.len());

    let exit = Arc::new(Crossing::new(CrossingId(0), scenario.exit.clone()));
    let checkpoint = Arc::new(TransitionZone::new(ZoneId(0), scenario.checkpoint.clone()));
    let detour = centroid(&scenario.checkpoint).context("checkpoint has no vertices")?;

    // 2. Agents: positions and desired speeds drawn from the scenario seed.
    let mut rng = SimRng::new(config.seed);
    let Area { min, max } = scenario.spawn;
    let configs = (0..scenario.agents).map(|i| {
        let position = rng.point_in(min, max);
        let speed = rng.gen_range(scenario.speed.min..=scenario.speed.max);
        let agent = AgentConfig::new(AgentId(i), position, speed);
        match i % 4 {
            3 => agent.zone(Arc::clone(&checkpoint)),
            1 => agent.crossing(Arc::clone(&exit)).path(vec![detour]),
            _ => agent.crossing(Arc::clone(&exit)),
        }
    });
    let agents = AgentStoreBuilder::new().agents(configs).build()?;

    // 3. Sim.
    let mut sim = SimBuilder::new(config.clone(), agents, SocialForce::default())
        .walls(walls)
        .retire_policy(RetirePolicy::OnDestinationReached)
        .build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = SimOutputObserver::new(writer, &config);

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  {} of {} agents reached their destination",
        scenario.agents as usize - sim.agents.len(),
        scenario.agents
    );
    println!("  output written to {OUTPUT_DIR}/");

    if !sim.agents.is_empty() {
        println!();
        println!("{:<8} {:>8} {:>8} {:>8}", "Agent", "x", "y", "speed");
        println!("{}", "-".repeat(35));
        for ped in sim.agents.iter() {
            let p = ped.position();
            println!(
                "{:<8} {:>8.2} {:>8.2} {:>8.2}",
                ped.id().0,
                p.x,
                p.y,
                ped.velocity().length()
            );
        }
    }

    Ok(())
}
