use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strata::{
    BlockKind, BlockSource, BreakTracker, Chunk, ConfigError, EngineConfig, GeneratorKind, Runtime,
    Vec3, World, WorldPos, place_block, raycast,
};

/// Runs a headless session: streams terrain around a walking player that
/// digs and builds as it goes, then reports what happened.
#[derive(Parser, Debug)]
#[command(name = "strata", version, about)]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// World seed override.
    #[arg(long)]
    seed: Option<i32>,
    /// Simulation ticks to run at 60 Hz.
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Render distance override, in chunks.
    #[arg(long)]
    radius: Option<i32>,
    /// Mesh rebuilds per tick override.
    #[arg(long)]
    budget: Option<usize>,
    /// Use the flat generator.
    #[arg(long)]
    flat: bool,
}

const DT: f32 = 1.0 / 60.0;
const REACH: f32 = 5.0;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig, ConfigError> {
    let mut cfg = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        cfg.world.seed = seed;
    }
    if let Some(radius) = cli.radius {
        cfg.world.render_distance = radius;
    }
    if let Some(budget) = cli.budget {
        cfg.runtime.rebuild_budget = budget;
    }
    if cli.flat {
        cfg.generator.kind = GeneratorKind::Flat;
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Y of the first air cell above the highest solid block in the column.
fn surface_height(world: &World, x: i32, z: i32) -> i32 {
    let cfg = world.config();
    let top = (cfg.max_chunk_y + 1) * Chunk::HEIGHT as i32 - 1;
    let bottom = cfg.min_chunk_y * Chunk::HEIGHT as i32;
    (bottom..=top)
        .rev()
        .find(|&y| world.is_solid(WorldPos::new(x, y, z)))
        .map_or(bottom, |y| y + 1)
}

fn run(cli: &Cli) -> Result<(), ConfigError> {
    let cfg = load_config(cli)?;
    let mut rt = Runtime::from_config(&cfg)?;
    let mut breaker = BreakTracker::new(cfg.break_table()?);

    rt.tick(Vec3::new(0.5, 0.0, 0.5));
    let built = rt.drain_all();
    let ground = surface_height(rt.world(), 0, 0);
    log::info!("spawn area ready: {} chunk(s) meshed, ground at y={}", built, ground);

    let door = WorldPos::new(2, surface_height(rt.world(), 2, -2), -2);
    if rt.world_mut().place_door(door) {
        let opened = rt.world_mut().toggle_door(door);
        log::info!("door at {} placed, toggled open: {:?}", door, opened);
    }

    let mut walker = cfg
        .walker
        .spawn(Vec3::new(0.5, ground as f32 + 0.5, 0.5));
    let wish = Vec3::new(1.0, 0.0, 0.25);
    let look = Vec3::new(1.0, -0.8, 0.25);
    let (mut hits, mut broken, mut placed) = (0u32, 0u32, 0u32);
    let (mut loaded, mut rebuilt) = (0usize, 0usize);

    for tick in 0..cli.ticks {
        walker.step(rt.world(), wish, tick % 90 == 45, DT);

        if tick % 8 == 0 {
            if let Some(hit) = raycast(rt.world(), walker.eye_position(), look, REACH) {
                if tick % 160 == 0 {
                    let body = [walker.aabb()];
                    if place_block(rt.world_mut(), hit.previous, BlockKind::Planks, &body).is_some() {
                        placed += 1;
                    }
                } else if let Some(p) = breaker.hit(rt.world_mut(), hit.block) {
                    hits += 1;
                    if p.broken {
                        broken += 1;
                    }
                }
            }
        }

        let stats = rt.tick(walker.pos);
        loaded += stats.loaded;
        rebuilt += stats.rebuilt;
        if tick % 60 == 0 {
            log::debug!(
                "tick {}: pos ({:.2}, {:.2}, {:.2}) ground={} pending={}",
                tick,
                walker.pos.x,
                walker.pos.y,
                walker.pos.z,
                walker.on_ground,
                stats.pending
            );
        }
    }

    let quads: usize = rt.meshes().values().map(|m| m.stats().quads).sum();
    log::info!(
        "{} ticks: walked to ({:.1}, {:.1}, {:.1}), streamed {} chunk(s), rebuilt {}",
        cli.ticks,
        walker.pos.x,
        walker.pos.y,
        walker.pos.z,
        loaded,
        rebuilt
    );
    log::info!(
        "{} hit(s), {} block(s) broken, {} placed; {} meshes, {} quads resident",
        hits,
        broken,
        placed,
        rt.meshes().len(),
        quads
    );
    Ok(())
}
