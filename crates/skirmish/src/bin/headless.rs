//! # Skirmish Headless Driver
//!
//! Runs the full simulation contract without a renderer:
//! config load, formation spawn, scripted motion, a scripted drag
//! selection, and a stats report.
//!
//! ```bash
//! cargo run --bin skirmish_headless
//! ```

use std::error::Error;
use std::path::Path;

use skirmish::{Camera, DragTracker, SimConfig, Simulation, TickLoop};
use skirmish_shared::{Vec2, TICK_RATE};

/// Ticks to simulate (five seconds of game time).
const RUN_TICKS: u64 = 300;

/// Tick at which the scripted drag gesture is released.
const SELECT_TICK: u64 = 150;

/// Formation shape: files x ranks.
const FILES: usize = 8;
const RANKS: usize = 3;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=====================================================");
    println!("               SKIRMISH HEADLESS DRIVER");
    println!("=====================================================");

    let config = SimConfig::load_or_default(Path::new("skirmish.toml"));
    println!(
        "grid: {}-entity cells | debug overlay: {}",
        config.cell_ent_cap, config.debug_show_grid
    );

    let mut sim = Simulation::new(&config);
    // Screen space == world space for the driver: no window to scale for
    *sim.camera_mut() = Camera {
        offset: Vec2::ZERO,
        ..Camera::default()
    };

    // Spawn the formation the way the original demo did: a block of units
    // spaced 100 apart, anchored at (500, 300)
    let mut units = Vec::with_capacity(FILES * RANKS);
    for rank in 0..RANKS {
        for file in 0..FILES {
            let at = Vec2::new(
                500.0 + 100.0 * file as f32,
                300.0 + 100.0 * rank as f32,
            );
            units.push(sim.spawn_unit(at)?);
        }
    }
    println!("spawned {} units", units.len());

    let mut pacer = TickLoop::new(TICK_RATE);
    let dt = pacer.dt();

    let mut total_migrations = 0usize;
    let mut last_selected = 0usize;

    for tick in 0..RUN_TICKS {
        // Demo motion: each unit oscillates horizontally, phased by index,
        // fast enough to cross cell boundaries
        let t = tick as f32 * dt;
        for (i, &id) in units.iter().enumerate() {
            let phase = i as f32 * 0.7;
            let velocity = Vec2::new((t * 2.0 + phase).sin() * 160.0, 0.0);
            sim.world_mut().set_velocity(id, velocity)?;
        }

        // Scripted input: drag a box over the first rank, release mid-run
        if tick == SELECT_TICK {
            let mut tracker = DragTracker::new();
            tracker.press(Vec2::new(440.0, 250.0));
            tracker.press(Vec2::new(1260.0, 350.0));
            if let Some(region) = tracker.release() {
                sim.queue_selection(region);
            }
        }

        let start = pacer.begin_tick();
        let report = sim.tick(dt)?;
        pacer.end_tick(start);

        total_migrations += report.grid.migrated;
        if let Some(selected) = report.selected {
            last_selected = selected;
            println!(
                "tick {:>3}: selected {} units, {} migrations so far",
                report.frame, selected, total_migrations
            );
        }
    }

    let stats = pacer.stats();
    println!("-----------------------------------------------------");
    println!("ticks:            {}", pacer.tick_count());
    println!("entities:         {}", sim.world().entity_count());
    println!("cell migrations:  {total_migrations}");
    println!("last selection:   {last_selected} units");
    println!(
        "tick times:       max {}us, {} late",
        stats.max_tick_us, stats.late_ticks
    );

    if config.debug_show_grid {
        print_grid_occupancy(&sim);
    }

    Ok(())
}

/// Prints occupancy counts for the camera-visible cell window, the same
/// culled sub-rectangle a renderer would draw for the debug overlay.
fn print_grid_occupancy(sim: &Simulation) {
    let window = sim.grid().cells_overlapping(sim.camera().world_view());
    println!("visible cell occupancy:");

    for row in window.min_row..=window.max_row {
        let mut line = String::new();
        for col in window.min_col..=window.max_col {
            let count = sim.grid().cell(col, row).map_or(0, |c| c.len());
            line.push_str(&format!("{count:>3}"));
        }
        println!("{line}");
    }
}
