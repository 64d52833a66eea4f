//! Headless smoke simulation driver
//!
//! Builds a preset scene, validates the configuration and runs a fixed
//! number of steps, printing field statistics as it goes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --package demo-headless -- --scene wind-tunnel --steps 600
//! RUST_LOG=smoke_sim_core=debug cargo run --package demo-headless
//! ```

use clap::Parser;
use nalgebra::Vector2;
use smoke_sim_core::solver::{Pass, StepTimings};
use smoke_sim_core::{FieldStats, Scene, SceneParams, Solver};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Smoke simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "smoke-sim-demo")]
#[command(about = "Headless MAC-grid smoke simulation", long_about = None)]
struct Args {
    /// Preset scene (tank, wind-tunnel)
    #[arg(short, long, default_value = "wind-tunnel")]
    scene: Scene,

    /// Grid width in cells, border included
    #[arg(long, default_value_t = 160)]
    width: usize,

    /// Grid height in cells, border included
    #[arg(long, default_value_t = 80)]
    height: usize,

    /// Number of steps to run
    #[arg(short = 'n', long, default_value_t = 300)]
    steps: u64,

    /// Timestep in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Projection sweeps per step
    #[arg(short, long, default_value_t = 40)]
    iters: usize,

    /// Gauss-Seidel over-relaxation factor [1, 2)
    #[arg(short, long, default_value_t = 1.9)]
    overrelaxation: f32,

    /// Cell size in meters
    #[arg(long, default_value_t = 0.01)]
    grid_spacing: f32,

    /// Fluid density in kg/m³
    #[arg(long, default_value_t = 1000.0)]
    density: f32,

    /// Wind tunnel inflow speed in m/s
    #[arg(long, default_value_t = 2.0)]
    inflow: f32,

    /// Obstacle centre as fractions of width and height, e.g. `0.4,0.5`
    #[arg(long, value_delimiter = ',', num_args = 2)]
    obstacle: Option<Vec<f32>>,

    /// Report every N steps
    #[arg(short, long, default_value_t = 30)]
    report_interval: u64,
}

impl Args {
    fn scene_params(&self) -> SceneParams {
        let mut params = SceneParams {
            grid_spacing: self.grid_spacing,
            inflow_velocity: self.inflow,
            ..Default::default()
        };
        if let Some(&[x, y]) = self.obstacle.as_deref() {
            params.obstacle_center = Vector2::new(x, y);
        }
        params
    }
}

fn print_row(step: u64, time: f64, stats: &FieldStats, step_ms: f64) {
    println!(
        "{:6} | {:7.3} | {:10.3e} | {:10.3e} | {:9.4} | {:7.3} | {:5.2} | {:8.2}",
        step,
        time,
        stats.total_divergence,
        stats.max_divergence,
        stats.mean_smoke,
        stats.max_speed,
        stats.cfl,
        step_ms
    );
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Smoke Simulation Demo ===\n");

    let (grid, mut config) = args
        .scene
        .build_with(args.width, args.height, &args.scene_params());
    config.dt = args.dt;
    config.num_iters = args.iters;
    config.overrelaxation = args.overrelaxation;
    config.density = args.density;

    let mut solver = match Solver::try_new(grid, config) {
        Ok(solver) => solver,
        Err(err) => {
            error!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let config = solver.config().clone();
    info!(
        "Running {} for {} steps, reporting every {}",
        args.scene, args.steps, args.report_interval
    );
    println!(
        "Scene: {} ({}x{} cells, {} fluid)",
        args.scene,
        solver.grid().width(),
        solver.grid().height(),
        solver.grid().fluid_cell_count()
    );
    println!(
        "dt={:.4}s, h={:.4}m, gravity={:.2}m/s², omega={:.2}, iters={}\n",
        config.dt, config.grid_spacing, config.gravity, config.overrelaxation, config.num_iters
    );

    println!("  Step | Time(s) |  Total div |    Max div | Mean smoke | Max vel |   CFL | Step(ms)");
    println!("-------|---------|------------|------------|------------|---------|-------|---------");

    let stats = FieldStats::collect(solver.grid(), config.grid_spacing, config.dt);
    print_row(0, 0.0, &stats, 0.0);

    let interval = args.report_interval.max(1);
    let mut totals = StepTimings::new();
    for _ in 0..args.steps {
        solver.advance();
        totals.accumulate(solver.step_timings());

        let step = solver.steps_taken();
        if step % interval == 0 || step == args.steps {
            let stats = FieldStats::collect(solver.grid(), config.grid_spacing, config.dt);
            print_row(step, solver.elapsed_time(), &stats, solver.last_step_ms());
        }
    }

    let stats = FieldStats::collect(solver.grid(), config.grid_spacing, config.dt);
    println!("\n=== Simulation Complete ===");
    println!("Simulated time: {:.3}s", solver.elapsed_time());
    println!("Steps: {}", solver.steps_taken());
    let steps = solver.steps_taken();
    if steps > 0 {
        let steps = steps as f64;
        println!("Average step: {:.2}ms", totals.step_ms() / steps);
        for pass in Pass::ALL {
            println!("  {:<16} {:8.3}ms", pass.name(), totals.pass_ms(pass) / steps);
        }
    }
    println!("Final max divergence: {:.3e}", stats.max_divergence);
    println!("Max pressure: {:.1} Pa", stats.max_pressure);
    if stats.cfl > 1.0 {
        warn!("CFL {:.2} > 1, consider a smaller --dt", stats.cfl);
    }
    if let Some((pass, ms)) = totals.slowest() {
        info!("Slowest pass overall: {pass} ({ms:.1}ms total)");
    }

    ExitCode::SUCCESS
}
