//! # LGA Simulator
//!
//! Runs the parallel lattice-gas engine from a config file and flags.
//!
//! ```bash
//! lga_sim --config config/lga.toml --threads 8 --verify
//! lga_sim --size 16 --iterations 4 --print
//! ```

use std::process::ExitCode;

use lga_sim::{run_simulation, CliArgs, ConfigResult, SimulationConfig, USAGE};

fn print_config(config: &SimulationConfig) {
    println!("┌─ CONFIGURATION ────────────────────────────────────────────────┐");
    println!("│ Grid:        {0}x{0}", config.grid.size);
    println!("│ Threads:     {}", config.engine.threads);
    println!("│ Iterations:  {} half-steps", config.engine.iterations);
    println!("│ Partition:   {:?}", config.engine.partition);
    println!("│ Seed:        {}", config.layout.seed);
    println!("│ Density:     {:.3}", config.layout.density);
    println!("│ Walls:       border={} divider={}", config.layout.border_walls, config.layout.divider);
    println!("│ Fill:        {:?}", config.layout.fill);
    println!("└────────────────────────────────────────────────────────────────┘");
    println!();
}

fn run(cli: &CliArgs) -> ConfigResult<bool> {
    let config = cli.resolve_config()?;
    print_config(&config);

    println!("Running...");
    let outcome = run_simulation(&config, cli.verify)?;
    let report = &outcome.report;

    println!();
    println!("┌─ RESULTS ──────────────────────────────────────────────────────┐");
    println!("│ Elapsed:            {:.3} ms", report.elapsed.as_secs_f64() * 1e3);
    println!("│ Cell updates/sec:   {:.0}", report.cell_updates_per_sec());
    println!("│ Max barrier wait:   {:.3} ms", report.max_barrier_wait().as_secs_f64() * 1e3);
    println!("│ Particles:          {} -> {}", outcome.initial_particles, outcome.final_particles);
    if let Some(rows) = report.uncovered_rows {
        println!("│ Uncovered rows:     {}..{} (never updated)", rows.start, rows.end);
    }
    println!("│");
    for worker in &report.workers {
        println!(
            "│  worker {:>3}  rows {:>5}..{:<5}  compute {:>9.3} ms  wait {:>9.3} ms  {:?}",
            worker.id,
            worker.rows.start,
            worker.rows.end,
            worker.compute_time.as_secs_f64() * 1e3,
            worker.barrier_wait.as_secs_f64() * 1e3,
            worker.state
        );
    }
    println!("└────────────────────────────────────────────────────────────────┘");

    if cli.print {
        println!();
        print!("{}", outcome.grid);
    }

    println!();
    match outcome.verified {
        Some(true) => println!("✓ Parallel result matches serial reference"),
        Some(false) => println!("✗ Parallel result DIFFERS from serial reference"),
        None => {}
    }

    Ok(outcome.verified != Some(false))
}

fn main() -> ExitCode {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         LGA SIMULATOR                                            ║");
    println!("║         FHP lattice gas, barrier-synchronized worker pool        ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let cli = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if cli.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("✗ FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}
