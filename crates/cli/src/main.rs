//! APEX pipeline simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Simulate:** Run a program to `HALT` or a cycle bound and dump the final state.
//! 2. **Display:** Same as simulate, printing every stage's instruction each cycle.
//! 3. **Show memory:** Run a program and print a single data memory word.
//! 4. **Single step:** Advance one cycle per Enter and show the pipeline after each.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use apex_core::config::Config;
use apex_core::sim::simulator::RunSummary;
use apex_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "apex-sim",
    author,
    version,
    about = "Cycle-accurate APEX five-stage pipeline simulator",
    long_about = "Run an APEX program listing through the five-stage in-order pipeline.\n\nExamples:\n  apex-sim simulate input.asm 50\n  apex-sim display input.asm 20 --no-forwarding\n  apex-sim show-mem input.asm 12 --cycles 100\n  apex-sim single-step input.asm"
)]
struct Cli {
    /// Decode stalls on every busy source instead of taking forwarded values.
    #[arg(long, global = true)]
    no_forwarding: bool,

    /// Print stage contents to stderr every cycle.
    #[arg(long, global = true)]
    trace: bool,

    /// JSON configuration file; flags above override it.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print statistics after the run. Optionally restrict to named sections
    /// (summary, pipeline, instruction_mix, branch).
    #[arg(long, global = true, num_args = 0.., value_name = "SECTION")]
    stats: Option<Vec<String>>,

    /// Write statistics as JSON to this file after the run.
    #[arg(long, global = true, value_name = "FILE")]
    stats_json: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run to HALT or the cycle bound and print registers and memory.
    Simulate {
        /// Program listing.
        file: PathBuf,
        /// Maximum number of cycles.
        cycles: u64,
    },

    /// Like simulate, printing every stage's instruction each cycle.
    Display {
        /// Program listing.
        file: PathBuf,
        /// Maximum number of cycles.
        cycles: u64,
    },

    /// Run, then print one data memory word.
    ShowMem {
        /// Program listing.
        file: PathBuf,
        /// Word address to print.
        address: i32,
        /// Maximum number of cycles; runs to HALT when omitted.
        #[arg(long)]
        cycles: Option<u64>,
    },

    /// Advance one cycle per Enter; `q` quits.
    SingleStep {
        /// Program listing.
        file: PathBuf,
    },
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!(error = %e, "simulation aborted");
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.no_forwarding {
        config.pipeline.forwarding = false;
    }
    if cli.trace {
        config.general.trace = true;
    }

    match &cli.command {
        Commands::Simulate { file, cycles } => {
            let mut sim = load(file, &config)?;
            let summary = sim.run_until(*cycles)?;
            finish(cli, &sim, summary)?;
            print!("{}", sim.render_full_state());
        }
        Commands::Display { file, cycles } => {
            config.general.trace = true;
            let mut sim = load(file, &config)?;
            let summary = sim.run_until(*cycles)?;
            finish(cli, &sim, summary)?;
            print!("{}", sim.render_state());
        }
        Commands::ShowMem {
            file,
            address,
            cycles,
        } => {
            let mut sim = load(file, &config)?;
            let summary = sim.run_until(cycles.unwrap_or(u64::MAX))?;
            finish(cli, &sim, summary)?;
            println!(
                "|   MEM[{address}]\t|\tData Value = {}    |",
                sim.memory_word(*address)?
            );
        }
        Commands::SingleStep { file } => {
            let mut sim = load(file, &config)?;
            single_step(&mut sim)?;
            finish(cli, &sim, sim.summary())?;
            print!("{}", sim.render_state());
        }
    }
    Ok(())
}

fn load(file: &Path, config: &Config) -> Result<Simulator, SimError> {
    println!("[*] Loading {}", file.display());
    println!(
        "    forwarding: {}  trace: {}  code base: {}",
        config.pipeline.forwarding, config.general.trace, config.general.code_base
    );
    Simulator::from_file(file, config)
}

/// Prints the completion line and any requested statistics.
fn finish(cli: &Cli, sim: &Simulator, summary: RunSummary) -> Result<(), SimError> {
    println!("\n{summary}");
    if let Some(sections) = &cli.stats {
        sim.stats().print_sections(sections);
    }
    if let Some(path) = &cli.stats_json {
        let json = serde_json::to_string_pretty(sim.stats())?;
        std::fs::write(path, json)?;
    }
    Ok(())
}

/// Interactive loop: Enter steps one cycle, `q` quits.
fn single_step(sim: &mut Simulator) -> Result<(), SimError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !sim.is_halted() {
        print!("Press Enter to step (q to quit): ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }
        let _ = sim.step()?;
        println!("Clock Cycle #: {}", sim.cycle());
        print!("{}", sim.render_pipeline());
    }
    Ok(())
}
