//! ARM-like pipeline simulator CLI.
//!
//! This binary provides three entry points. It performs:
//! 1. **Check:** Assemble a file and report diagnostics (optionally with a listing).
//! 2. **Step:** Run a fixed number of cycles, printing stage occupancy each cycle.
//! 3. **Run:** Run to completion and print the final state and statistics.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, process, thread};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use armpipe_core::asm::Assembler;
use armpipe_core::config::Config;
use armpipe_core::sim::{Session, StopReason};
use armpipe_core::{CpuState, Register};

#[derive(Parser, Debug)]
#[command(
    name = "armpipe",
    author,
    version,
    about = "ARM-like five-stage pipeline simulator",
    long_about = "Assemble and simulate programs for a small ARM-like instruction subset.\n\nOne instruction is in flight at a time; each cycle moves it one stage.\n\nExamples:\n  armpipe check loop.s --listing\n  armpipe step loop.s --cycles 12\n  armpipe run loop.s --max-cycles 500"
)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a file and report diagnostics.
    Check {
        /// Assembly source file.
        file: PathBuf,

        /// Print address, display bits, and source for each instruction.
        #[arg(long)]
        listing: bool,
    },

    /// Advance a fixed number of cycles, printing stage occupancy.
    Step {
        /// Assembly source file.
        file: PathBuf,

        /// Number of cycles to run.
        #[arg(short = 'n', long, default_value_t = 1)]
        cycles: u64,

        /// Pause between cycles for the configured play interval.
        #[arg(long)]
        play: bool,
    },

    /// Run until the program halts.
    Run {
        /// Assembly source file.
        file: PathBuf,

        /// Cycle budget (defaults to `general.max_cycles`).
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print the final CPU state as JSON instead of a report.
        #[arg(long)]
        json: bool,

        /// Write every recorded state as JSON snapshots to this file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| fail(&format!("{e}"))),
        None => Config::default(),
    };
    init_tracing(cli.verbose, config.general.trace_instructions);

    match cli.command {
        Commands::Check { file, listing } => cmd_check(&config, &file, listing),
        Commands::Step { file, cycles, play } => cmd_step(config, &file, cycles, play),
        Commands::Run {
            file,
            max_cycles,
            json,
            export,
        } => cmd_run(config, &file, max_cycles, json, export.as_deref()),
    }
}

fn init_tracing(verbose: u8, trace_instructions: bool) {
    let level = match verbose {
        0 if trace_instructions => "debug",
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    process::exit(1);
}

fn read_source(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("cannot read {}: {e}", path.display())))
}

/// Loads a file into a new session, exiting with the diagnostics if it does
/// not assemble.
fn load_session(config: Config, path: &Path) -> Session {
    let mut session = Session::new(config);
    session.load_source(read_source(path));
    if !session.program().is_ok() {
        for err in &session.program().errors {
            eprintln!("{}:{}: {}", path.display(), err.line, err.message);
            eprintln!("    {}", err.content.trim());
        }
        process::exit(1);
    }
    tracing::info!(
        path = %path.display(),
        instructions = session.program().instructions.len(),
        "program loaded"
    );
    session
}

fn cmd_check(config: &Config, path: &Path, listing: bool) {
    let result = Assembler::new(&config.assembler).parse(&read_source(path));

    if listing {
        for (index, inst) in result.instructions.iter().enumerate() {
            println!("{:#06x}  {}  {}", index * 4, inst.binary, inst.raw);
        }
    }
    for err in &result.errors {
        eprintln!("{}:{}: {}", path.display(), err.line, err.message);
        eprintln!("    {}", err.content.trim());
    }

    if result.is_ok() {
        println!("{}: {} instruction(s), no errors", path.display(), result.instructions.len());
    } else {
        eprintln!("{}: {} error(s)", path.display(), result.errors.len());
        process::exit(1);
    }
}

fn cmd_step(config: Config, path: &Path, cycles: u64, play: bool) {
    let interval = Duration::from_millis(config.session.play_interval_ms);
    let mut session = load_session(config, path);

    println!("{:>6}  {:>6}  {:<5} instruction", "clock", "pc", "stage");
    for _ in 0..cycles {
        match session.step() {
            Ok(state) => print_occupancy(state),
            Err(e) => fail(&format!("{e}")),
        }
        if play {
            thread::sleep(interval);
        }
    }
}

fn print_occupancy(state: &CpuState) {
    let (stage, text) = state.pipeline.resident().map_or(("-", String::new()), |(name, s)| {
        (
            name.short(),
            s.instruction.as_ref().map(ToString::to_string).unwrap_or_default(),
        )
    });
    println!("{:>6}  {:#06x}  {:<5} {}", state.clock, state.pc, stage, text);
}

fn cmd_run(config: Config, path: &Path, max_cycles: Option<u64>, json: bool, export: Option<&Path>) {
    let budget = max_cycles.unwrap_or(config.general.max_cycles);
    let mut session = load_session(config, path);

    let reason = session.run(budget).unwrap_or_else(|e| fail(&format!("{e}")));
    if reason == StopReason::CycleLimit {
        eprintln!("[!] Stopped after {budget} cycles without halting");
    }

    if let Some(out) = export {
        let history = session.export_history().unwrap_or_else(|e| fail(&format!("{e}")));
        fs::write(out, history)
            .unwrap_or_else(|e| fail(&format!("cannot write {}: {e}", out.display())));
    }

    let state = session.state();
    if json {
        match serde_json::to_string_pretty(state) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(&format!("{e}")),
        }
        return;
    }

    println!("[*] Finished at clock {} (pc={:#06x})", state.clock, state.pc);
    println!("flags {}", state.flags);
    for (reg, val) in state.registers.iter() {
        if val != 0 || reg == Register::Sp {
            println!("  {reg:<3} = {val}");
        }
    }
    for (addr, val) in state.memory.iter() {
        println!("  [{addr:#06x}] = {val}");
    }
    session.stats().print();
}
