//! Strand issue controller simulator CLI.
//!
//! This binary drives the multi-strand model from the command line. It provides:
//! 1. **Scenario run:** Load a JSON scenario (programs and hazard events per strand) and an
//!    optional JSON configuration, run to quiescence, and report statistics.
//! 2. **Demo:** Run a built-in scenario with a 4-lane strided load, a long-latency op, and a
//!    suspended strand that resumes after a cache fill.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use strand_core::common::SimError;
use strand_core::config::Config;
use strand_core::isa::{Access, MemOp, encode};
use strand_core::sim::{EventKind, HazardEvent, ProgramWord, Scenario, StrandScript};
use strand_core::stats::STATS_SECTIONS;
use strand_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "strandsim",
    author,
    version,
    about = "Per-strand issue controller simulator",
    long_about = "Step a set of strand issue controllers through scripted programs and hazard events.\n\nExamples:\n  strandsim run scenario.json\n  strandsim run scenario.json --config strands.json --stats summary,hazards\n  strandsim demo --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON scenario.
    Run {
        /// Scenario file (programs and hazard events per strand).
        scenario: PathBuf,

        /// JSON configuration file; built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the built-in demonstration scenario.
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Log every strand transition (raises the default log level to `trace`).
    #[arg(long)]
    trace: bool,

    /// Statistics sections to print (summary, strands, hazards); all when omitted.
    #[arg(long, value_delimiter = ',')]
    stats: Vec<String>,

    /// Print statistics as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Write per-cycle strand snapshots to this file as JSON.
    #[arg(long)]
    dump_trace: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let trace = match &cli.command {
        Commands::Run { output, .. } | Commands::Demo { output } => output.trace,
    };
    init_logging(trace);

    let result = match cli.command {
        Commands::Run {
            scenario,
            config,
            output,
        } => cmd_run(&scenario, config.as_deref(), &output),
        Commands::Demo { output } => cmd_demo(&output),
    };

    if let Err(e) = result {
        eprintln!("\n[!] {e}");
        process::exit(1);
    }
}

fn init_logging(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_run(
    scenario_path: &std::path::Path,
    config_path: Option<&std::path::Path>,
    output: &OutputArgs,
) -> Result<(), SimError> {
    let config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let scenario = Scenario::from_file(scenario_path)?;

    println!("[*] Scenario: {}", scenario_path.display());
    simulate(config, scenario, output)
}

fn cmd_demo(output: &OutputArgs) -> Result<(), SimError> {
    let mut config = Config::default();
    config.strand.count = 2;
    config.strand.lanes = 4;

    println!("[*] Demo: 4-lane strided load on strand 0, suspend/resume on strand 1");
    simulate(config, demo_scenario(), output)
}

/// Strand 0 runs a strided vector load, then a long-latency op and a store; strand 1
/// misses in the cache on a scalar load, is suspended, and replays it after the fill.
fn demo_scenario() -> Scenario {
    let strand0 = StrandScript::new(vec![
        ProgramWord::new(encode::memory(MemOp::Strided, Access::Load, 4)),
        ProgramWord::long_latency(encode::arithmetic(0x1234)),
        ProgramWord::new(encode::memory(MemOp::Long, Access::Store, 0)),
    ]);
    let strand1 = StrandScript::new(vec![
        ProgramWord::new(encode::memory(MemOp::Long, Access::Load, 0)),
        ProgramWord::new(encode::arithmetic(0)),
    ])
    .with_event(HazardEvent {
        cycle: 2,
        kind: EventKind::Suspend,
        restart_pc: Some(0),
        lane: 0,
        offset: 0,
    })
    .with_event(HazardEvent {
        cycle: 6,
        kind: EventKind::Resume,
        restart_pc: None,
        lane: 0,
        offset: 0,
    });

    Scenario {
        strands: vec![strand0, strand1],
    }
}

fn simulate(mut config: Config, scenario: Scenario, output: &OutputArgs) -> Result<(), SimError> {
    if output.dump_trace.is_some() {
        config.general.trace = true;
    }
    for section in unknown_sections(&output.stats) {
        tracing::warn!(
            section,
            expected = %STATS_SECTIONS.join(", "),
            "unknown stats section"
        );
    }

    println!(
        "  Strands: {}  Lanes: {}  RAW delay: {}  Arbiter: {:?}",
        config.strand.count, config.strand.lanes, config.strand.raw_delay, config.arbiter.policy
    );

    let mut sim = Simulator::new(&config, scenario)?;
    let stats = sim.run()?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(stats)?);
    } else {
        stats.print_sections(&output.stats);
    }

    if let Some(path) = &output.dump_trace {
        tracing::debug!(cycles = sim.trace().len(), path = %path.display(), "writing trace");
        fs::write(path, serde_json::to_string_pretty(sim.trace())?)?;
        println!("[*] Trace written to {}", path.display());
    }
    Ok(())
}

/// Requested stats sections that `print_sections` does not know.
fn unknown_sections(requested: &[String]) -> impl Iterator<Item = &str> {
    requested
        .iter()
        .map(String::as_str)
        .filter(|section| !STATS_SECTIONS.contains(section))
}
