//! u-placement CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use u_placement::compare::run_both;
use u_placement::report::{placement_report, Comparison};
use u_placement::round::{PlacementConfig, PlacementResult, PlacementRunner};
use u_placement::sink::{FnSink, LogSink, TracingSink};
use u_placement::source::load_store;
use u_placement::store::EntityStore;
use u_placement::strategy::{Greedy, Heuristic};
use u_placement::PlacementError;

#[derive(Debug, Parser)]
#[command(name = "u-placement", version, about = "Place candidates into capacity-bounded slots")]
struct Cli {
    /// Candidate CSV (student_id,preferences,gno).
    #[arg(long, default_value = "students.csv")]
    students: PathBuf,

    /// Slot CSV (firma_id,kapasite).
    #[arg(long, default_value = "firms.csv")]
    firms: PathBuf,

    /// Random seed; omit for a fresh seed per run.
    #[arg(long)]
    seed: Option<u64>,

    /// Probability in [0, 1) that a placement is rejected in phases 1 and 2.
    #[arg(long, default_value_t = u_placement::round::DEFAULT_REJECTION_PROBABILITY)]
    rejection_probability: f64,

    /// Non-progress rounds before the phase escalates.
    #[arg(long, default_value_t = u_placement::round::DEFAULT_STALL_LIMIT)]
    stall_limit: usize,

    /// Stop after this many rounds (0 = no limit).
    #[arg(long, default_value_t = 0)]
    max_iterations: usize,

    /// Send the run transcript to the log (stderr) instead of stdout.
    #[arg(long, short)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the greedy strategy and print its transcript and placements.
    Greedy,
    /// Run the heuristic strategy and print its transcript and placements.
    Heuristic,
    /// Run both strategies and print the comparison table.
    Compare,
}

impl Cli {
    fn config(&self) -> PlacementConfig {
        let mut config = PlacementConfig::default()
            .with_rejection_probability(self.rejection_probability)
            .with_stall_limit(self.stall_limit)
            .with_max_iterations(self.max_iterations);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,u_placement::transcript=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<(), PlacementError> {
    let store = load_store(&cli.students, &cli.firms)?;
    println!(
        "{} candidates, {} slots",
        store.candidates().len(),
        store.slots().len()
    );

    let config = cli.config();
    let mut stdout = FnSink(|line: &str| println!("{line}"));
    let mut log = TracingSink;
    let sink: &mut dyn LogSink = if cli.quiet {
        &mut log
    } else {
        &mut stdout
    };

    match cli.command {
        Command::Greedy => {
            let result = PlacementRunner::run_with_sink(&Greedy, &store, &config, sink)?;
            print_run(&result);
        }
        Command::Heuristic => {
            let result = PlacementRunner::run_with_sink(&Heuristic, &store, &config, sink)?;
            print_run(&result);
        }
        Command::Compare => print_comparison(&store, &config)?,
    }
    Ok(())
}

fn print_run(result: &PlacementResult) {
    let title = format!("{} PLACEMENTS", result.strategy.to_uppercase());
    println!();
    println!("{title}");
    println!("{}", "=".repeat(40));
    for line in placement_report(&result.store) {
        println!("{line}");
    }
}

fn print_comparison(store: &EntityStore, config: &PlacementConfig) -> Result<(), PlacementError> {
    let (greedy, heuristic) = run_both(store, config)?;
    print!("{}", Comparison::new(&greedy, &heuristic));
    Ok(())
}
