use std::{
    fs::File,
    io::{self, BufWriter, Write}
};

use clap::Parser;
use quiz_elo_sim::{
    args::Args,
    error::AppError,
    model::{simulation::Simulation, structures::simulation_summary::SimulationSummary},
    utils::progress_utils::progress_bar
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.simulation_config()?;
    let mut simulation = Simulation::new(config)?;
    simulation.populate();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock()))
    };

    let bar = progress_bar(
        simulation.total_answers() as u64,
        "Simulating answers".to_string(),
        args.quiet
    );

    while let Some(step) = simulation.step()? {
        if let Some(snapshot) = step.snapshot {
            serde_json::to_writer(&mut out, &snapshot)?;
            writeln!(out)?;
        }

        bar.inc(1);
    }

    bar.finish();
    out.flush()?;

    let summary = simulation.summary();
    log_summary(&summary);

    if let Some(path) = &args.summary {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &summary)?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}

fn log_summary(summary: &SimulationSummary) {
    info!(
        "{} answers, {} snapshots (seed {})",
        summary.answers, summary.snapshots, summary.seed
    );

    if let Some((min, max)) = summary.question_rating_range {
        info!("Question ratings: {:.2} .. {:.2}", min, max);
    }

    if let Some((min, max)) = summary.player_rating_range {
        info!("Player ratings: {:.2} .. {:.2}", min, max);
    }

    for a in summary.archetypes.iter().filter(|a| a.players > 0) {
        if let Some(mean) = a.mean_rating {
            info!("{:>14}: {:>5} players, mean rating {:.2}", a.archetype, a.players, mean);
        }
    }
}
