mod analysis;
mod app;
mod color;
mod config;
mod data;
mod error;
mod report;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::RustyReachApp;
use chrono::Local;
use clap::Parser;
use eframe::egui;

use config::{Args, Settings};
use data::filter::{filtered_interactions, FilterState};
use report::{run_all, Analysis, RunContext, Summary};

fn main() -> Result<()> {
    env_logger::init();
    let settings = Settings::from(Args::parse());
    log::debug!("Settings: {settings:?}");

    if settings.summary {
        return print_summary(&settings);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Reach – Network Activity Analyzer",
        options,
        Box::new(|_cc| Ok(Box::new(RustyReachApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("failed to start the window")
}

/// Run every analysis on the whole export and print the results to stdout.
fn print_summary(settings: &Settings) -> Result<()> {
    let bundle = data::loader::detect_and_load(&settings.data_dir)
        .with_context(|| format!("loading {}", settings.data_dir.display()))?;
    for problem in &bundle.problems {
        eprintln!("warning: {problem}");
    }

    let interactions = filtered_interactions(&bundle, &FilterState::default());
    let ctx = RunContext {
        bundle: &bundle,
        interactions: &interactions,
        top_n: settings.top_n,
        today: Local::now().date_naive(),
    };
    let results = run_all(Analysis::ALL, &ctx);

    if settings.json {
        let summary = Summary::new(&bundle, &results);
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing the summary")?
        );
        return Ok(());
    }

    for (analysis, result) in &results {
        println!("== {} ==", analysis.title());
        match result {
            Ok(outcome) => {
                for (label, value) in &outcome.indicators {
                    println!("  {label}: {value}");
                }
                if !outcome.commentary.is_empty() {
                    println!("\n{}", outcome.commentary);
                }
            }
            Err(e) => println!("  unavailable: {e}"),
        }
        println!();
    }
    Ok(())
}
