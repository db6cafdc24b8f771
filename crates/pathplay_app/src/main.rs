// SPDX-License-Identifier: MIT OR Apache-2.0
//! `PathPlay` - headless animation runner
//!
//! Plays a demo script through the recording renderer:
//! - Builds the scene described by a RON script (or the built-in demo)
//! - Starts every motion and drives them with a fixed-rate clock
//! - Reports frame and draw counts
//! - Optionally exports every painted frame as JSON
//!
//! ## Architecture
//!
//! The binary is a thin shell over the `pathplay_scene`, `pathplay_motion`
//! and `pathplay_render` crates. Log output is controlled with `RUST_LOG`.

mod args;
mod error;
mod runner;
mod script;

use args::Args;
use clap::Parser;
use error::AppError;
use script::DemoScript;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn run(args: Args) -> Result<(), AppError> {
    if let Some(path) = &args.write_default {
        DemoScript::builtin().save(path)?;
        tracing::info!("Wrote built-in script to {}", path.display());
        return Ok(());
    }

    let script = match &args.script {
        Some(path) => DemoScript::load(path)?,
        None => {
            tracing::info!("No script given, playing the built-in demo");
            DemoScript::builtin()
        }
    };

    let output = runner::run_script(&script)?;
    let report = &output.report;
    tracing::info!(
        "'{}' finished: {} frames ticked, {} painted, {} draw commands, {}/{} motions complete, {:.0} ms",
        report.script,
        report.frames_ticked,
        report.frames_painted,
        report.draw_commands,
        report.motions_finished,
        report.motions_started,
        report.elapsed_ms
    );

    if let Some(path) = &args.json {
        runner::export_frames_json(&output.frames, path)?;
    }
    Ok(())
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("pathplay_app=info,pathplay_render=info,pathplay_motion=warn,pathplay_scene=warn")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting PathPlay v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    if let Err(e) = run(args) {
        tracing::error!("PathPlay failed: {e}");
        std::process::exit(1);
    }
}
