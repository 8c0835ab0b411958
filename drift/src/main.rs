//! # Drift Binary
//!
//! Prints the truncated-vs-rounded propagation table for the Leibniz pi
//! series and animates the two resulting trajectories.
//!
//! # Usage
//!
//! ```bash
//! # Table, then animation, then wait for Enter
//! drift
//!
//! # Table only, custom steps
//! drift --table-only --steps 10 50 250
//!
//! # Animation only, fixed 3.1415 / 3.1416 baselines
//! drift --viz --baseline fixed
//!
//! # Config file, verbose JSON logs
//! drift --config drift.toml -v --json
//! ```

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use drift::animator::{AnimatorRegistry, animate};
use drift::cli::Args;
use drift::report::{TableStyle, build_report, render_table};
use drift_common::config::LogLevel;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        error!("drift failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            setup_tracing(&args, LogLevel::default());
            return Err(e.into());
        }
    };
    setup_tracing(&args, config.log_level);

    info!(
        "drift v{} starting (baseline={:?}, digits={}, steps={:?})",
        env!("CARGO_PKG_VERSION"),
        config.numeric.baseline,
        config.numeric.decimal_digits,
        config.report.highlighted_steps
    );

    let running = Arc::new(AtomicBool::new(true));
    if args.shows_animation() {
        let flag = Arc::clone(&running);
        ctrlc::set_handler(move || {
            // First press stops the animation; once it is already stopped
            // (or we are at the exit prompt) the process leaves immediately.
            if !flag.swap(false, Ordering::SeqCst) {
                std::process::exit(0);
            }
            info!("Received interrupt, stopping animation");
        })?;
    }

    if args.shows_table() {
        let report = build_report(
            config.report.highlighted_steps.iter().copied(),
            &config.numeric,
        )?;
        let style = TableStyle::from_config(&config.report);
        println!("\n{}", render_table(&report, &style));
    }

    if args.shows_animation() {
        animate(&AnimatorRegistry::with_builtin(), &config, &running)?;
    }

    if args.waits_for_ack() {
        running.store(false, Ordering::SeqCst);
        wait_for_enter()?;
    }

    info!("drift finished");
    Ok(())
}

fn wait_for_enter() -> std::io::Result<()> {
    println!("\nPress Enter to exit...");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

/// Setup tracing subscriber. `--verbose` forces DEBUG, otherwise the
/// configured level applies; `RUST_LOG` directives are honored on top.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured.into()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
