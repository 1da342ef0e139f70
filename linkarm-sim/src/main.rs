// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use clap::{Parser, ValueHint};

mod config;
mod driver;
mod program;
mod viewport;

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Planar linkage simulator", long_about = None)]
struct Args {
    /// Configuration file.
    #[arg(
        short = 'c',
        long = "config",
        alias = "conf",
        default_value = "linkarm.toml",
        value_name = "FILE",
        value_hint = ValueHint::FilePath
    )]
    config: std::path::PathBuf,
    /// Angle program, overrides the configuration.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    program: Option<std::path::PathBuf>,
    /// Stop after this many ticks.
    #[arg(short, long)]
    ticks: Option<u64>,
    /// Quiet output (no logging).
    #[arg(long)]
    quiet: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use log::LevelFilter;

    let args = Args::parse();

    let mut config = config::from_file(&args.config)?;

    if let Some(program) = args.program.clone() {
        config.program = Some(program);
    }

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_level(LevelFilter::Off);
    log_config.set_thread_level(LevelFilter::Off);
    log_config.set_target_level(LevelFilter::Off);
    log_config.set_location_level(LevelFilter::Off);
    log_config.add_filter_ignore_str("mio");

    let log_level = if args.quiet {
        LevelFilter::Off
    } else {
        match args.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    log::trace!("{:#?}", config);

    run(config, args.ticks).await
}

async fn run(config: config::Config, ticks: Option<u64>) -> anyhow::Result<()> {
    use linkarm_core::robot::Chain;

    let bin_name = env!("CARGO_BIN_NAME").to_string();

    log::info!("Starting {}", bin_name);

    let chain = Chain::try_from(&config.chain)?;
    log::debug!("Configured: {:?}", chain);

    let program = match &config.program {
        Some(path) => {
            let program = program::Program::load(path)
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
            log::info!("Loaded {} setpoints from {}", program.len(), path.display());
            program
        }
        None => program::Program::default(),
    };

    let viewport = viewport::Viewport::from(&config.viewport);
    if chain.root().start() != viewport.centre() {
        log::debug!("Chain anchor is off the viewport centre");
    }

    let mut driver = driver::Driver::new(chain, program, viewport);

    let mut interval = tokio::time::interval(config.tick_interval());

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if driver.is_exhausted(ticks) {
                    break;
                }

                let running = driver.is_running();

                let frame = driver.tick();
                driver.report(&frame);

                if running && !driver.is_running() {
                    log::info!("Program completed");
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Termination requested");
                break;
            }
        }
    }

    log::debug!("Final pose: {}", driver.chain());

    Ok(())
}
