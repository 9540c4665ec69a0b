use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use eegs_cli::commands::{cut, denoise, epochs, intervals, noise, sync, util};
use eegs_cli::{Cli, Commands, Config};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Intervals { log, json }) => {
            let log = util::read_log(log)?;
            intervals::run(&mut stdout, &log, *json)?;
        }
        Some(Commands::Sync {
            log,
            device_start,
            device_duration,
            json,
        }) => {
            let log = util::read_log(log)?;
            sync::run(&mut stdout, &log, *device_start, *device_duration, *json)?;
        }
        Some(Commands::Denoise {
            signal,
            wavelet,
            level,
            threshold,
            adaptive,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let denoise_config = config.denoise_config(*wavelet, *level, *threshold, *adaptive);
            let channels = util::read_signal(signal)?;
            denoise::run(&mut stdout, &channels, &denoise_config)?;
        }
        Some(Commands::Cut {
            signal,
            sfreq,
            tmin,
            tmax,
        }) => {
            let channels = util::read_signal(signal)?;
            cut::run(&mut stdout, &channels, *sfreq, *tmin, *tmax)?;
        }
        Some(Commands::Noise {
            signal,
            sfreq,
            threshold_uv,
            min_duration,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let channels = util::read_signal(signal)?;
            noise::run(
                &mut stdout,
                &channels,
                *sfreq,
                threshold_uv.unwrap_or(config.noise_threshold_uv),
                min_duration.unwrap_or(config.noise_min_duration),
                *json,
            )?;
        }
        Some(Commands::Epochs {
            log,
            signal,
            sfreq,
            json,
        }) => {
            let log = util::read_log(log)?;
            let channels = util::read_signal(signal)?;
            epochs::run(&mut stdout, &log, &channels, *sfreq, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
