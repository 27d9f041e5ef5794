//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::adapters::clock::SimulationClock;
use crate::adapters::console_adapter::ConsoleReporter;
use crate::adapters::csv_export::CsvExporter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::bot_config::{BotConfig, SimulationParams};
use crate::domain::config_validation::{load_bot_config, load_simulation_params};
use crate::domain::error::TickbotError;
use crate::domain::simulation::SimulationState;
use crate::ports::config_port::ConfigPort;
use crate::ports::snapshot_port::SnapshotPort;

#[derive(Parser, Debug)]
#[command(name = "tickbot", about = "Simulated paper-trading bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the bot on a live clock until Ctrl-C or the tick limit
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticks: Option<u64>,
        /// Directory for prices.csv and trades.csv
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print every tick, not just trades
        #[arg(short, long)]
        verbose: bool,
    },
    /// Run a fixed number of ticks without waiting between them
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticks: u64,
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(short, long)]
        verbose: bool,
    },
    /// Validate a bot configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Run options shared by `run` and `simulate`.
struct RunOptions {
    ticks: Option<u64>,
    csv: Option<PathBuf>,
    verbose: bool,
    paced: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    init_tracing();
    match cli.command {
        Command::Run {
            config,
            ticks,
            csv,
            verbose,
        } => run_bot(
            &config,
            RunOptions {
                ticks,
                csv,
                verbose,
                paced: true,
            },
        ),
        Command::Simulate {
            config,
            ticks,
            csv,
            verbose,
        } => run_bot(
            &config,
            RunOptions {
                ticks: Some(ticks),
                csv,
                verbose,
                paced: false,
            },
        ),
        Command::Validate { config } => run_validate(&config),
    }
}

/// `RUST_LOG` overrides the default `info` level. Logs go to stderr.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

pub fn load_settings(
    adapter: &dyn ConfigPort,
) -> Result<(BotConfig, SimulationParams), TickbotError> {
    let bot = load_bot_config(adapter)?;
    let params = load_simulation_params(adapter)?;
    Ok((bot, params))
}

fn load_and_validate(path: &Path) -> Result<(BotConfig, SimulationParams), ExitCode> {
    eprintln!("Loading config from {}", path.display());
    let adapter = load_config(path)?;
    load_settings(&adapter).map_err(|e| {
        eprintln!("error: {e} (from {})", adapter.source());
        ExitCode::from(&e)
    })
}

fn run_bot(config_path: &Path, options: RunOptions) -> ExitCode {
    let (bot, params) = match load_and_validate(config_path) {
        Ok(settings) => settings,
        Err(code) => return code,
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(drive(bot, params, options)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

async fn drive(
    bot: BotConfig,
    params: SimulationParams,
    options: RunOptions,
) -> Result<SimulationState, TickbotError> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let state = SimulationState::bootstrap(&params, Utc::now().timestamp_millis(), &mut rng);
    info!(
        symbol = %bot.symbol,
        strategy = %bot.strategy,
        enabled = bot.enabled,
        samples = state.series().len(),
        "price series bootstrapped"
    );
    if !bot.enabled {
        info!("bot is disabled; prices will update but no trades are evaluated");
    }

    let (_config_tx, config_rx) = watch::channel(bot);
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, stopping clock");
            interrupt.cancel();
        }
    });

    let mut sinks: Vec<Box<dyn SnapshotPort + Send>> = vec![Box::new(ConsoleReporter::new(
        std::io::stdout(),
        options.verbose,
    ))];
    if let Some(dir) = options.csv {
        sinks.push(Box::new(CsvExporter::new(dir)));
    }

    let mut clock =
        SimulationClock::new(params, config_rx, cancel.clone()).with_tick_limit(options.ticks);
    if !options.paced {
        clock = clock.unpaced();
    }
    let result = clock.run(state, &mut rng, &mut sinks).await;
    cancel.cancel();
    result
}

pub fn run_validate(config_path: &Path) -> ExitCode {
    let (bot, params) = match load_and_validate(config_path) {
        Ok(settings) => settings,
        Err(code) => return code,
    };

    eprintln!("Config validated successfully");
    eprintln!("\nBot:");
    eprintln!("  symbol:   {}", bot.symbol);
    eprintln!("  strategy: {}", bot.strategy);
    eprintln!("  enabled:  {}", bot.enabled);
    eprintln!("  capital:  {:.2}", bot.capital);
    eprintln!(
        "  risk:     {}% ({:.2} per trade)",
        bot.risk_per_trade_pct,
        bot.trade_budget()
    );
    eprintln!("\nIndicators:");
    for indicator in params.indicators.indicators() {
        eprintln!("  {}", indicator);
    }
    eprintln!(
        "  RSI thresholds: {} / {}",
        params.indicators.rsi_oversold, params.indicators.rsi_overbought
    );
    eprintln!("\nSimulation:");
    eprintln!("  base price:    {:.2}", params.base_price);
    match params.seed {
        Some(seed) => eprintln!("  seed:          {seed}"),
        None => eprintln!("  seed:          random"),
    }
    eprintln!("  tick interval: {} ms", params.tick_interval_ms);
    eprintln!("  signal policy: {:?}", params.signal_policy);
    ExitCode::SUCCESS
}
