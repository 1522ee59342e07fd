use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use miette::Result;
use std::path::PathBuf;
use std::time::Duration;
use tokio_graceful_shutdown::{SubsystemBuilder, SubsystemHandle, Toplevel};

use sweepradar_server::{web, AppState, ServerSettings, Simulation};

#[derive(Parser, Clone, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,

    /// Port for the HTTP API
    #[arg(short, long, default_value_t = 3002)]
    port: u16,

    /// JSON settings file; built-in defaults when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<f64>,

    /// Seed for target placement and spawning
    #[arg(long)]
    seed: Option<u64>,

    /// Only simulate the initial targets
    #[arg(long, default_value_t = false)]
    no_spawn: bool,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<ServerSettings> {
        let mut settings = match &self.config {
            Some(path) => ServerSettings::load(path)?,
            None => ServerSettings::default(),
        };
        if let Some(rate) = self.tick_rate {
            settings.simulation.tick_rate = rate;
        }
        if self.seed.is_some() {
            settings.simulation.seed = self.seed;
        }
        if self.no_spawn {
            settings.simulation.spawn_probability = 0.0;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let settings = args.settings().map_err(|e| miette::miette!("{:#}", e))?;
    let simulation = Simulation::new(&settings).map_err(|e| miette::miette!("{:#}", e))?;
    let state = AppState {
        blips: simulation.snapshot_handle(),
        sensor: simulation.config(),
    };
    let port = args.port;

    log::info!(
        "Simulating {} initial targets at {} ticks/s",
        settings.simulation.initial_targets.len(),
        settings.simulation.tick_rate
    );

    Toplevel::new(move |s| async move {
        s.start(SubsystemBuilder::new("simulation", move |a: SubsystemHandle| {
            simulation.run(a)
        }));
        s.start(SubsystemBuilder::new("webserver", move |a: SubsystemHandle| {
            web::serve(state, port, a)
        }));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(1000))
    .await
    .map_err(Into::into)
}
