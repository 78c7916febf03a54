use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;

use alarm_panel::bus::Bus;
use alarm_panel::config;
use alarm_panel::discovery;
use alarm_panel::panel::Panel;
use alarm_panel::state_store::StateStore;

#[derive(Parser, Debug)]
#[command(about = "Home-alarm control panel service")]
struct Cli {
    #[arg(long, default_value = "/etc/alarm-panel/config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match config::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("fatal: failed to load {}: {err:#}", cli.config.display());
            std::process::exit(1);
        }
    };

    let _guard = init_logging(&config.registry.logging);
    info!(path = %cli.config.display(), "configuration loaded");

    let bus_config = config.bus.clone();
    let registry = Arc::new(RwLock::new(config.registry));
    let store = StateStore::new(registry.read().unwrap().state.path.clone());

    let (ingress_tx, ingress_rx) = mpsc::channel(256);
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let (actuator_tx, actuator_rx) = mpsc::channel(256);

    let forward_ingress = ingress_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = timer_rx.recv().await {
            if forward_ingress.send(event).await.is_err() {
                break;
            }
        }
    });

    let bus = Bus::connect(bus_config.clone());
    let discovery_client = bus.discovery_client();
    let actuators = bus.actuators();

    let panel = Panel::new(
        cli.config.clone(),
        registry.clone(),
        store,
        actuator_tx,
        timer_tx,
        ingress_rx,
    );

    if bus_config.ha_discovery {
        let snapshot = registry.read().unwrap().clone();
        discovery::publish_all(&discovery_client, &bus_config, &snapshot).await;
    }

    let shutdown_actuators = actuators.clone();
    let actuator_registry = registry.clone();
    tokio::spawn(async move {
        actuators.run(actuator_rx, actuator_registry).await;
    });

    let bus_registry = registry.clone();
    let bus_ingress = ingress_tx.clone();
    let bus_task = tokio::spawn(async move {
        bus.run(bus_registry, bus_ingress).await;
    });

    let panel_task = tokio::spawn(panel.run());

    tokio::select! {
        _ = panel_task => {}
        _ = bus_task => {}
        _ = tokio::signal::ctrl_c() => {
            info!("received shutdown signal");
        }
    }

    shutdown_actuators.publish_offline().await;
    info!("shutdown complete");
}

fn init_logging(logging: &config::LoggingConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(&logging.log_dir, "alarmd.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(logging.log_level.clone())),
        )
        .init();
    guard
}
