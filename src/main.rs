use anyhow::Result;
use smart_home_sim::{config, runner, simulation, telemetry};
use config::Config;
use simulation::Home;
use telemetry::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = Config::load()?;
    let home = Home::from_config(&cfg)?;

    info!(
        devices = cfg.devices.len(),
        tick_millis = cfg.sim.tick_millis,
        "starting smart home simulator"
    );

    runner::run(home, &cfg).await
}
