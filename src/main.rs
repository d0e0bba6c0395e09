extern crate court_reserve_lib;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use court_reserve_lib::config::ReserverConfig;
use court_reserve_lib::request::load_template;
use court_reserve_lib::{reserve, Client, CourtOutcome, RunPlan};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ReserverConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let user = config.reserve_info()?;
    info!("Reserve information: {:?}", user);
    let template = load_template(&config.template_file)?;

    let client = Client::new(&config.base_url, &user.studentNum)?;
    let client = client.released(config.release_hour).await;

    let now = chrono::Local::now().naive_local();
    let plan = RunPlan::new(
        now,
        config.release_hour,
        config.preset.policy(),
        config.grounds.clone(),
        config.preferred_start,
    )
    .with_template(template);

    let report = reserve::run(&client, &plan).await;
    for (ground, outcome) in &report.outcomes {
        match outcome {
            CourtOutcome::Reserved { window, .. } => {
                info!("{}: reserved {} - {}", ground.label(), window.start, window.end)
            }
            CourtOutcome::FullyBooked => info!("{}: fully booked", ground.label()),
            CourtOutcome::Failed(reason) => info!("{}: failed ({})", ground.label(), reason),
        }
    }

    Ok(())
}
