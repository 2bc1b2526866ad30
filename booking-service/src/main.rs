use booking_service::{config::EnvVars, schedule::run};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
    tracing::info!("Starting exam booking run...");

    let env_vars = match EnvVars::new() {
        Ok(env_vars) => env_vars,
        Err(e) => {
            tracing::error!("Invalid configuration: {e:?}");
            std::process::exit(1);
        }
    };

    match run(&env_vars) {
        Ok(report) => {
            println!("{report}");
            tracing::info!(
                booked = report.booked.len(),
                rejected = report.rejected.len(),
                "Finished booking schedule"
            );
        }
        Err(e) => {
            tracing::error!("Error booking schedule: {e:?}");
            std::process::exit(1);
        }
    }
}
