use octopus_meter_client::config::Config;
use octopus_meter_client::OctopusClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Looks up the configured meter point and account and prints them.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if both lookups succeed, or the first error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "octopus_meter_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let client = OctopusClient::with_reqwest(config.api_key.clone(), config.base_url.clone())?;
    tracing::info!("Octopus client initialized: {}", config.base_url);

    let meter_point = client
        .electricity_meter_point(&config.electricity_mpan)
        .await?;

    println!("GSP is {}", meter_point.gsp);
    println!("MPAN is {}", meter_point.mpan);
    println!("ProfileClass is {}", meter_point.profile_class);

    let account = client.account(&config.account_number).await?;

    println!("{}", serde_json::to_string_pretty(&account)?);

    Ok(())
}
