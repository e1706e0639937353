use clap::Parser;
use energy_monitor::{app, ApiClient, Args};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the dashboard
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "energy_monitor=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    info!(api_url = %args.api_url, view = %args.view, "Starting energy-monitor");

    let client = ApiClient::new(&args.api_url)?;

    if args.once {
        print!("{}", app::render_once(&client, &args).await?);
        return Ok(());
    }

    app::run(client, args).await
}
