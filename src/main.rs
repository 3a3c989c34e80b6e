use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

#[tokio::main]
async fn main() -> ::anyhow::Result<()> {
    // This will load the environment variables located at `./.env`, relative to
    // the CWD. See `./.env.example` for an example on how to structure this.
    // Deployments may also supply the variables directly, so a missing file is
    // not an error.
    dotenvy::dotenv().ok();

    let stdout = tracing_subscriber::fmt::Layer::default();

    let subscriber = registry::Registry::default() // provide underlying span data store
        .with(tracing_subscriber::EnvFilter::from_default_env()) // filter spans based on env var
        .with(stdout); // log to stdout

    tracing::subscriber::set_global_default(subscriber).expect("setting global default failed");

    let config = guild_gate::config::Config::from_env()?;
    let _rocket = guild_gate::rocket::launch(config).launch().await?;

    Ok(())
}
