use potvrzenka_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, template assets, routes)
    let (_state, router) = potvrzenka_api::setup::initialize_app(config.clone())?;

    // Start the server
    potvrzenka_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
