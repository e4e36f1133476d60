//! `tagging serve` — Start the HTTP service.

use tagging_config::AppConfig;

pub async fn run(
    port_override: Option<u16>,
    host_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(host) = host_override {
        config.server.host = host;
    }
    config.validate()?;

    println!("🏷️  Tagging Microservice");
    println!("   Listening: http://{}", config.server.bind_addr());
    println!("   Store:     {}", config.store.backend);

    tagging_gateway::start(config).await?;

    Ok(())
}
