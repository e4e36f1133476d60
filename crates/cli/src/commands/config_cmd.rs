//! `tagging config` — Configuration management commands.

use tagging_config::{AppConfig, ENV_HOST, ENV_PORT, ENV_STORE_BACKEND};

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut notes = Vec::new();
            for var in [ENV_PORT, ENV_HOST, ENV_STORE_BACKEND] {
                if std::env::var_os(var).is_some() {
                    notes.push(format!("{var} is set and overrides the file"));
                }
            }
            if config.server.host == "0.0.0.0" {
                notes.push("Service binds all interfaces (0.0.0.0)".into());
            }

            for n in &notes {
                println!("   ℹ️  {n}");
            }

            println!();
            println!("   Listen:  {}", config.server.bind_addr());
            println!("   Store:   {}", config.store.backend);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
