use anyhow::Result;
use std::sync::Arc;

use matwork::api::ApiClient;
use matwork::config::Config;
use matwork::store::TechniqueStore;
use matwork::{logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let first = args.next();

    if first.as_deref() == Some("--generate-config") {
        let path = Config::get_default_config_path()?;
        Config::generate_default_config(&path)?;
        return Ok(());
    }

    let config = Config::load()?;
    logger::init(&config.logging)?;

    if config.server.cookie.is_empty() {
        eprintln!("No session cookie configured.");
        eprintln!();
        eprintln!("Add your browser session to the config file:");
        eprintln!("  [server]");
        eprintln!("  base_url = \"https://media.example.org\"");
        eprintln!("  cookie = \"sessionid=...; csrftoken=...\"");
        eprintln!();
        eprintln!("Run `matwork --generate-config` to create a starter file.");
        return Ok(());
    }

    // Optional positional argument: the media item to file under a technique
    let media_token = first;

    let backend = Arc::new(ApiClient::new(&config.server.base_url, &config.server.cookie));
    let (store, store_events) = TechniqueStore::new(backend);

    ui::run_app(&config, store, store_events, media_token).await?;

    Ok(())
}
