use std::path::Path;

use clap::ArgMatches;
use colored::*;
use tracing::{info, warn};

use crate::client::YouTrackClient;
use crate::config::{config_path, load_config, save_config_to, Config, TrackerSettings};
use crate::error::TrackerResult;
use crate::formatting::mask_secret;
use crate::models::CurrentUser;

pub async fn handle_auth(matches: &ArgMatches) -> TrackerResult<()> {
    if matches.get_flag("show") {
        let config = load_config();
        println!("Base URL:  {}", config.base_url.as_deref().unwrap_or("(not set)"));
        match config.api_token.as_deref() {
            Some(token) => println!("API token: {}", mask_secret(token)),
            None => println!("API token: (not set)"),
        }
        if let Some(timeout) = config.timeout_secs {
            println!("Timeout:   {}s", timeout);
        }
        return Ok(());
    }

    let mut config = load_config();
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = Some(base_url.clone());
    }
    if let Some(token) = matches.get_one::<String>("token") {
        config.api_token = Some(token.clone());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.timeout_secs = Some(*timeout);
    }

    let settings = TrackerSettings::resolve(&config, |_| None)?;
    let client = YouTrackClient::new(&settings)?;
    let path = config_path()?;

    let verification = client.fetch_current_user().await;
    let user = match save_if_verified(&config, &path, verification) {
        Ok(user) => user,
        Err(e) => {
            println!("❌ Failed to authenticate, configuration not saved");
            return Err(e);
        }
    };

    println!(
        "✅ Connected as: {} ({})",
        user.name.as_deref().unwrap_or(&user.login).green(),
        user.email.as_deref().unwrap_or("no email")
    );
    println!("Configuration saved to {}", path.display());
    Ok(())
}

/// Write `config` to `path` only when the token was accepted.
pub(crate) fn save_if_verified(
    config: &Config,
    path: &Path,
    verification: TrackerResult<CurrentUser>,
) -> TrackerResult<CurrentUser> {
    let user = verification.map_err(|e| {
        warn!(error = %e, "token verification failed");
        e
    })?;
    save_config_to(config, path)?;
    info!(path = %path.display(), login = %user.login, "configuration saved");
    Ok(user)
}
