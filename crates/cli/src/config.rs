//! Configuration loading for `vrntctl`.

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::path::Path;
use vrnt_core::config::AppConfig;

/// Well-known hosting env names, lowest precedence first.
const ENV_ALIASES: [(&str, &str); 5] = [
    ("NEXT_PUBLIC_SUPABASE_URL", "store.url"),
    ("SUPABASE_URL", "store.url"),
    ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "store.key"),
    ("SUPABASE_ANON_KEY", "store.key"),
    ("SUPABASE_SERVICE_ROLE_KEY", "store.key"),
];

fn alias(var: &'static str, key: &'static str) -> Env {
    Env::raw().only(&[var]).map(move |_| key.into())
}

/// Build the provider stack: optional TOML file, hosting env names, then
/// `VRNT_`-prefixed variables (`VRNT_STORE__URL`, `VRNT_STORE__KEY`, ...).
pub fn figment(path: &Path) -> Figment {
    let mut figment = Figment::new();
    if path.exists() {
        tracing::debug!(config_path = %path.display(), "loading configuration from file");
        figment = figment.merge(Toml::file(path));
    }
    for (var, key) in ENV_ALIASES {
        figment = figment.merge(alias(var, key));
    }
    figment.merge(Env::prefixed("VRNT_").split("__"))
}

/// Load and validate configuration. A missing endpoint or key is fatal.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let config: AppConfig = figment(path)
        .extract()
        .context("failed to load configuration")?;
    config.validate().map_err(|e| {
        anyhow::anyhow!(
            "{e}\n\nProvide configuration via one of:\n  \
             1. Config file: vrntctl --config /path/to/vrnt.toml\n  \
             2. Environment variables: VRNT_STORE__URL=https://<project>.supabase.co \
             VRNT_STORE__KEY=<service-role-key>\n  \
             3. SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY"
        )
    })?;
    Ok(config)
}
