//! Client configuration loading.
//!
//! Layers, later wins:
//! 1. `ClientConfig::default()`
//! 2. build-time environment: `CHAT_API_URL`, `CHAT_WS_URL`, `CHAT_API_PREFIX`,
//!    `CHAT_TRANSPORT`
//! 3. page query string: `?transport=http|socket&api=…&ws=…&prefix=…`
//!
//! An empty `prefix` selects the bare `/chat` and `/feedback` endpoints.

use web_sys::UrlSearchParams;

use chat_types::{
    ChatError, Result,
    config::{ClientConfig, TransportKind},
};

/// Build the effective configuration for this page load.
pub fn load_config() -> Result<ClientConfig> {
    let mut config = ClientConfig::default();

    apply_override(&mut config, "api", option_env!("CHAT_API_URL"))?;
    apply_override(&mut config, "ws", option_env!("CHAT_WS_URL"))?;
    apply_override(&mut config, "prefix", option_env!("CHAT_API_PREFIX"))?;
    apply_override(&mut config, "transport", option_env!("CHAT_TRANSPORT"))?;

    for (key, value) in query_pairs() {
        apply_override(&mut config, &key, Some(&value))?;
    }

    config.validate()?;
    log::info!(
        "Config: transport={} api={} ws={}",
        config.transport.label(),
        config.api_base_url,
        config.ws_url
    );
    Ok(config)
}

/// Apply one `key=value` override. Unknown keys and missing values are
/// ignored; empty values are ignored for every key except `prefix`.
pub fn apply_override(config: &mut ClientConfig, key: &str, value: Option<&str>) -> Result<()> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() || key == "prefix" => v,
        _ => return Ok(()),
    };

    match key {
        "api" => config.api_base_url = value.to_string(),
        "ws" => config.ws_url = value.to_string(),
        "prefix" => config.api_prefix = value.to_string(),
        "transport" => {
            config.transport = TransportKind::parse(value)
                .ok_or_else(|| ChatError::Config(format!("unknown transport: {}", value)))?;
        }
        _ => {}
    }
    Ok(())
}

fn query_pairs() -> Vec<(String, String)> {
    let search = match gloo_utils::window().location().search() {
        Ok(s) => s,
        Err(e) => {
            log::warn!("Could not read the query string: {:?}", e);
            return Vec::new();
        }
    };
    let params = match UrlSearchParams::new_with_str(&search) {
        Ok(p) => p,
        Err(_) => return Vec::new(),
    };

    ["api", "ws", "prefix", "transport"]
        .iter()
        .filter_map(|key| params.get(key).map(|v| (key.to_string(), v)))
        .collect()
}
