use std::{collections::HashMap, env, fs};

use serde::Deserialize;

/// Where the user-directory service lives. The pieces compose into the base
/// URL the resource client is pointed at; the collection path is appended by
/// the client itself.
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_protocol: String,
    pub api_host: String,
    pub api_port: u16,
    pub api_base_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_protocol: "http".into(),
            api_host: "127.0.0.1".into(),
            api_port: 8080,
            api_base_path: "/sgu-api".into(),
        }
    }
}

impl Settings {
    pub fn api_base_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.api_protocol, self.api_host, self.api_port, self.api_base_path
        )
    }
}

/// Defaults, overridden by `desktop.toml` in the working directory,
/// overridden in turn by environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("desktop.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_protocol") {
                settings.api_protocol = v.clone();
            }
            if let Some(v) = file_cfg.get("api_host") {
                settings.api_host = v.clone();
            }
            if let Some(v) = file_cfg.get("api_port") {
                if let Ok(parsed) = v.parse::<u16>() {
                    settings.api_port = parsed;
                }
            }
            if let Some(v) = file_cfg.get("api_base_path") {
                settings.api_base_path = v.clone();
            }
        }
    }

    if let Ok(v) = env::var("API_PROTOCOL") {
        settings.api_protocol = v;
    }

    if let Ok(v) = env::var("API_HOST") {
        settings.api_host = v;
    }
    if let Ok(v) = env::var("APP__API_HOST") {
        settings.api_host = v;
    }

    if let Ok(v) = env::var("API_PORT") {
        if let Ok(parsed) = v.parse::<u16>() {
            settings.api_port = parsed;
        }
    }

    if let Ok(v) = env::var("API_BASE_PATH") {
        settings.api_base_path = v;
    }
    if let Ok(v) = env::var("APP__API_BASE_PATH") {
        settings.api_base_path = v;
    }

    settings
}
