use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub currency_code: String,
    pub currency_symbol: String,
    pub dark_mode: bool,
    pub display_name: String,
    pub avatar_skin: String,
    pub avatar_hair: String,
}

pub fn default_settings() -> AppSettings {
    AppSettings {
        currency_code: "EUR".to_string(),
        currency_symbol: "€".to_string(),
        dark_mode: true,
        display_name: "".to_string(),
        avatar_skin: "#F2C9A0".to_string(),
        avatar_hair: "#6B4A2F".to_string(),
    }
}

pub fn load_settings() -> AppSettings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item("settings") {
                if let Ok(settings) = serde_json::from_str::<AppSettings>(&raw) {
                    return settings;
                }
            }
        }
    }
    default_settings()
}

pub fn save_settings(settings: &AppSettings) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(settings) {
                let _ = storage.set_item("settings", &raw);
            }
        }
    }
}

pub fn currency_symbol_for(code: &str) -> &'static str {
    match code {
        "USD" => "$",
        "GBP" => "£",
        "JPY" => "¥",
        "MXN" => "$",
        _ => "€",
    }
}
