use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub ws_url: String,
    pub environment: String,
    pub enable_logging: bool,
    /// Delay base de reconexión del canal de progreso (el intento N espera N × base)
    pub ws_reconnect_base_ms: u32,
    /// Tope de reintentos automáticos; agotados, hace falta un connect() manual
    pub ws_max_reconnect_attempts: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:4000".to_string(),
            ws_url: "ws://localhost:4000/ws/colppy-progress".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            ws_reconnect_base_ms: 3000,
            ws_max_reconnect_attempts: 5,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            backend_url: option_env!("BACKEND_URL")
                .unwrap_or("http://localhost:4000").to_string(),
            ws_url: option_env!("WS_URL")
                .unwrap_or("ws://localhost:4000/ws/colppy-progress").to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            ws_reconnect_base_ms: option_env!("WS_RECONNECT_BASE_MS")
                .unwrap_or("3000").parse().unwrap_or(3000),
            ws_max_reconnect_attempts: option_env!("WS_MAX_RECONNECT_ATTEMPTS")
                .unwrap_or("5").parse().unwrap_or(5),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
