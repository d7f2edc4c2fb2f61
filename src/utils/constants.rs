/// URL base del backend REST
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:4000 (por defecto)
/// - Producción: via BACKEND_URL env var
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:4000",
};

/// URL del canal de notificaciones de progreso (WebSocket)
pub const WS_URL: &str = match option_env!("WS_URL") {
    Some(url) => url,
    None => "ws://localhost:4000/ws/colppy-progress",
};

/// Clave de localStorage con la empresa (tenant) activa
pub const STORAGE_KEY_EMPRESA: &str = "cajaDiaria_empresaId";

/// Empresa por defecto cuando no hay ninguna guardada
pub const DEFAULT_EMPRESA_ID: &str = "estudio-principal";
