// ============================================================================
// MODELO DE EVENTOS DE PROGRESO COLPPY
// ============================================================================
// Forma de cable de las notificaciones que el job RPA externo empuja por el
// canal WebSocket, más los mensajes de control join/leave por empresa.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Etapa del ciclo de vida del job rastreado
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressEventType {
    Start,
    /// La forma envuelta puede omitir la etapa; se asume progreso
    #[default]
    Progress,
    Complete,
    Error,
}

/// Categoría de sincronización a la que pertenece un evento
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncScope {
    Clientes,
    Proveedores,
    Pagos,
    Facturas,
    Movimientos,
    Todos,
}

impl SyncScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncScope::Clientes => "clientes",
            SyncScope::Proveedores => "proveedores",
            SyncScope::Pagos => "pagos",
            SyncScope::Facturas => "facturas",
            SyncScope::Movimientos => "movimientos",
            SyncScope::Todos => "todos",
        }
    }

    /// Un evento `todos` atraviesa cualquier filtro de scope
    pub fn pasa_filtro(&self, filtro: SyncScope) -> bool {
        *self == filtro || *self == SyncScope::Todos
    }
}

/// Notificación de progreso de un job RPA (inmutable, una por mensaje).
/// `timestamp` lo fija el productor y solo se usa para mostrar; no hay
/// garantía de entrega ni de orden a través de reconexiones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    #[serde(rename = "type", default)]
    pub tipo: ProgressEventType,
    pub scope: SyncScope,
    #[serde(default)]
    pub tenant_id: String,
    pub current: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

impl ProgressEvent {
    /// Porcentaje redondeado. `total == 0` es un caso degenerado del
    /// productor: se muestra 0 en lugar de dividir por cero.
    pub fn porcentaje(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.current as f64 / self.total as f64) * 100.0).round() as u32
    }

    pub fn es_terminal(&self) -> bool {
        matches!(self.tipo, ProgressEventType::Complete | ProgressEventType::Error)
    }

    /// Decodifica un mensaje entrante del canal. Se aceptan dos formas:
    /// 1. Envuelta: tag `"type": "colppy-progress"`, con el evento anidado
    ///    en `data` o con sus campos al tope (etapa default: progress).
    /// 2. Plana: objeto con `scope` y `current` presentes.
    /// Cualquier otro mensaje se loguea y se descarta sin error.
    pub fn from_ws_text(raw: &str) -> Option<ProgressEvent> {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("📨 Mensaje no-JSON descartado: {}", e);
                return None;
            }
        };

        let obj = match value.as_object() {
            Some(obj) => obj,
            None => {
                log::warn!("📨 Mensaje sin objeto raíz descartado");
                return None;
            }
        };

        // Forma envuelta
        if obj.get("type").and_then(|t| t.as_str()) == Some("colppy-progress") {
            let payload = match obj.get("data") {
                Some(data @ serde_json::Value::Object(_)) => data.clone(),
                _ => {
                    // El tag del sobre no es la etapa del evento
                    let mut plano = obj.clone();
                    plano.remove("type");
                    serde_json::Value::Object(plano)
                }
            };
            return match serde_json::from_value(payload) {
                Ok(evento) => Some(evento),
                Err(e) => {
                    log::warn!("📨 Evento colppy-progress malformado: {}", e);
                    None
                }
            };
        }

        // Forma plana: requiere scope y current definidos
        let tiene_current = obj.get("current").map_or(false, |c| !c.is_null());
        if obj.contains_key("scope") && tiene_current {
            return match serde_json::from_value(value.clone()) {
                Ok(evento) => Some(evento),
                Err(e) => {
                    log::warn!("📨 Evento de progreso malformado: {}", e);
                    None
                }
            };
        }

        log::debug!("📨 Mensaje ignorado (no es un evento de progreso)");
        None
    }
}

/// Mensaje de control saliente hacia el canal de notificaciones
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlMessage {
    JoinTenant {
        #[serde(rename = "tenantId")]
        tenant_id: String,
    },
    LeaveTenant {
        #[serde(rename = "tenantId")]
        tenant_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodifica_forma_envuelta_plana() {
        let raw = r#"{"type":"colppy-progress","scope":"clientes","tenantId":"T1","current":3,"total":10,"message":"Procesando cliente 3","timestamp":"2024-06-01T10:00:00Z"}"#;
        let evento = ProgressEvent::from_ws_text(raw).unwrap();
        assert_eq!(evento.tipo, ProgressEventType::Progress);
        assert_eq!(evento.scope, SyncScope::Clientes);
        assert_eq!(evento.tenant_id, "T1");
        assert_eq!(evento.current, 3);
        assert_eq!(evento.total, 10);
    }

    #[test]
    fn decodifica_forma_envuelta_anidada() {
        let raw = r#"{"type":"colppy-progress","data":{"type":"complete","scope":"facturas","tenantId":"T1","current":10,"total":10,"message":"Listo"}}"#;
        let evento = ProgressEvent::from_ws_text(raw).unwrap();
        assert_eq!(evento.tipo, ProgressEventType::Complete);
        assert_eq!(evento.scope, SyncScope::Facturas);
        assert!(evento.es_terminal());
    }

    #[test]
    fn decodifica_forma_plana_sin_envoltura() {
        let raw = r#"{"type":"error","scope":"pagos","current":4,"total":9,"message":"Fallo el portal"}"#;
        let evento = ProgressEvent::from_ws_text(raw).unwrap();
        assert_eq!(evento.tipo, ProgressEventType::Error);
        assert_eq!(evento.scope, SyncScope::Pagos);
    }

    #[test]
    fn descarta_mensajes_que_no_son_progreso() {
        assert!(ProgressEvent::from_ws_text("no es json").is_none());
        assert!(ProgressEvent::from_ws_text("[1,2,3]").is_none());
        assert!(ProgressEvent::from_ws_text(r#"{"type":"ping"}"#).is_none());
        // scope sin current definido no alcanza
        assert!(ProgressEvent::from_ws_text(r#"{"scope":"clientes","current":null}"#).is_none());
        assert!(ProgressEvent::from_ws_text(r#"{"scope":"clientes"}"#).is_none());
    }

    #[test]
    fn porcentaje_redondeado() {
        let evento = ProgressEvent::from_ws_text(
            r#"{"scope":"clientes","current":30,"total":120}"#,
        )
        .unwrap();
        assert_eq!(evento.porcentaje(), 25);
    }

    #[test]
    fn porcentaje_con_total_cero_no_divide() {
        let evento = ProgressEvent::from_ws_text(
            r#"{"scope":"clientes","current":7,"total":0}"#,
        )
        .unwrap();
        assert_eq!(evento.porcentaje(), 0);
    }

    #[test]
    fn todos_pasa_cualquier_filtro() {
        assert!(SyncScope::Todos.pasa_filtro(SyncScope::Clientes));
        assert!(SyncScope::Clientes.pasa_filtro(SyncScope::Clientes));
        assert!(!SyncScope::Proveedores.pasa_filtro(SyncScope::Clientes));
    }

    #[test]
    fn mensajes_de_control_serializados() {
        let join = ControlMessage::JoinTenant { tenant_id: "T1".to_string() };
        assert_eq!(
            serde_json::to_string(&join).unwrap(),
            r#"{"type":"join-tenant","tenantId":"T1"}"#
        );
        let leave = ControlMessage::LeaveTenant { tenant_id: "T1".to_string() };
        assert_eq!(
            serde_json::to_string(&leave).unwrap(),
            r#"{"type":"leave-tenant","tenantId":"T1"}"#
        );
    }
}
