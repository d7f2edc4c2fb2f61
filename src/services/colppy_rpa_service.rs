// ============================================================================
// COLPPY RPA SERVICE - Canal de notificaciones de progreso
// ============================================================================
// Mantiene a lo sumo UNA conexión WebSocket por pestaña contra el endpoint
// de progreso, hace el handshake join-tenant con la empresa activa y reparte
// cada evento recibido a todos los listeners registrados.
// Reconexión con backoff lineal ante cierres anormales, con tope de intentos.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use crate::config::CONFIG;
use crate::models::progress::{ControlMessage, ProgressEvent};
use crate::utils::storage;

/// Código de cierre normal (RFC 6455); no dispara reconexión
const CLOSE_NORMAL: u16 = 1000;

/// Fase de la conexión, como máquina de estados explícita
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionPhase {
    Disconnected,
    Connecting,
    Connected,
    /// Esperando el intento N de reconexión
    Reconnecting(u32),
}

/// Decide la fase siguiente tras un cierre del socket y, si corresponde
/// programar un reintento, el delay en ms. Backoff lineal: el intento N
/// espera N × base. Superado el tope, queda Disconnected y hace falta un
/// connect() manual para retomar.
fn fase_tras_cierre(
    code: u16,
    intentos_previos: u32,
    max_intentos: u32,
    base_ms: u32,
) -> (ConnectionPhase, Option<u32>) {
    if code == CLOSE_NORMAL {
        return (ConnectionPhase::Disconnected, None);
    }
    let intento = intentos_previos + 1;
    if intento > max_intentos {
        (ConnectionPhase::Disconnected, None)
    } else {
        (ConnectionPhase::Reconnecting(intento), Some(intento * base_ms))
    }
}

type ProgressCallback = Rc<dyn Fn(&ProgressEvent)>;

/// Registro de listeners con ids estables. El despacho itera sobre una
/// copia, así un listener puede darse de baja durante su propia llamada.
#[derive(Default)]
struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, ProgressCallback)>,
}

impl ListenerRegistry {
    fn add(&mut self, callback: ProgressCallback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, callback));
        id
    }

    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    fn snapshot(&self) -> Vec<ProgressCallback> {
        self.listeners.iter().map(|(_, cb)| cb.clone()).collect()
    }
}

struct Inner {
    socket: Option<WebSocket>,
    /// Empresa con la que se hizo join (se reutiliza para el leave)
    tenant_id: Option<String>,
    phase: ConnectionPhase,
    reconnect_attempts: u32,
    reconnect_timer: Option<Timeout>,
    registry: ListenerRegistry,
}

/// Cliente del canal de progreso. Singleton por pestaña: los widgets lo
/// comparten via global(); la instancia suelta existe para tests.
#[derive(Clone)]
pub struct ColppyRpaService {
    inner: Rc<RefCell<Inner>>,
}

thread_local! {
    static SERVICE: ColppyRpaService = ColppyRpaService::new();
}

impl ColppyRpaService {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                socket: None,
                tenant_id: None,
                phase: ConnectionPhase::Disconnected,
                reconnect_attempts: 0,
                reconnect_timer: None,
                registry: ListenerRegistry::default(),
            })),
        }
    }

    /// Instancia compartida de la pestaña
    pub fn global() -> ColppyRpaService {
        SERVICE.with(|s| s.clone())
    }

    /// Abre la conexión si no hay una activa. Idempotente: con un socket
    /// abierto o conectando no hace nada. Los errores de conexión no se
    /// propagan al llamador; se loguean y disparan la política de reconexión
    /// via los handlers del socket.
    pub fn connect(&self) {
        {
            let inner = self.inner.borrow();
            if let Some(socket) = &inner.socket {
                match socket.ready_state() {
                    WebSocket::CONNECTING | WebSocket::OPEN => {
                        log::info!("🔌 Canal de progreso ya activo, connect() ignorado");
                        return;
                    }
                    _ => {}
                }
            }
        }

        let tenant = storage::empresa_id();
        log::info!("🔌 Abriendo canal de progreso: {} (empresa {})", CONFIG.ws_url, tenant);

        let socket = match WebSocket::new(&CONFIG.ws_url) {
            Ok(ws) => ws,
            Err(e) => {
                log::error!("❌ No se pudo crear el WebSocket de progreso: {:?}", e);
                return;
            }
        };

        self.attach_handlers(&socket, &tenant);

        let mut inner = self.inner.borrow_mut();
        inner.socket = Some(socket);
        inner.tenant_id = Some(tenant);
        inner.phase = ConnectionPhase::Connecting;
    }

    /// Cierra la conexión con código normal (sin reconexión automática),
    /// avisando leave-tenant si el socket estaba abierto. Idempotente.
    pub fn disconnect(&self) {
        let (socket, tenant) = {
            let mut inner = self.inner.borrow_mut();
            inner.phase = ConnectionPhase::Disconnected;
            inner.reconnect_attempts = 0;
            // Un reintento programado no debe revivir la conexión
            inner.reconnect_timer = None;
            (inner.socket.take(), inner.tenant_id.take())
        };

        let socket = match socket {
            Some(s) => s,
            None => return,
        };

        if socket.ready_state() == WebSocket::OPEN {
            if let Some(tenant_id) = tenant {
                let leave = ControlMessage::LeaveTenant { tenant_id };
                match serde_json::to_string(&leave) {
                    Ok(json) => {
                        if socket.send_with_str(&json).is_err() {
                            log::warn!("⚠️ No se pudo enviar leave-tenant");
                        }
                    }
                    Err(e) => log::error!("❌ Error serializando leave-tenant: {}", e),
                }
            }
        }

        if socket.close_with_code(CLOSE_NORMAL).is_err() {
            log::warn!("⚠️ Error cerrando el canal de progreso");
        }
        log::info!("🔌 Canal de progreso cerrado");
    }

    /// Registra un listener de eventos y devuelve su función de baja.
    /// Puede haber varios listeners a la vez (widgets con distintos scopes).
    pub fn on_progress<F>(&self, callback: F) -> impl FnOnce()
    where
        F: Fn(&ProgressEvent) + 'static,
    {
        let id = self.inner.borrow_mut().registry.add(Rc::new(callback));
        let inner = self.inner.clone();
        move || {
            inner.borrow_mut().registry.remove(id);
        }
    }

    /// Lectura en vivo del estado del transporte (no cacheada)
    pub fn connected(&self) -> bool {
        self.inner
            .borrow()
            .socket
            .as_ref()
            .map(|s| s.ready_state() == WebSocket::OPEN)
            .unwrap_or(false)
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.inner.borrow().phase
    }

    /// Reparte un evento a todos los listeners registrados, sobre una copia
    /// del registro (la baja de un listener en medio del despacho no afecta
    /// la entrega en curso a los demás).
    fn deliver(&self, evento: &ProgressEvent) {
        let snapshot = self.inner.borrow().registry.snapshot();
        for callback in snapshot {
            callback(evento);
        }
    }

    fn attach_handlers(&self, socket: &WebSocket, tenant: &str) {
        // onopen: handshake join-tenant y reset del contador de reintentos
        let on_open = {
            let inner = self.inner.clone();
            let socket = socket.clone();
            let tenant = tenant.to_string();
            Closure::wrap(Box::new(move |_: Event| {
                {
                    let mut st = inner.borrow_mut();
                    st.phase = ConnectionPhase::Connected;
                    st.reconnect_attempts = 0;
                }
                let join = ControlMessage::JoinTenant { tenant_id: tenant.clone() };
                match serde_json::to_string(&join) {
                    Ok(json) => {
                        if socket.send_with_str(&json).is_err() {
                            log::error!("❌ No se pudo enviar join-tenant");
                        } else {
                            log::info!("🔗 Canal abierto, suscripto a empresa {}", tenant);
                        }
                    }
                    Err(e) => log::error!("❌ Error serializando join-tenant: {}", e),
                }
            }) as Box<dyn FnMut(Event)>)
        };
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        // onmessage: decodificar y repartir
        let on_message = {
            let service = self.clone();
            Closure::wrap(Box::new(move |e: MessageEvent| {
                let texto = match e.data().as_string() {
                    Some(t) => t,
                    None => {
                        log::warn!("📨 Mensaje no textual ignorado");
                        return;
                    }
                };
                if let Some(evento) = ProgressEvent::from_ws_text(&texto) {
                    log::debug!(
                        "📨 Progreso {} {}/{}: {}",
                        evento.scope.as_str(),
                        evento.current,
                        evento.total,
                        evento.message
                    );
                    service.deliver(&evento);
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        // onerror: solo diagnóstico; el cierre posterior decide la reconexión
        let on_error = Closure::wrap(Box::new(move |e: ErrorEvent| {
            log::error!("❌ Error en el canal de progreso: {}", e.message());
        }) as Box<dyn FnMut(ErrorEvent)>);
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        // onclose: máquina de estados de reconexión
        let on_close = {
            let inner = self.inner.clone();
            Closure::wrap(Box::new(move |e: CloseEvent| {
                let code = e.code();
                let (fase, delay) = {
                    let mut st = inner.borrow_mut();
                    st.socket = None;
                    let (fase, delay) = fase_tras_cierre(
                        code,
                        st.reconnect_attempts,
                        CONFIG.ws_max_reconnect_attempts,
                        CONFIG.ws_reconnect_base_ms,
                    );
                    if let ConnectionPhase::Reconnecting(n) = fase {
                        st.reconnect_attempts = n;
                    }
                    st.phase = fase;
                    (fase, delay)
                };

                match (fase, delay) {
                    (ConnectionPhase::Reconnecting(intento), Some(delay_ms)) => {
                        log::warn!(
                            "⚠️ Cierre anormal (code {}), reintento {} en {} ms",
                            code,
                            intento,
                            delay_ms
                        );
                        let service = ColppyRpaService { inner: inner.clone() };
                        let timer = Timeout::new(delay_ms, move || {
                            service.inner.borrow_mut().reconnect_timer = None;
                            service.connect();
                        });
                        inner.borrow_mut().reconnect_timer = Some(timer);
                    }
                    _ if code == CLOSE_NORMAL => {
                        log::info!("🔌 Cierre normal del canal (code {})", code);
                    }
                    _ => {
                        log::warn!(
                            "🛑 Reintentos agotados tras cierre anormal (code {}); \
                             hace falta connect() manual",
                            code
                        );
                    }
                }
            }) as Box<dyn FnMut(CloseEvent)>)
        };
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        // Nota: en Rust WASM, forget() es necesario para mantener los closures
        // vivos mientras viva el socket. Se crean una vez por conexión.
        on_open.forget();
        on_message.forget();
        on_error.forget();
        on_close.forget();
    }
}

impl Default for ColppyRpaService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::{ProgressEventType, SyncScope};
    use std::cell::Cell;

    fn evento(current: u32) -> ProgressEvent {
        ProgressEvent {
            tipo: ProgressEventType::Progress,
            scope: SyncScope::Clientes,
            tenant_id: "T1".to_string(),
            current,
            total: 10,
            message: format!("Procesando cliente {}", current),
            timestamp: String::new(),
        }
    }

    #[test]
    fn backoff_lineal_y_tope() {
        let base = 3000;
        let max = 5;
        // Los primeros cinco cierres anormales programan N × base
        for intentos_previos in 0..max {
            let (fase, delay) = fase_tras_cierre(1006, intentos_previos, max, base);
            let n = intentos_previos + 1;
            assert_eq!(fase, ConnectionPhase::Reconnecting(n));
            assert_eq!(delay, Some(n * base));
        }
        // El sexto no programa nada
        let (fase, delay) = fase_tras_cierre(1006, max, max, base);
        assert_eq!(fase, ConnectionPhase::Disconnected);
        assert_eq!(delay, None);
    }

    #[test]
    fn cierre_normal_no_reintenta() {
        let (fase, delay) = fase_tras_cierre(CLOSE_NORMAL, 0, 5, 3000);
        assert_eq!(fase, ConnectionPhase::Disconnected);
        assert_eq!(delay, None);
    }

    #[test]
    fn despacho_a_todos_los_listeners() {
        let service = ColppyRpaService::new();
        let contador_a = Rc::new(Cell::new(0));
        let contador_b = Rc::new(Cell::new(0));

        let a = contador_a.clone();
        let _baja_a = service.on_progress(move |_| a.set(a.get() + 1));
        let b = contador_b.clone();
        let _baja_b = service.on_progress(move |_| b.set(b.get() + 1));

        service.deliver(&evento(1));
        service.deliver(&evento(2));

        assert_eq!(contador_a.get(), 2);
        assert_eq!(contador_b.get(), 2);
    }

    #[test]
    fn baja_corta_la_entrega_posterior() {
        let service = ColppyRpaService::new();
        let contador = Rc::new(Cell::new(0));

        let c = contador.clone();
        let baja = service.on_progress(move |_| c.set(c.get() + 1));

        service.deliver(&evento(1));
        baja();
        service.deliver(&evento(2));

        assert_eq!(contador.get(), 1);
    }

    #[test]
    fn auto_baja_durante_el_despacho_no_afecta_al_resto() {
        let service = ColppyRpaService::new();
        let contador_resto = Rc::new(Cell::new(0));

        // Listener que se da de baja en su propia primera llamada
        let baja_propia: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
            Rc::new(RefCell::new(None));
        let contador_suicida = Rc::new(Cell::new(0));
        {
            let baja_en_callback = baja_propia.clone();
            let contador_suicida = contador_suicida.clone();
            let baja = service.on_progress(move |_| {
                contador_suicida.set(contador_suicida.get() + 1);
                if let Some(baja) = baja_en_callback.borrow_mut().take() {
                    baja();
                }
            });
            *baja_propia.borrow_mut() = Some(Box::new(baja));
        }

        let r = contador_resto.clone();
        let _baja_resto = service.on_progress(move |_| r.set(r.get() + 1));

        service.deliver(&evento(1));
        service.deliver(&evento(2));

        // El suicida recibió solo el primero; el resto recibió ambos
        assert_eq!(contador_suicida.get(), 1);
        assert_eq!(contador_resto.get(), 2);
    }
}
