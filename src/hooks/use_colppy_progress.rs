// ============================================================================
// USE COLPPY PROGRESS HOOK - Adaptador reactivo del canal de progreso
// ============================================================================
// Puentea el modelo de callbacks del ColppyRpaService a estado Yew:
// último evento recibido + estado de conexión. La apertura/cierre del socket
// no emite ProgressEvent, por eso se sondea `connected` cada segundo.
// ============================================================================

use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::models::progress::ProgressEvent;
use crate::services::ColppyRpaService;

/// Intervalo de sondeo del estado de conexión
const CONNECTION_POLL_MS: u32 = 1000;

/// Evento entregado al hook, numerado por orden de llegada. El `seq` hace
/// que dos eventos con payload idéntico sigan siendo estados distintos:
/// ninguna entrega se coalesce.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressUpdate {
    pub seq: u64,
    pub evento: ProgressEvent,
}

/// Suscripción viva de un componente montado: baja del listener + sondeo
struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
    poll: Option<Interval>,
}

impl Subscription {
    fn cancelar(&mut self) {
        if let Some(baja) = self.unsubscribe.take() {
            baja();
        }
        // Drop del Interval cancela el sondeo
        self.poll = None;
    }
}

#[derive(Clone)]
pub struct UseColppyProgressHandle {
    /// Última entrega recibida (None hasta la primera)
    pub progress: UseStateHandle<Option<ProgressUpdate>>,
    pub is_connected: UseStateHandle<bool>,
    pub connect: Callback<()>,
    pub disconnect: Callback<()>,
}

#[hook]
pub fn use_colppy_progress() -> UseColppyProgressHandle {
    let progress = use_state(|| None::<ProgressUpdate>);
    let is_connected = use_state(|| false);
    let subscription = use_mut_ref(|| Subscription {
        unsubscribe: None,
        poll: None,
    });
    let seq = use_mut_ref(|| 0u64);

    let connect = {
        let progress = progress.clone();
        let is_connected = is_connected.clone();
        let subscription = subscription.clone();
        let seq = seq.clone();

        Callback::from(move |_| {
            let mut sub = subscription.borrow_mut();
            if sub.unsubscribe.is_some() {
                log::info!("🔁 Hook ya suscripto al canal, connect ignorado");
                return;
            }

            let service = ColppyRpaService::global();
            service.connect();
            is_connected.set(service.connected());

            // Cada evento actualiza el último recibido y refleja `connected`
            let unsubscribe = {
                let progress = progress.clone();
                let is_connected = is_connected.clone();
                let service = service.clone();
                let seq = seq.clone();
                ColppyRpaService::global().on_progress(move |evento| {
                    let numero = {
                        let mut n = seq.borrow_mut();
                        *n += 1;
                        *n
                    };
                    progress.set(Some(ProgressUpdate {
                        seq: numero,
                        evento: evento.clone(),
                    }));
                    is_connected.set(service.connected());
                })
            };
            sub.unsubscribe = Some(Box::new(unsubscribe));

            // Sondeo: las transiciones de conexión no generan eventos propios
            sub.poll = Some({
                let is_connected = is_connected.clone();
                let service = service.clone();
                Interval::new(CONNECTION_POLL_MS, move || {
                    is_connected.set(service.connected());
                })
            });
        })
    };

    let disconnect = {
        let progress = progress.clone();
        let is_connected = is_connected.clone();
        let subscription = subscription.clone();

        Callback::from(move |_| {
            subscription.borrow_mut().cancelar();
            ColppyRpaService::global().disconnect();
            progress.set(None);
            is_connected.set(false);
        })
    };

    // Limpieza al desmontar: listener e interval no deben sobrevivir la vista
    {
        let subscription = subscription.clone();
        use_effect_with((), move |_| {
            move || {
                subscription.borrow_mut().cancelar();
            }
        });
    }

    UseColppyProgressHandle {
        progress,
        is_connected,
        connect,
        disconnect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::{ProgressEventType, SyncScope};

    #[test]
    fn entregas_con_payload_identico_son_estados_distintos() {
        let evento = ProgressEvent {
            tipo: ProgressEventType::Progress,
            scope: SyncScope::Clientes,
            tenant_id: "T1".to_string(),
            current: 3,
            total: 10,
            message: "Procesando cliente 3".to_string(),
            timestamp: "2024-06-01T10:00:00Z".to_string(),
        };
        let primera = ProgressUpdate { seq: 1, evento: evento.clone() };
        let repetida = ProgressUpdate { seq: 2, evento };
        assert_ne!(primera, repetida);
        assert_eq!(primera.evento, repetida.evento);
    }
}
