// ============================================================================
// SYNC PROGRESS COMPONENT - Widget de progreso de sincronización Colppy
// ============================================================================
// Muestra barra de porcentaje, mensaje actual, punto de conexión y un
// historial acotado de los últimos eventos aceptados para su scope.
// ============================================================================

use chrono::DateTime;
use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::hooks::{use_colppy_progress, ProgressUpdate};
use crate::models::progress::{ProgressEvent, ProgressEventType, SyncScope};
use crate::stores::{ProgressStore, HISTORIAL_VISIBLE};

/// Delay antes de avisar al padre que terminó (deja ver el 100% un instante)
const COMPLETE_CALLBACK_MS: u32 = 1000;
/// Delay antes de limpiar el historial para la próxima corrida
const CLEAR_HISTORY_MS: u32 = 5000;

#[derive(Properties, PartialEq, Clone)]
pub struct SyncProgressProps {
    /// Filtro de categoría; None muestra todas (los eventos `todos` pasan siempre)
    #[prop_or_default]
    pub scope: Option<SyncScope>,
    #[prop_or_default]
    pub on_complete: Callback<()>,
    #[prop_or_default]
    pub on_error: Callback<String>,
}

#[function_component(SyncProgress)]
pub fn sync_progress(props: &SyncProgressProps) -> Html {
    let handle = use_colppy_progress();
    let store = use_state(ProgressStore::default);
    // Los Timeout viven acá para que sobrevivan al re-render
    let timers = use_mut_ref(Vec::<Timeout>::new);

    // Conectar al montar; al desmontar, baja del canal y timers afuera
    {
        let connect = handle.connect.clone();
        let disconnect = handle.disconnect.clone();
        let timers = timers.clone();
        use_effect_with((), move |_| {
            connect.emit(());
            move || {
                timers.borrow_mut().clear();
                disconnect.emit(());
            }
        });
    }

    // Procesar cada evento entrante en orden de llegada
    {
        let store = store.clone();
        let timers = timers.clone();
        let scope = props.scope;
        let on_complete = props.on_complete.clone();
        let on_error = props.on_error.clone();

        use_effect_with((*handle.progress).clone(), move |entrega: &Option<ProgressUpdate>| {
            if let Some(evento) = entrega.clone().map(|e| e.evento) {
                let mut nuevo = (*store).clone();
                if nuevo.aceptar(evento.clone(), scope) {
                    match evento.tipo {
                        ProgressEventType::Complete => {
                            let aviso = Timeout::new(COMPLETE_CALLBACK_MS, move || {
                                on_complete.emit(());
                            });
                            let store_limpiar = store.clone();
                            let limpieza = Timeout::new(CLEAR_HISTORY_MS, move || {
                                store_limpiar.set(ProgressStore::default());
                            });
                            let mut pendientes = timers.borrow_mut();
                            pendientes.push(aviso);
                            pendientes.push(limpieza);
                        }
                        ProgressEventType::Error => {
                            // El job externo falló: se avisa al padre sin delay
                            on_error.emit(evento.message.clone());
                        }
                        _ => {}
                    }
                    store.set(nuevo);
                }
            }
            || ()
        });
    }

    let conectado = *handle.is_connected;
    let estado = &*store;

    // Nada que mostrar: sin conexión y sin eventos jamás recibidos
    if !conectado && estado.vacio() {
        return html! {};
    }

    let ultimo = estado.ultimo();
    let porcentaje = estado.porcentaje();

    let clase_barra = match ultimo.map(|e| e.tipo) {
        Some(ProgressEventType::Complete) => "sync-progress__bar sync-progress__bar--complete",
        Some(ProgressEventType::Error) => "sync-progress__bar sync-progress__bar--error",
        _ => "sync-progress__bar sync-progress__bar--active",
    };
    let clase_punto = if conectado {
        "sync-progress__dot sync-progress__dot--online"
    } else {
        "sync-progress__dot sync-progress__dot--offline"
    };
    let titulo_punto = if conectado { "Conectado" } else { "Desconectado" };
    let mensaje = ultimo
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "Esperando eventos...".to_string());

    html! {
        <div class="sync-progress">
            <div class="sync-progress__header">
                <span class={clase_punto} title={titulo_punto}></span>
                <span class="sync-progress__message">{ mensaje }</span>
                <span class="sync-progress__percent">{ format!("{}%", porcentaje) }</span>
            </div>
            <div class="sync-progress__track">
                <div
                    class={clase_barra}
                    style={format!("width: {}%", porcentaje.min(100))}
                />
            </div>
            <ul class="sync-progress__history">
                { for estado.ultimos(HISTORIAL_VISIBLE).iter().map(renderizar_entrada) }
            </ul>
        </div>
    }
}

fn renderizar_entrada(evento: &ProgressEvent) -> Html {
    html! {
        <li class="sync-progress__entry">
            <span class="sync-progress__entry-time">{ hora_corta(&evento.timestamp) }</span>
            <span class="sync-progress__entry-scope">{ format!("[{}]", evento.scope.as_str()) }</span>
            <span class="sync-progress__entry-message">{ evento.message.clone() }</span>
        </li>
    }
}

/// HH:MM:SS si el timestamp del productor es ISO-8601 válido; crudo si no
fn hora_corta(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}
