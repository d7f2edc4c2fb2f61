// ============================================================================
// CAJA DIARIA - Página de movimientos de caja
// ============================================================================
// Dispara la sincronización Colppy de movimientos, monta el widget de
// progreso filtrado a ese scope y recarga la tabla cuando el job termina.
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::sync_progress::SyncProgress;
use crate::models::movimiento::Movimiento;
use crate::models::progress::SyncScope;
use crate::models::reporte::ResumenCaja;
use crate::services::ApiClient;

#[function_component(CajaDiaria)]
pub fn caja_diaria() -> Html {
    let movimientos = use_state(Vec::<Movimiento>::new);
    let cargando = use_state(|| false);
    let error = use_state(|| None::<String>);
    let sincronizando = use_state(|| false);

    let cargar = {
        let movimientos = movimientos.clone();
        let cargando = cargando.clone();
        let error = error.clone();

        Callback::from(move |_| {
            let movimientos = movimientos.clone();
            let cargando = cargando.clone();
            let error = error.clone();
            spawn_local(async move {
                cargando.set(true);
                match ApiClient::new().get_movimientos().await {
                    Ok(datos) => {
                        log::info!("✅ Movimientos cargados: {}", datos.len());
                        movimientos.set(datos);
                        error.set(None);
                    }
                    Err(e) => {
                        log::error!("❌ Error cargando movimientos: {}", e);
                        error.set(Some(e));
                    }
                }
                cargando.set(false);
            });
        })
    };

    // Carga inicial
    {
        let cargar = cargar.clone();
        use_effect_with((), move |_| {
            cargar.emit(());
            || ()
        });
    }

    let iniciar_sync = {
        let sincronizando = sincronizando.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let sincronizando = sincronizando.clone();
            let error = error.clone();
            spawn_local(async move {
                match ApiClient::new().iniciar_sync_colppy(SyncScope::Movimientos).await {
                    Ok(()) => sincronizando.set(true),
                    Err(e) => {
                        error.set(Some(format!("No se pudo iniciar la sincronización: {}", e)));
                    }
                }
            });
        })
    };

    let on_complete = {
        let cargar = cargar.clone();
        let sincronizando = sincronizando.clone();
        Callback::from(move |_| {
            log::info!("✅ Sync de movimientos completada, recargando tabla");
            sincronizando.set(false);
            cargar.emit(());
        })
    };

    let on_error = {
        let error = error.clone();
        let sincronizando = sincronizando.clone();
        Callback::from(move |mensaje: String| {
            sincronizando.set(false);
            error.set(Some(mensaje));
        })
    };

    let resumen = ResumenCaja::desde_movimientos(&movimientos);

    html! {
        <div class="caja-diaria">
            <div class="caja-diaria__toolbar">
                <h2>{"Caja Diaria"}</h2>
                <button
                    class="caja-diaria__sync-btn"
                    onclick={iniciar_sync}
                    disabled={*sincronizando}
                >
                    { if *sincronizando { "Sincronizando..." } else { "Sincronizar con Colppy" } }
                </button>
            </div>

            if let Some(mensaje) = &*error {
                <div class="caja-diaria__error">{ format!("⚠️ {}", mensaje) }</div>
            }

            if *sincronizando {
                <SyncProgress
                    scope={Some(SyncScope::Movimientos)}
                    on_complete={on_complete}
                    on_error={on_error}
                />
            }

            if *cargando {
                <p class="caja-diaria__loading">{"Cargando movimientos..."}</p>
            } else {
                <table class="caja-diaria__table">
                    <thead>
                        <tr>
                            <th>{"Fecha"}</th>
                            <th>{"Concepto"}</th>
                            <th>{"Cuenta"}</th>
                            <th>{"Contraparte"}</th>
                            <th>{"Ingreso"}</th>
                            <th>{"Egreso"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for movimientos.iter().map(renderizar_fila) }
                    </tbody>
                    <tfoot>
                        <tr>
                            <td colspan="4">
                                { format!("{} movimientos", resumen.cantidad_movimientos) }
                            </td>
                            <td>{ format!("${:.2}", resumen.total_ingresos) }</td>
                            <td>{ format!("${:.2}", resumen.total_egresos) }</td>
                        </tr>
                        <tr>
                            <td colspan="5">{"Saldo"}</td>
                            <td>{ format!("${:.2}", resumen.saldo) }</td>
                        </tr>
                    </tfoot>
                </table>
            }
        </div>
    }
}

fn renderizar_fila(movimiento: &Movimiento) -> Html {
    let (ingreso, egreso) = if movimiento.es_ingreso() {
        (format!("${:.2}", movimiento.monto), String::new())
    } else {
        (String::new(), format!("${:.2}", movimiento.monto))
    };

    html! {
        <tr key={movimiento.id.clone()}>
            <td>{ movimiento.fecha.format("%d/%m/%Y").to_string() }</td>
            <td>{ movimiento.concepto.clone() }</td>
            <td>{ movimiento.cuenta.clone() }</td>
            <td>{ movimiento.contraparte.clone().unwrap_or_default() }</td>
            <td class="caja-diaria__ingreso">{ ingreso }</td>
            <td class="caja-diaria__egreso">{ egreso }</td>
        </tr>
    }
}
