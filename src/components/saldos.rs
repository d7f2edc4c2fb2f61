// ============================================================================
// SALDOS - Página de cuentas corrientes de clientes y proveedores
// ============================================================================

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::sync_progress::SyncProgress;
use crate::models::cliente::{SaldoCliente, SaldoProveedor};
use crate::models::progress::SyncScope;
use crate::services::ApiClient;

#[function_component(Saldos)]
pub fn saldos() -> Html {
    let clientes = use_state(Vec::<SaldoCliente>::new);
    let proveedores = use_state(Vec::<SaldoProveedor>::new);
    let error = use_state(|| None::<String>);
    // Scope del sync en curso; None cuando no hay ninguno
    let sync_activo = use_state(|| None::<SyncScope>);

    let cargar = {
        let clientes = clientes.clone();
        let proveedores = proveedores.clone();
        let error = error.clone();

        Callback::from(move |_| {
            let clientes = clientes.clone();
            let proveedores = proveedores.clone();
            let error = error.clone();
            spawn_local(async move {
                let api = ApiClient::new();
                match api.get_saldos_clientes().await {
                    Ok(datos) => {
                        log::info!("✅ Saldos de clientes cargados: {}", datos.len());
                        clientes.set(datos);
                    }
                    Err(e) => {
                        log::error!("❌ Error cargando saldos de clientes: {}", e);
                        error.set(Some(e));
                        return;
                    }
                }
                match api.get_saldos_proveedores().await {
                    Ok(datos) => {
                        log::info!("✅ Saldos de proveedores cargados: {}", datos.len());
                        proveedores.set(datos);
                        error.set(None);
                    }
                    Err(e) => {
                        log::error!("❌ Error cargando saldos de proveedores: {}", e);
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    {
        let cargar = cargar.clone();
        use_effect_with((), move |_| {
            cargar.emit(());
            || ()
        });
    }

    let iniciar_sync = |scope: SyncScope| {
        let sync_activo = sync_activo.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            let sync_activo = sync_activo.clone();
            let error = error.clone();
            spawn_local(async move {
                match ApiClient::new().iniciar_sync_colppy(scope).await {
                    Ok(()) => sync_activo.set(Some(scope)),
                    Err(e) => {
                        error.set(Some(format!("No se pudo iniciar la sincronización: {}", e)));
                    }
                }
            });
        })
    };

    let on_complete = {
        let cargar = cargar.clone();
        let sync_activo = sync_activo.clone();
        Callback::from(move |_| {
            log::info!("✅ Sync de saldos completada, recargando tablas");
            sync_activo.set(None);
            cargar.emit(());
        })
    };

    let on_error = {
        let error = error.clone();
        let sync_activo = sync_activo.clone();
        Callback::from(move |mensaje: String| {
            sync_activo.set(None);
            error.set(Some(mensaje));
        })
    };

    html! {
        <div class="saldos">
            <div class="saldos__toolbar">
                <h2>{"Cuentas Corrientes"}</h2>
                <button
                    onclick={iniciar_sync(SyncScope::Clientes)}
                    disabled={sync_activo.is_some()}
                >
                    {"Sincronizar clientes"}
                </button>
                <button
                    onclick={iniciar_sync(SyncScope::Proveedores)}
                    disabled={sync_activo.is_some()}
                >
                    {"Sincronizar proveedores"}
                </button>
            </div>

            if let Some(mensaje) = &*error {
                <div class="saldos__error">{ format!("⚠️ {}", mensaje) }</div>
            }

            if let Some(scope) = *sync_activo {
                <SyncProgress
                    scope={Some(scope)}
                    on_complete={on_complete}
                    on_error={on_error}
                />
            }

            <div class="saldos__tablas">
                <section>
                    <h3>{"Clientes"}</h3>
                    <table class="saldos__table">
                        <thead>
                            <tr>
                                <th>{"Razón social"}</th>
                                <th>{"CUIT"}</th>
                                <th>{"Saldo"}</th>
                                <th>{"Última factura"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for clientes.iter().map(|c| html! {
                                <tr key={c.cuit.clone()}>
                                    <td>{ c.razon_social.clone() }</td>
                                    <td>{ c.cuit.clone() }</td>
                                    <td>{ format!("${:.2}", c.saldo) }</td>
                                    <td>{ c.ultima_factura.clone().unwrap_or_default() }</td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                </section>
                <section>
                    <h3>{"Proveedores"}</h3>
                    <table class="saldos__table">
                        <thead>
                            <tr>
                                <th>{"Razón social"}</th>
                                <th>{"CUIT"}</th>
                                <th>{"Saldo"}</th>
                                <th>{"Último pago"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for proveedores.iter().map(|p| html! {
                                <tr key={p.cuit.clone()}>
                                    <td>{ p.razon_social.clone() }</td>
                                    <td>{ p.cuit.clone() }</td>
                                    <td>{ format!("${:.2}", p.saldo) }</td>
                                    <td>{ p.ultimo_pago.clone().unwrap_or_default() }</td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                </section>
            </div>
        </div>
    }
}
