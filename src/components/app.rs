use yew::prelude::*;

use crate::components::caja_diaria::CajaDiaria;
use crate::components::saldos::Saldos;

#[derive(Clone, Copy, PartialEq)]
enum Pestania {
    CajaDiaria,
    Saldos,
}

#[function_component(App)]
pub fn app() -> Html {
    let pestania = use_state(|| Pestania::CajaDiaria);

    let ir_a = |destino: Pestania| {
        let pestania = pestania.clone();
        Callback::from(move |_: MouseEvent| pestania.set(destino))
    };

    let clase_tab = |tab: Pestania| {
        if *pestania == tab {
            "app__tab app__tab--activa"
        } else {
            "app__tab"
        }
    };

    html! {
        <div class="app">
            <header class="app__header">
                <h1>{"Caja Diaria"}</h1>
                <nav class="app__nav">
                    <button class={clase_tab(Pestania::CajaDiaria)} onclick={ir_a(Pestania::CajaDiaria)}>
                        {"Movimientos"}
                    </button>
                    <button class={clase_tab(Pestania::Saldos)} onclick={ir_a(Pestania::Saldos)}>
                        {"Cuentas corrientes"}
                    </button>
                </nav>
            </header>
            <main class="app__main">
                {
                    match *pestania {
                        Pestania::CajaDiaria => html! { <CajaDiaria /> },
                        Pestania::Saldos => html! { <Saldos /> },
                    }
                }
            </main>
        </div>
    }
}
