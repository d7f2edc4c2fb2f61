// ============================================================================
// CAJA DIARIA - FRONTEND WASM (RUST PURO)
// ============================================================================
// Back-office del estudio contable:
// - Components: páginas y widgets Yew
// - Hooks: adaptadores reactivos (canal de progreso Colppy)
// - Services: comunicación HTTP y canal WebSocket de progreso
// - Stores: estado puro, sin DOM
// - Models: estructuras compartidas con el backend
// ============================================================================

pub mod components;
pub mod config;
pub mod hooks;
pub mod models;
pub mod services;
pub mod stores;
pub mod utils;

use wasm_bindgen::prelude::*;

use crate::components::App;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para mejor debugging en consola
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("🚀 Caja Diaria - Frontend Rust WASM");

    yew::Renderer::<App>::new().render();

    Ok(())
}
