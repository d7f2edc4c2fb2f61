// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP al backend
// ============================================================================

use gloo_net::http::Request;

use crate::models::cliente::{SaldoCliente, SaldoProveedor};
use crate::models::movimiento::Movimiento;
use crate::models::progress::SyncScope;
use crate::models::reporte::ResumenCaja;
use crate::utils::constants::BACKEND_URL;

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
        }
    }

    /// Movimientos de caja del período visible
    pub async fn get_movimientos(&self) -> Result<Vec<Movimiento>, String> {
        let url = format!("{}/api/movimientos", self.base_url);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        response
            .json::<Vec<Movimiento>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// Saldos de cuenta corriente de clientes
    pub async fn get_saldos_clientes(&self) -> Result<Vec<SaldoCliente>, String> {
        let url = format!("{}/api/clientes/saldos", self.base_url);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        response
            .json::<Vec<SaldoCliente>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// Saldos de cuenta corriente de proveedores
    pub async fn get_saldos_proveedores(&self) -> Result<Vec<SaldoProveedor>, String> {
        let url = format!("{}/api/proveedores/saldos", self.base_url);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        response
            .json::<Vec<SaldoProveedor>>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// Resumen agregado de caja calculado por el backend
    pub async fn get_resumen(&self) -> Result<ResumenCaja, String> {
        let url = format!("{}/api/resumen", self.base_url);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        response
            .json::<ResumenCaja>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// Dispara el job RPA de Colppy para la categoría dada. El avance llega
    /// después por el canal de progreso, no por esta respuesta.
    pub async fn iniciar_sync_colppy(&self, scope: SyncScope) -> Result<(), String> {
        let url = format!("{}/api/colppy/sync/{}", self.base_url, scope.as_str());
        log::info!("🤖 Disparando sync Colppy: {}", scope.as_str());

        let response = Request::post(&url)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            return Err(format!("HTTP {}: {}", response.status(), response.status_text()));
        }
        Ok(())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
