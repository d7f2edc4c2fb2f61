use serde::{Deserialize, Serialize};

/// Saldo de cuenta corriente de un cliente
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaldoCliente {
    pub razon_social: String,
    pub cuit: String,
    pub saldo: f64,
    #[serde(default)]
    pub ultima_factura: Option<String>,
}

/// Saldo de cuenta corriente de un proveedor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaldoProveedor {
    pub razon_social: String,
    pub cuit: String,
    pub saldo: f64,
    #[serde(default)]
    pub ultimo_pago: Option<String>,
}
