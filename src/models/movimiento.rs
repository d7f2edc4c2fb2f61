use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentido de un movimiento de caja
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoMovimiento {
    Ingreso,
    Egreso,
}

/// Movimiento de caja diaria (viene ya formado del backend)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movimiento {
    pub id: String,
    pub fecha: NaiveDate,
    pub concepto: String,
    pub tipo: TipoMovimiento,
    pub monto: f64,
    pub cuenta: String,
    /// Cliente o proveedor asociado, si corresponde
    #[serde(default)]
    pub contraparte: Option<String>,
}

impl Movimiento {
    pub fn es_ingreso(&self) -> bool {
        self.tipo == TipoMovimiento::Ingreso
    }
}
