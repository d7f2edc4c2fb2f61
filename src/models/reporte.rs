use serde::{Deserialize, Serialize};

use crate::models::movimiento::Movimiento;

/// Resumen agregado de la caja (totales del período visible)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumenCaja {
    pub total_ingresos: f64,
    pub total_egresos: f64,
    pub saldo: f64,
    pub cantidad_movimientos: usize,
}

impl ResumenCaja {
    /// Agrega del lado del cliente los movimientos ya cargados
    pub fn desde_movimientos(movimientos: &[Movimiento]) -> Self {
        let total_ingresos: f64 = movimientos
            .iter()
            .filter(|m| m.es_ingreso())
            .map(|m| m.monto)
            .sum();
        let total_egresos: f64 = movimientos
            .iter()
            .filter(|m| !m.es_ingreso())
            .map(|m| m.monto)
            .sum();

        Self {
            total_ingresos,
            total_egresos,
            saldo: total_ingresos - total_egresos,
            cantidad_movimientos: movimientos.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movimiento::TipoMovimiento;
    use chrono::NaiveDate;

    fn movimiento(tipo: TipoMovimiento, monto: f64) -> Movimiento {
        Movimiento {
            id: "m1".to_string(),
            fecha: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            concepto: "Honorarios".to_string(),
            tipo,
            monto,
            cuenta: "Caja".to_string(),
            contraparte: None,
        }
    }

    #[test]
    fn resumen_agrega_ingresos_y_egresos() {
        let movimientos = vec![
            movimiento(TipoMovimiento::Ingreso, 1500.0),
            movimiento(TipoMovimiento::Ingreso, 500.0),
            movimiento(TipoMovimiento::Egreso, 700.0),
        ];
        let resumen = ResumenCaja::desde_movimientos(&movimientos);
        assert_eq!(resumen.total_ingresos, 2000.0);
        assert_eq!(resumen.total_egresos, 700.0);
        assert_eq!(resumen.saldo, 1300.0);
        assert_eq!(resumen.cantidad_movimientos, 3);
    }

    #[test]
    fn resumen_se_decodifica_en_camel_case() {
        let raw = r#"{"totalIngresos":2000.0,"totalEgresos":700.0,"saldo":1300.0,"cantidadMovimientos":3}"#;
        let resumen: ResumenCaja = serde_json::from_str(raw).unwrap();
        assert_eq!(resumen.total_ingresos, 2000.0);
        assert_eq!(resumen.total_egresos, 700.0);
        assert_eq!(resumen.saldo, 1300.0);
        assert_eq!(resumen.cantidad_movimientos, 3);
    }

    #[test]
    fn resumen_vacio() {
        let resumen = ResumenCaja::desde_movimientos(&[]);
        assert_eq!(resumen.saldo, 0.0);
        assert_eq!(resumen.cantidad_movimientos, 0);
    }
}
