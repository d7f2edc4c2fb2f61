pub mod cliente;
pub mod movimiento;
pub mod progress;
pub mod reporte;

pub use cliente::{SaldoCliente, SaldoProveedor};
pub use movimiento::{Movimiento, TipoMovimiento};
pub use progress::{ControlMessage, ProgressEvent, ProgressEventType, SyncScope};
pub use reporte::ResumenCaja;
