pub mod app;
pub mod caja_diaria;
pub mod saldos;
pub mod sync_progress;

pub use app::App;
pub use caja_diaria::CajaDiaria;
pub use saldos::Saldos;
pub use sync_progress::SyncProgress;
