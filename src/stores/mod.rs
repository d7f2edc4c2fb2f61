pub mod progress_store;

pub use progress_store::{ProgressStore, HISTORIAL_VISIBLE};
