pub mod use_colppy_progress;

pub use use_colppy_progress::{use_colppy_progress, ProgressUpdate, UseColppyProgressHandle};
