pub mod api_client;
pub mod colppy_rpa_service;

pub use api_client::ApiClient;
pub use colppy_rpa_service::{ColppyRpaService, ConnectionPhase};
