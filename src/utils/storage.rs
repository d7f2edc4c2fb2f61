use web_sys::{window, Storage};

use crate::utils::constants::{DEFAULT_EMPRESA_ID, STORAGE_KEY_EMPRESA};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Empresa (tenant) activa: la guarda el login como string crudo.
/// Si no hay nada guardado se usa el default configurado.
pub fn empresa_id() -> String {
    get_local_storage()
        .and_then(|s| s.get_item(STORAGE_KEY_EMPRESA).ok().flatten())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_EMPRESA_ID.to_string())
}
