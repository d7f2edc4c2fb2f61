// ============================================================================
// PROGRESS STORE - Estado puro del widget de progreso (sin DOM)
// ============================================================================

use crate::models::progress::{ProgressEvent, SyncScope};

/// Entradas visibles en el historial del widget
pub const HISTORIAL_VISIBLE: usize = 5;

/// Estado del widget de progreso. La lista de aceptados no tiene tope;
/// solo se RENDERIZAN las últimas entradas, pero el último evento aceptado
/// manda sobre mensaje y porcentaje.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressStore {
    /// Eventos aceptados, en orden de llegada
    pub eventos: Vec<ProgressEvent>,
}

impl ProgressStore {
    /// Acepta el evento si pasa el filtro de scope (`todos` pasa siempre;
    /// sin filtro pasa todo). Devuelve false si se ignoró en silencio.
    pub fn aceptar(&mut self, evento: ProgressEvent, filtro: Option<SyncScope>) -> bool {
        if let Some(filtro) = filtro {
            if !evento.scope.pasa_filtro(filtro) {
                return false;
            }
        }
        self.eventos.push(evento);
        true
    }

    pub fn ultimo(&self) -> Option<&ProgressEvent> {
        self.eventos.last()
    }

    /// Últimas N entradas, en orden de llegada
    pub fn ultimos(&self, n: usize) -> &[ProgressEvent] {
        &self.eventos[self.eventos.len().saturating_sub(n)..]
    }

    pub fn porcentaje(&self) -> u32 {
        self.ultimo().map(|e| e.porcentaje()).unwrap_or(0)
    }

    pub fn limpiar(&mut self) {
        self.eventos.clear();
    }

    pub fn vacio(&self) -> bool {
        self.eventos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::progress::ProgressEventType;

    fn evento(scope: SyncScope, current: u32, total: u32) -> ProgressEvent {
        ProgressEvent {
            tipo: ProgressEventType::Progress,
            scope,
            tenant_id: "T1".to_string(),
            current,
            total,
            message: format!("Paso {}", current),
            timestamp: String::new(),
        }
    }

    #[test]
    fn filtro_de_scope_ignora_otras_categorias() {
        let mut store = ProgressStore::default();
        let antes = store.clone();

        // Scope distinto: se ignora sin cambiar el estado
        assert!(!store.aceptar(
            evento(SyncScope::Proveedores, 1, 10),
            Some(SyncScope::Clientes)
        ));
        assert_eq!(store, antes);

        // Mismo scope y `todos`: se aceptan
        assert!(store.aceptar(evento(SyncScope::Clientes, 2, 10), Some(SyncScope::Clientes)));
        assert!(store.aceptar(evento(SyncScope::Todos, 3, 10), Some(SyncScope::Clientes)));
        assert_eq!(store.eventos.len(), 2);
    }

    #[test]
    fn sin_filtro_acepta_todo() {
        let mut store = ProgressStore::default();
        assert!(store.aceptar(evento(SyncScope::Pagos, 1, 4), None));
        assert!(store.aceptar(evento(SyncScope::Facturas, 2, 4), None));
        assert_eq!(store.eventos.len(), 2);
    }

    #[test]
    fn historial_muestra_los_ultimos_cinco_en_orden() {
        let mut store = ProgressStore::default();
        for i in 1..=8 {
            store.aceptar(evento(SyncScope::Clientes, i, 8), None);
        }
        let visibles = store.ultimos(HISTORIAL_VISIBLE);
        assert_eq!(visibles.len(), 5);
        let currents: Vec<u32> = visibles.iter().map(|e| e.current).collect();
        assert_eq!(currents, vec![4, 5, 6, 7, 8]);
        // Todos los aceptados siguen contando para el "último gana"
        assert_eq!(store.eventos.len(), 8);
        assert_eq!(store.ultimo().unwrap().current, 8);
    }

    #[test]
    fn porcentaje_del_ultimo_evento() {
        let mut store = ProgressStore::default();
        assert_eq!(store.porcentaje(), 0);
        store.aceptar(evento(SyncScope::Clientes, 30, 120), None);
        assert_eq!(store.porcentaje(), 25);
        store.aceptar(evento(SyncScope::Clientes, 5, 0), None);
        assert_eq!(store.porcentaje(), 0);
    }

    #[test]
    fn limpiar_resetea_para_otra_corrida() {
        let mut store = ProgressStore::default();
        store.aceptar(evento(SyncScope::Clientes, 1, 2), None);
        store.limpiar();
        assert!(store.vacio());
        assert!(store.ultimo().is_none());
    }
}
