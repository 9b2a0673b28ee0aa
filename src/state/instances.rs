// ============================================================================
// INSTANCES - Controladores vivos por id de elemento
// ============================================================================

use std::collections::HashMap;

/// Ids de instancia y controladores montados.
///
/// Solo guarda los elementos conectados: al desconectar se suelta la
/// entrada, así un elemento descartado no queda retenido aquí.
#[derive(Debug)]
pub struct InstanceRegistry<T> {
    next_id: u32,
    mounted: HashMap<u32, T>,
}

impl<T> Default for InstanceRegistry<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            mounted: HashMap::new(),
        }
    }
}

impl<T: Clone> InstanceRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn mount(&mut self, id: u32, instance: T) {
        self.mounted.insert(id, instance);
    }

    pub fn get(&self, id: u32) -> Option<T> {
        self.mounted.get(&id).cloned()
    }

    pub fn unmount(&mut self, id: u32) -> Option<T> {
        self.mounted.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let mut registry: InstanceRegistry<&str> = InstanceRegistry::new();
        let a = registry.next_id();
        let b = registry.next_id();
        assert_ne!(a, b);
        assert!(registry.is_empty());
    }

    #[test]
    fn unmount_releases_the_entry() {
        let mut registry = InstanceRegistry::new();
        for _ in 0..50 {
            let id = registry.next_id();
            registry.mount(id, format!("map-{}", id));
            assert_eq!(registry.get(id).as_deref(), Some(format!("map-{}", id).as_str()));
            assert!(registry.unmount(id).is_some());
        }
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.unmount(1), None);
    }

    #[test]
    fn remount_replaces_instance() {
        let mut registry = InstanceRegistry::new();
        let id = registry.next_id();
        registry.mount(id, 1);
        registry.mount(id, 2);
        assert_eq!(registry.get(id), Some(2));
        assert_eq!(registry.len(), 1);
    }
}
