// ============================================================================
// LIFECYCLE - Estado del contenedor + token de cancelación
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

/// Estados del `<map-container>`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Unattached,
    Rendering,
    MapInitializing,
    MapReady,
    MapError,
    Recentering,
    /// Terminal
    Disposed,
}

impl LifecycleState {
    /// Valor del atributo `data-state`
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Unattached => "unattached",
            LifecycleState::Rendering => "rendering",
            LifecycleState::MapInitializing => "map-initializing",
            LifecycleState::MapReady => "map-ready",
            LifecycleState::MapError => "map-error",
            LifecycleState::Recentering => "recentering",
            LifecycleState::Disposed => "disposed",
        }
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, LifecycleState::Disposed)
    }

    /// Hay un mapa vivo con el que interactuar
    pub fn has_live_map(&self) -> bool {
        matches!(self, LifecycleState::MapReady | LifecycleState::Recentering)
    }
}

/// Generación capturada al iniciar una tarea async
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation(u64);

/// Token de ciclo de vida: invalidarlo convierte en no-op las
/// continuaciones async que siguen en vuelo (fetch, geolocalización)
#[derive(Clone, Debug, Default)]
pub struct LifecycleToken {
    generation: Rc<Cell<u64>>,
}

impl LifecycleToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Generation {
        Generation(self.generation.get())
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation.get() == generation.0
    }

    pub fn invalidate(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidate_makes_captured_generation_stale() {
        let token = LifecycleToken::new();
        let captured = token.current();
        assert!(token.is_current(captured));
        token.clone().invalidate();
        assert!(!token.is_current(captured));
        assert!(token.is_current(token.current()));
    }

    #[test]
    fn state_names_are_kebab_case() {
        assert_eq!(LifecycleState::MapInitializing.as_str(), "map-initializing");
        assert_eq!(LifecycleState::Disposed.as_str(), "disposed");
        assert!(LifecycleState::Recentering.has_live_map());
        assert!(!LifecycleState::MapError.has_live_map());
    }
}
