// ============================================================================
// COMPONENTS - Controladores de custom elements
// ============================================================================

pub mod host;
pub mod map_container;

pub use host::{ElementHost, MapEvent};
pub use map_container::MapContainer;
