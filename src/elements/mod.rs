// ============================================================================
// ELEMENTS - Custom elements del navegador
// ============================================================================

pub mod host;
pub mod registry;

pub use host::DomHost;
pub use registry::define_elements;
