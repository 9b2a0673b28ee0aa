// ============================================================================
// STATE MODULE - Estado del contenedor con Rc<Cell/RefCell>
// ============================================================================

pub mod instances;
pub mod lifecycle;

pub use instances::InstanceRegistry;
pub use lifecycle::*;
