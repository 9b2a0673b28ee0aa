// Módulo de mapas: trait del adaptador + implementaciones

#[cfg(target_arch = "wasm32")]
pub mod leaflet;

pub mod memory;
pub mod traits;

pub use traits::*;
