// ============================================================================
// PICOGNITO MAP - <map-container> en Rust puro (WASM)
// ============================================================================
// Arquitectura:
// - Components: Controlador del contenedor (ciclo de vida, mapa, fotos)
// - Maps: Adaptador de la librería de mapas (Leaflet / memoria)
// - Services: API de fotos y geolocalización
// - ViewModels / Views: Datos de presentación + HTML
// - Elements: Registro de custom elements (solo navegador)
// ============================================================================

pub mod components;
pub mod config;
pub mod error;
pub mod maps;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod elements;

#[cfg(test)]
pub(crate) mod testing;

pub use components::{ElementHost, MapContainer, MapEvent};
pub use config::{AppConfig, CONFIG};
pub use error::{GeolocationError, MapError, PhotoError};
pub use models::{LatLng, MapView, Photo};
pub use state::LifecycleState;

#[cfg(target_arch = "wasm32")]
mod wasm_entry {
    use wasm_bindgen::prelude::*;
    use wasm_logger::Config;

    use crate::config::CONFIG;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        // Inicializar panic hook para mejor debugging
        console_error_panic_hook::set_once();

        if CONFIG.is_logging_enabled() {
            wasm_logger::init(Config::default());
        }
        log::info!("🗺️ Picognito map - Rust + WASM");
        if !CONFIG.has_real_access_key() {
            log::warn!("📸 Sin UNSPLASH_ACCESS_KEY: se usarán las fotos de muestra");
        }

        crate::elements::define_elements()
    }

    /// Registrar los elementos manualmente (idempotente)
    #[wasm_bindgen(js_name = defineElements)]
    pub fn define_elements() -> Result<(), JsValue> {
        crate::elements::define_elements()
    }
}
