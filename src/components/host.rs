use crate::error::MapError;
use crate::models::MapView;

/// Eventos que el contenedor emite hacia la página
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// `map-ready`: el mapa está listo para interactuar
    Ready { view: MapView },
    /// `map-error`: la inicialización falló (no es fatal)
    Error { message: String },
}

impl MapEvent {
    pub fn name(&self) -> &'static str {
        match self {
            MapEvent::Ready { .. } => crate::utils::MAP_READY_EVENT,
            MapEvent::Error { .. } => crate::utils::MAP_ERROR_EVENT,
        }
    }
}

/// Elemento anfitrión del contenedor (el `<map-container>` en el navegador).
///
/// Los métodos toman `&self`: el adaptador puede llamar al host de forma
/// síncrona (p.ej. `zoomend` dentro de `setView`) mientras el estado está prestado.
pub trait ElementHost {
    /// Reemplazar el contenido del shadow root
    fn render(&self, html: &str) -> Result<(), MapError>;

    fn set_attribute(&self, name: &str, value: &str);

    fn dispatch(&self, event: &MapEvent);
}
