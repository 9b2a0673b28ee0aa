// ============================================================================
// ERRORES - Tipos de error del mapa, fotos y geolocalización
// ============================================================================
// Ninguno es fatal para la página: se registran y se degrada la UI
// ============================================================================

use thiserror::Error;

/// Error del mapa (adaptador de la librería de mapas)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Map is not ready")]
    NotReady,

    #[error("Map already initialized")]
    AlreadyInitialized,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Map library error: {0}")]
    Library(String),

    #[error("Map container was disposed")]
    Disposed,
}

/// Error al obtener fotos de la API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhotoError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Error de geolocalización
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable")]
    Unavailable,

    #[error("Geolocation timed out")]
    Timeout,

    #[error("Geolocation error: {0}")]
    Other(String),
}

impl GeolocationError {
    /// Mapea el `code` de `GeolocationPositionError` del navegador
    pub fn from_code(code: u16, message: &str) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::Unavailable,
            3 => Self::Timeout,
            _ => Self::Other(message.to_string()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl From<MapError> for wasm_bindgen::JsValue {
    fn from(err: MapError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geolocation_codes_map_to_variants() {
        assert_eq!(GeolocationError::from_code(1, ""), GeolocationError::PermissionDenied);
        assert_eq!(GeolocationError::from_code(2, ""), GeolocationError::Unavailable);
        assert_eq!(GeolocationError::from_code(3, ""), GeolocationError::Timeout);
        assert_eq!(
            GeolocationError::from_code(9, "weird"),
            GeolocationError::Other("weird".to_string())
        );
    }

    #[test]
    fn status_error_message() {
        let err = PhotoError::Status(401, "Unauthorized".to_string());
        assert_eq!(err.to_string(), "HTTP 401: Unauthorized");
    }
}
