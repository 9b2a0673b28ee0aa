/// Plantilla de tiles de OpenStreetMap
pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Atribución obligatoria de OSM (HTML)
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Prefijo del control de atribución con la ayuda de teclado
pub const KEYBOARD_HINT: &str = "Use arrow keys to pan, +/- to zoom";

pub const UNSPLASH_HOME: &str = "https://unsplash.com/";
pub const UTM_SOURCE: &str = "picognito";
pub const UTM_MEDIUM: &str = "referral";

// Nombres de elementos y eventos
pub const MAP_CONTAINER_TAG: &str = "map-container";
pub const SITE_HEADER_TAG: &str = "site-header";
pub const SITE_FOOTER_TAG: &str = "site-footer";
pub const MAP_READY_EVENT: &str = "map-ready";
pub const MAP_ERROR_EVENT: &str = "map-error";

/// Atributos observados por `<map-container>`
pub const OBSERVED_ATTRIBUTES: [&str; 3] = ["latitude", "longitude", "zoom"];

pub const ZOOM_IN_TITLE: &str = "Zoom in to show more detail";
pub const ZOOM_OUT_TITLE: &str = "Zoom out to show larger area";
pub const ZOOM_CONTROL_POSITION: &str = "bottomright";

pub const PHOTO_MARKER_CLASS: &str = "photo-marker";
