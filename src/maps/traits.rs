use serde::Serialize;

use crate::error::MapError;
use crate::models::{LatLng, MapView};

/// Opciones de creación del mapa (serializadas tal cual a Leaflet)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub center: [f64; 2],
    pub zoom: f64,
    /// Desactivado: se añade un control de zoom accesible aparte
    pub zoom_control: bool,
    pub keyboard: bool,
    pub keyboard_pan_delta: f64,
    pub min_zoom: f64,
    pub max_bounds: [[f64; 2]; 2],
}

impl MapOptions {
    pub fn new(view: MapView) -> Self {
        Self {
            center: view.center.to_array(),
            zoom: view.zoom,
            zoom_control: false,
            keyboard: true,
            keyboard_pan_delta: 100.0,
            min_zoom: 2.0,
            max_bounds: [[-90.0, -180.0], [90.0, 180.0]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerSpec {
    #[serde(skip)]
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: f64,
    pub no_wrap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomControlSpec {
    pub position: String,
    pub zoom_in_title: String,
    pub zoom_out_title: String,
}

/// Marcador listo para el adaptador: posición + HTML del popup ya renderizado
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub position: LatLng,
    pub title: String,
    pub icon_class: String,
    pub popup_html: String,
}

/// Adaptador de la librería de mapas.
///
/// Aísla al contenedor de la API imperativa de Leaflet: un adaptador
/// gestiona como máximo una instancia viva del mapa.
pub trait MapAdapter {
    /// Crear la instancia del mapa. Falla si ya existe una
    fn create(&mut self, options: &MapOptions) -> Result<(), MapError>;

    fn add_tile_layer(&mut self, layer: &TileLayerSpec) -> Result<(), MapError>;

    fn add_zoom_control(&mut self, control: &ZoomControlSpec) -> Result<(), MapError>;

    /// Texto previo en el control de atribución (ayuda de teclado)
    fn set_attribution_prefix(&mut self, prefix: &str) -> Result<(), MapError>;

    /// Añadir atribución extra (p.ej. procedencia de las fotos)
    fn add_attribution(&mut self, text: &str) -> Result<(), MapError>;

    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<(), MapError>;

    fn clear_markers(&mut self);

    fn marker_count(&self) -> usize;

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<(), MapError>;

    /// Vista actual, `None` si no hay mapa
    fn view(&self) -> Option<MapView>;

    /// Listener de cambios de zoom (`zoomend`). Por defecto se ignora
    fn on_zoom_change(&mut self, _listener: Box<dyn Fn(f64)>) {}

    /// Liberar la instancia y sus handlers
    fn remove(&mut self);

    fn is_ready(&self) -> bool {
        self.view().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_options_serialize_camel_case() {
        let options = MapOptions::new(MapView::new(LatLng::new(51.505, -0.09), 13.0));
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["zoomControl"], false);
        assert_eq!(json["keyboard"], true);
        assert_eq!(json["center"][0], 51.505);
        assert_eq!(json["maxBounds"][1][1], 180.0);
    }

    #[test]
    fn tile_spec_hides_template() {
        let spec = TileLayerSpec {
            url_template: "https://{s}.example/{z}/{x}/{y}.png".to_string(),
            attribution: "x".to_string(),
            max_zoom: 19.0,
            no_wrap: true,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert!(json.get("urlTemplate").is_none());
        assert_eq!(json["maxZoom"], 19.0);
    }
}
