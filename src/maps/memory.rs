// ============================================================================
// IN-MEMORY MAP - Adaptador sin navegador
// ============================================================================
// Guarda vista, capas y marcadores en memoria. Lo usan los tests del
// contenedor y sirve para ejecutar la lógica fuera de un navegador.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use super::{MapAdapter, MapOptions, MarkerSpec, TileLayerSpec, ZoomControlSpec};
use crate::error::MapError;
use crate::models::{LatLng, MapView};

/// Registro de llamadas, compartido para inspeccionarlo desde fuera
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MapRecord {
    pub view: Option<MapView>,
    pub options: Option<MapOptions>,
    pub tile_layers: Vec<TileLayerSpec>,
    pub zoom_controls: Vec<ZoomControlSpec>,
    pub attribution_prefix: Option<String>,
    pub attributions: Vec<String>,
    pub markers: Vec<MarkerSpec>,
    /// Orden de inserción: "tiles", "zoom-control", "marker:<id>"
    pub layer_order: Vec<String>,
    /// Como `LeafletMap`: los controles se mueven delante del panel del mapa
    pub controls_first: bool,
    pub created: usize,
    pub removed: usize,
}

impl MapRecord {
    /// Orden de foco con Tab según el DOM de Leaflet: el panel del mapa
    /// (marcadores) va antes que los controles salvo que estos se muevan
    pub fn focus_order(&self) -> Vec<String> {
        let markers = self.markers.iter().map(|m| format!("marker:{}", m.id));
        let controls = self.zoom_controls.iter().map(|_| "zoom-control".to_string());
        if self.controls_first {
            controls.chain(markers).collect()
        } else {
            markers.chain(controls).collect()
        }
    }
}

#[derive(Default, Clone)]
pub struct InMemoryMap {
    record: Rc<RefCell<MapRecord>>,
    zoom_listener: Rc<RefCell<Option<Box<dyn Fn(f64)>>>>,
    fail_on_create: Option<String>,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adaptador cuya creación falla (simula que la librería no carga)
    pub fn failing(reason: &str) -> Self {
        Self {
            fail_on_create: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Handle compartido al registro
    pub fn record(&self) -> Rc<RefCell<MapRecord>> {
        self.record.clone()
    }

    fn require_view(&self) -> Result<MapView, MapError> {
        self.record.borrow().view.ok_or(MapError::NotReady)
    }
}

impl MapAdapter for InMemoryMap {
    fn create(&mut self, options: &MapOptions) -> Result<(), MapError> {
        if let Some(reason) = &self.fail_on_create {
            return Err(MapError::Library(reason.clone()));
        }
        let mut record = self.record.borrow_mut();
        if record.view.is_some() {
            return Err(MapError::AlreadyInitialized);
        }
        record.view = Some(MapView::new(
            LatLng::new(options.center[0], options.center[1]),
            options.zoom,
        ));
        record.options = Some(options.clone());
        record.created += 1;
        Ok(())
    }

    fn add_tile_layer(&mut self, layer: &TileLayerSpec) -> Result<(), MapError> {
        self.require_view()?;
        let mut record = self.record.borrow_mut();
        record.tile_layers.push(layer.clone());
        record.layer_order.push("tiles".to_string());
        Ok(())
    }

    fn add_zoom_control(&mut self, control: &ZoomControlSpec) -> Result<(), MapError> {
        self.require_view()?;
        let mut record = self.record.borrow_mut();
        record.zoom_controls.push(control.clone());
        record.layer_order.push("zoom-control".to_string());
        record.controls_first = true;
        Ok(())
    }

    fn set_attribution_prefix(&mut self, prefix: &str) -> Result<(), MapError> {
        self.require_view()?;
        self.record.borrow_mut().attribution_prefix = Some(prefix.to_string());
        Ok(())
    }

    fn add_attribution(&mut self, text: &str) -> Result<(), MapError> {
        self.require_view()?;
        self.record.borrow_mut().attributions.push(text.to_string());
        Ok(())
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<(), MapError> {
        self.require_view()?;
        let mut record = self.record.borrow_mut();
        record.layer_order.push(format!("marker:{}", marker.id));
        record.markers.push(marker.clone());
        Ok(())
    }

    fn clear_markers(&mut self) {
        let mut record = self.record.borrow_mut();
        record.markers.clear();
        record.layer_order.retain(|layer| !layer.starts_with("marker:"));
    }

    fn marker_count(&self) -> usize {
        self.record.borrow().markers.len()
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<(), MapError> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!("{}, {}", center.lat, center.lng)));
        }
        let changed_zoom = {
            let mut record = self.record.borrow_mut();
            let current = record.view.ok_or(MapError::NotReady)?;
            record.view = Some(MapView::new(center, zoom));
            current.zoom != zoom
        };
        // Como Leaflet sin animación: zoomend se dispara dentro de setView
        if changed_zoom {
            if let Some(listener) = self.zoom_listener.borrow().as_ref() {
                listener(zoom);
            }
        }
        Ok(())
    }

    fn view(&self) -> Option<MapView> {
        self.record.borrow().view
    }

    fn on_zoom_change(&mut self, listener: Box<dyn Fn(f64)>) {
        *self.zoom_listener.borrow_mut() = Some(listener);
    }

    fn remove(&mut self) {
        let mut record = self.record.borrow_mut();
        if record.view.take().is_some() {
            record.removed += 1;
        }
        record.markers.clear();
        record.tile_layers.clear();
        record.zoom_controls.clear();
        record.layer_order.clear();
        record.controls_first = false;
        self.zoom_listener.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> MapOptions {
        MapOptions::new(MapView::new(LatLng::new(10.0, 20.0), 5.0))
    }

    #[test]
    fn only_one_live_instance() {
        let mut map = InMemoryMap::new();
        map.create(&options()).unwrap();
        assert_eq!(map.create(&options()), Err(MapError::AlreadyInitialized));
        map.remove();
        map.create(&options()).unwrap();
        assert_eq!(map.record().borrow().created, 2);
    }

    #[test]
    fn calls_before_create_fail() {
        let mut map = InMemoryMap::new();
        assert_eq!(map.set_view(LatLng::new(1.0, 1.0), 3.0), Err(MapError::NotReady));
        assert!(!map.is_ready());
    }

    #[test]
    fn zoom_listener_fires_on_zoom_change_only() {
        let mut map = InMemoryMap::new();
        map.create(&options()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        map.on_zoom_change(Box::new(move |z| sink.borrow_mut().push(z)));
        map.set_view(LatLng::new(1.0, 1.0), 5.0).unwrap();
        map.set_view(LatLng::new(1.0, 1.0), 9.0).unwrap();
        assert_eq!(*seen.borrow(), vec![9.0]);
    }

    #[test]
    fn focus_order_puts_controls_before_markers() {
        let mut map = InMemoryMap::new();
        map.create(&options()).unwrap();
        let marker = MarkerSpec {
            id: "m1".to_string(),
            position: LatLng::new(10.0, 20.0),
            title: "Photo".to_string(),
            icon_class: "photo-marker".to_string(),
            popup_html: String::new(),
        };
        map.add_marker(&marker).unwrap();
        assert_eq!(map.record().borrow().focus_order(), vec!["marker:m1"]);

        map.add_zoom_control(&ZoomControlSpec {
            position: "bottomright".to_string(),
            zoom_in_title: "in".to_string(),
            zoom_out_title: "out".to_string(),
        })
        .unwrap();
        assert_eq!(map.record().borrow().focus_order(), vec!["zoom-control", "marker:m1"]);
        assert_eq!(map.marker_count(), 1);
    }
}
