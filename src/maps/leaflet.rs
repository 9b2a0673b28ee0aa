// ============================================================================
// LEAFLET FFI - Adaptador de Leaflet (window.L) para el navegador
// ============================================================================
// Requiere que la página cargue leaflet.js antes del módulo WASM
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement};

use super::{MapAdapter, MapOptions, MarkerSpec, TileLayerSpec, ZoomControlSpec};
use crate::dom::{query_in_shadow, ListenerHandle};
use crate::error::MapError;
use crate::models::{LatLng, MapView};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L, js_name = Map)]
    #[derive(Debug, Clone)]
    pub type JsLeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = Layer)]
    #[derive(Debug, Clone)]
    pub type JsLayer;

    #[wasm_bindgen(js_namespace = L, js_name = Control)]
    #[derive(Debug, Clone)]
    pub type JsControl;

    #[wasm_bindgen(js_namespace = L, js_name = LatLng)]
    #[derive(Debug, Clone)]
    pub type JsLatLng;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn l_map(container: &HtmlElement, options: &JsValue) -> Result<JsLeafletMap, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn l_tile_layer(url_template: &str, options: &JsValue) -> Result<JsLayer, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    fn l_marker(latlng: &JsValue, options: &JsValue) -> Result<JsLayer, JsValue>;

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    fn l_div_icon(options: &JsValue) -> JsValue;

    #[wasm_bindgen(catch, js_namespace = ["L", "control"], js_name = zoom)]
    fn l_control_zoom(options: &JsValue) -> Result<JsControl, JsValue>;

    #[wasm_bindgen(catch, method, js_name = setView)]
    fn set_view(this: &JsLeafletMap, center: &JsValue, zoom: f64) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = getZoom)]
    fn get_zoom(this: &JsLeafletMap) -> f64;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &JsLeafletMap) -> JsLatLng;

    #[wasm_bindgen(method, js_name = closePopup)]
    fn close_popup(this: &JsLeafletMap);

    #[wasm_bindgen(method)]
    fn on(this: &JsLeafletMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn off(this: &JsLeafletMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn remove(this: &JsLeafletMap);

    #[wasm_bindgen(method, getter, js_name = attributionControl)]
    fn attribution_control(this: &JsLeafletMap) -> Option<JsControl>;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &JsLatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &JsLatLng) -> f64;

    #[wasm_bindgen(catch, method, js_name = addTo)]
    fn add_to(this: &JsLayer, map: &JsLeafletMap) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &JsLayer, html: &str, options: &JsValue);

    #[wasm_bindgen(method)]
    fn remove(this: &JsLayer);

    #[wasm_bindgen(catch, method, js_name = addTo)]
    fn add_to(this: &JsControl, map: &JsLeafletMap) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = setPrefix)]
    fn set_prefix(this: &JsControl, prefix: &str);

    #[wasm_bindgen(method, js_name = addAttribution)]
    fn add_attribution(this: &JsControl, text: &str);
}

pub(crate) fn js_error(err: JsValue) -> MapError {
    MapError::Library(
        err.as_string()
            .or_else(|| {
                err.dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, MapError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| MapError::Library(e.to_string()))
}

fn latlng_to_js(position: LatLng) -> JsValue {
    let array = js_sys::Array::new();
    array.push(&JsValue::from_f64(position.lat));
    array.push(&JsValue::from_f64(position.lng));
    array.into()
}

/// Renderizador Leaflet dentro del shadow root de `<map-container>`
pub struct LeafletMap {
    host: HtmlElement,
    map: Option<JsLeafletMap>,
    markers: Vec<JsLayer>,
    zoom_handler: Option<Closure<dyn FnMut()>>,
    close_listener: Option<ListenerHandle>,
    /// Handle JS del mapa, compartido con el host para el detalle de `map-ready`
    handle_slot: Rc<RefCell<Option<JsValue>>>,
}

impl LeafletMap {
    pub fn new(host: HtmlElement, handle_slot: Rc<RefCell<Option<JsValue>>>) -> Self {
        Self {
            host,
            map: None,
            markers: Vec::new(),
            zoom_handler: None,
            close_listener: None,
            handle_slot,
        }
    }

    fn live_map(&self) -> Result<&JsLeafletMap, MapError> {
        self.map.as_ref().ok_or(MapError::NotReady)
    }

    fn map_element(&self) -> Result<HtmlElement, MapError> {
        query_in_shadow(&self.host, ".map-container")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| MapError::Library("No .map-container element in shadow root".to_string()))
    }

    /// Leaflet crea el panel del mapa antes que las esquinas de controles,
    /// así que el tab llegaría antes a los marcadores (`tabindex="0"`).
    /// Se mueve el contenedor de controles al principio del mapa.
    fn move_controls_first(&self) -> Result<(), MapError> {
        let container = self.map_element()?;
        let controls = container
            .query_selector(".leaflet-control-container")
            .map_err(js_error)?
            .ok_or_else(|| MapError::Library("No .leaflet-control-container in map".to_string()))?;
        container
            .insert_before(&controls, container.first_child().as_ref())
            .map_err(js_error)?;
        Ok(())
    }

    /// Botón de cierre propio del popup (`data-action="close-popup"`)
    fn wire_popup_close(&mut self, container: &HtmlElement, map: &JsLeafletMap) {
        let map = map.clone();
        let listener = ListenerHandle::new(container.as_ref(), "click", move |event: Event| {
            let hit = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-action=\"close-popup\"]").ok().flatten());
            if hit.is_some() {
                map.close_popup();
            }
        });
        match listener {
            Ok(handle) => self.close_listener = Some(handle),
            Err(e) => log::warn!("🗺️ ⚠️ No se pudo registrar el cierre de popups: {:?}", e),
        }
    }
}

impl MapAdapter for LeafletMap {
    fn create(&mut self, options: &MapOptions) -> Result<(), MapError> {
        if self.map.is_some() {
            return Err(MapError::AlreadyInitialized);
        }
        let container = self.map_element()?;
        let map = l_map(&container, &to_js(options)?).map_err(js_error)?;
        self.wire_popup_close(&container, &map);
        *self.handle_slot.borrow_mut() = Some(map.clone().into());
        self.map = Some(map);
        Ok(())
    }

    fn add_tile_layer(&mut self, layer: &TileLayerSpec) -> Result<(), MapError> {
        let map = self.live_map()?;
        let tiles = l_tile_layer(&layer.url_template, &to_js(layer)?).map_err(js_error)?;
        tiles.add_to(map).map_err(js_error)?;
        Ok(())
    }

    fn add_zoom_control(&mut self, control: &ZoomControlSpec) -> Result<(), MapError> {
        let map = self.live_map()?;
        let zoom = l_control_zoom(&to_js(control)?).map_err(js_error)?;
        zoom.add_to(map).map_err(js_error)?;
        self.move_controls_first()
    }

    fn set_attribution_prefix(&mut self, prefix: &str) -> Result<(), MapError> {
        let control = self
            .live_map()?
            .attribution_control()
            .ok_or_else(|| MapError::Library("Attribution control disabled".to_string()))?;
        control.set_prefix(prefix);
        Ok(())
    }

    fn add_attribution(&mut self, text: &str) -> Result<(), MapError> {
        let control = self
            .live_map()?
            .attribution_control()
            .ok_or_else(|| MapError::Library("Attribution control disabled".to_string()))?;
        control.add_attribution(text);
        Ok(())
    }

    fn add_marker(&mut self, marker: &MarkerSpec) -> Result<(), MapError> {
        let map = self.live_map()?;

        let icon_options = js_sys::Object::new();
        let set = |target: &js_sys::Object, key: &str, value: &JsValue| {
            js_sys::Reflect::set(target, &JsValue::from_str(key), value).map_err(js_error)
        };
        set(&icon_options, "className", &JsValue::from_str(&marker.icon_class))?;
        set(&icon_options, "html", &JsValue::from_str("<span aria-hidden=\"true\">📷</span>"))?;
        set(&icon_options, "iconSize", &latlng_to_js(LatLng::new(32.0, 32.0)))?;

        let options = js_sys::Object::new();
        set(&options, "icon", &l_div_icon(&icon_options))?;
        set(&options, "title", &JsValue::from_str(&marker.title))?;
        set(&options, "alt", &JsValue::from_str(&marker.title))?;
        set(&options, "keyboard", &JsValue::TRUE)?;

        let popup_options = js_sys::Object::new();
        set(&popup_options, "closeButton", &JsValue::FALSE)?;
        set(&popup_options, "maxWidth", &JsValue::from_f64(240.0))?;

        let layer = l_marker(&latlng_to_js(marker.position), &options).map_err(js_error)?;
        layer.bind_popup(&marker.popup_html, &popup_options);
        layer.add_to(map).map_err(js_error)?;
        self.markers.push(layer);
        Ok(())
    }

    fn clear_markers(&mut self) {
        for marker in self.markers.drain(..) {
            marker.remove();
        }
    }

    fn marker_count(&self) -> usize {
        self.markers.len()
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<(), MapError> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!("{}, {}", center.lat, center.lng)));
        }
        self.live_map()?
            .set_view(&latlng_to_js(center), zoom)
            .map_err(js_error)?;
        Ok(())
    }

    fn view(&self) -> Option<MapView> {
        let map = self.map.as_ref()?;
        let center = map.get_center();
        Some(MapView::new(LatLng::new(center.lat(), center.lng()), map.get_zoom()))
    }

    fn on_zoom_change(&mut self, listener: Box<dyn Fn(f64)>) {
        let Some(map) = self.map.clone() else {
            log::warn!("🗺️ ⚠️ on_zoom_change sin mapa, listener ignorado");
            return;
        };
        let reader = map.clone();
        let handler = Closure::wrap(Box::new(move || listener(reader.get_zoom())) as Box<dyn FnMut()>);
        map.on("zoomend", handler.as_ref().unchecked_ref());
        if let Some(previous) = self.zoom_handler.replace(handler) {
            map.off("zoomend", previous.as_ref().unchecked_ref());
        }
    }

    fn remove(&mut self) {
        self.clear_markers();
        if let Some(map) = self.map.take() {
            if let Some(handler) = self.zoom_handler.take() {
                map.off("zoomend", handler.as_ref().unchecked_ref());
            }
            map.remove();
        }
        // El ListenerHandle quita el listener al soltarse
        self.close_listener = None;
        self.handle_slot.borrow_mut().take();
    }
}

impl Drop for LeafletMap {
    fn drop(&mut self) {
        self.remove();
    }
}
