// ============================================================================
// DOM HOST - ElementHost sobre el HTMLElement real
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::components::{ElementHost, MapEvent};
use crate::dom::{dispatch_custom_event, set_attribute, set_shadow_html};
use crate::error::MapError;
use crate::maps::leaflet::js_error;

pub struct DomHost {
    element: HtmlElement,
    /// Handle del mapa Leaflet, lo rellena `LeafletMap::create`
    map_handle: Rc<RefCell<Option<JsValue>>>,
}

impl DomHost {
    pub fn new(element: HtmlElement, map_handle: Rc<RefCell<Option<JsValue>>>) -> Self {
        Self { element, map_handle }
    }

    fn detail(&self, event: &MapEvent) -> Result<JsValue, JsValue> {
        let detail = Object::new();
        match event {
            MapEvent::Ready { view } => {
                let map = self.map_handle.borrow().clone().unwrap_or(JsValue::NULL);
                Reflect::set(&detail, &"map".into(), &map)?;
                Reflect::set(
                    &detail,
                    &"center".into(),
                    &serde_wasm_bindgen::to_value(&view.center)?,
                )?;
                Reflect::set(&detail, &"zoom".into(), &JsValue::from_f64(view.zoom))?;
            }
            MapEvent::Error { message } => {
                Reflect::set(&detail, &"error".into(), &JsValue::from_str(message))?;
            }
        }
        Ok(detail.into())
    }
}

impl ElementHost for DomHost {
    fn render(&self, html: &str) -> Result<(), MapError> {
        set_shadow_html(&self.element, html).map_err(js_error)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = set_attribute(self.element.as_ref(), name, value) {
            log::warn!("⚠️ No se pudo establecer {}: {:?}", name, e);
        }
    }

    fn dispatch(&self, event: &MapEvent) {
        let sent = self
            .detail(event)
            .and_then(|detail| dispatch_custom_event(self.element.as_ref(), event.name(), &detail));
        if let Err(e) = sent {
            log::error!("❌ No se pudo despachar {}: {:?}", event.name(), e);
        }
    }
}
