// ============================================================================
// ELEMENT REGISTRY - Registro de <map-container>, <site-header>, <site-footer>
// ============================================================================
// Rust no puede extender HTMLElement: se crea una clase JS mínima que
// delega cada callback del ciclo de vida en closures de Rust. Cada
// instancia recibe un id; su controlador vive en INSTANCES solo mientras
// el elemento está conectado.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::host::DomHost;
use crate::components::MapContainer;
use crate::config::CONFIG;
use crate::dom::{add_class, window};
use crate::maps::leaflet::LeafletMap;
use crate::services::{BrowserGeolocation, UnsplashClient};
use crate::state::InstanceRegistry;
use crate::utils::*;
use crate::views::{render_footer, render_header};

type DomMapContainer = MapContainer<LeafletMap, UnsplashClient, BrowserGeolocation, DomHost>;

/// Retardo del fade-in tras conectar
const FADE_IN_DELAY_MS: u32 = 10;

thread_local! {
    static DEFINED: Cell<bool> = Cell::new(false);
    static INSTANCES: RefCell<InstanceRegistry<DomMapContainer>> = RefCell::new(InstanceRegistry::new());
}

const MAP_ELEMENT_CLASS: &str = r#"
return class extends HTMLElement {
    static get observedAttributes() { return observed; }
    constructor() { super(); this.__mapId = hooks.nextId(); }
    connectedCallback() { hooks.connected(this.__mapId, this); }
    disconnectedCallback() { hooks.disconnected(this.__mapId); }
    attributeChangedCallback(name, oldValue, newValue) {
        hooks.attributeChanged(this.__mapId, name, oldValue, newValue);
    }
    getZoom() { return hooks.getZoom(this.__mapId); }
    getCenter() { return hooks.getCenter(this.__mapId); }
    requestGeolocation() { return hooks.requestGeolocation(this.__mapId); }
};
"#;

const CHROME_ELEMENT_CLASS: &str = r#"
return class extends HTMLElement {
    connectedCallback() { this.innerHTML = render(this.getAttribute("active")); }
};
"#;

/// Registrar los custom elements. Llamarlo más de una vez no hace nada.
pub fn define_elements() -> Result<(), JsValue> {
    if DEFINED.with(|d| d.replace(true)) {
        log::debug!("🧩 Elementos ya registrados");
        return Ok(());
    }

    let registry = window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .custom_elements();

    define_if_absent(&registry, MAP_CONTAINER_TAG, &map_element_class()?)?;
    define_if_absent(
        &registry,
        SITE_HEADER_TAG,
        &chrome_element_class(|active| render_header(active.as_deref()))?,
    )?;
    define_if_absent(
        &registry,
        SITE_FOOTER_TAG,
        &chrome_element_class(|_| render_footer(current_year()))?,
    )?;

    log::info!("🧩 Custom elements registrados");
    Ok(())
}

fn define_if_absent(
    registry: &web_sys::CustomElementRegistry,
    tag: &str,
    class: &Function,
) -> Result<(), JsValue> {
    if !registry.get(tag).is_undefined() {
        log::warn!("🧩 <{}> ya estaba definido", tag);
        return Ok(());
    }
    registry.define(tag, class)
}

fn current_year() -> i32 {
    js_sys::Date::new_0().get_full_year() as i32
}

fn chrome_element_class(render: impl Fn(Option<String>) -> String + 'static) -> Result<Function, JsValue> {
    let render = Closure::wrap(Box::new(render) as Box<dyn Fn(Option<String>) -> String>);
    let factory = Function::new_with_args("render", CHROME_ELEMENT_CLASS);
    let class = factory.call1(&JsValue::NULL, &render.into_js_value())?;
    class.dyn_into::<Function>()
}

fn map_element_class() -> Result<Function, JsValue> {
    let hooks = Object::new();

    // Los elementos definidos viven lo que la página: las closures también
    set_hook(&hooks, "nextId", Closure::wrap(Box::new(next_id) as Box<dyn Fn() -> u32>))?;
    set_hook(&hooks, "connected", Closure::wrap(Box::new(connected) as Box<dyn Fn(u32, HtmlElement)>))?;
    set_hook(&hooks, "disconnected", Closure::wrap(Box::new(disconnected) as Box<dyn Fn(u32)>))?;
    set_hook(
        &hooks,
        "attributeChanged",
        Closure::wrap(Box::new(attribute_changed)
            as Box<dyn Fn(u32, String, Option<String>, Option<String>)>),
    )?;
    set_hook(&hooks, "getZoom", Closure::wrap(Box::new(get_zoom) as Box<dyn Fn(u32) -> f64>))?;
    set_hook(&hooks, "getCenter", Closure::wrap(Box::new(get_center) as Box<dyn Fn(u32) -> JsValue>))?;
    set_hook(
        &hooks,
        "requestGeolocation",
        Closure::wrap(Box::new(request_geolocation) as Box<dyn Fn(u32) -> js_sys::Promise>),
    )?;

    let observed: Array = OBSERVED_ATTRIBUTES.iter().map(|name| JsValue::from_str(name)).collect();
    let factory = Function::new_with_args("hooks, observed", MAP_ELEMENT_CLASS);
    let class = factory.call2(&JsValue::NULL, &hooks, &observed)?;
    class.dyn_into::<Function>()
}

fn set_hook<T: ?Sized + wasm_bindgen::closure::WasmClosure>(
    hooks: &Object,
    name: &str,
    closure: Closure<T>,
) -> Result<(), JsValue> {
    Reflect::set(hooks, &JsValue::from_str(name), &closure.into_js_value())?;
    Ok(())
}

fn container_of(id: u32) -> Option<DomMapContainer> {
    INSTANCES.with(|i| i.borrow().get(id))
}

// ----------------------------------------------------------------------------
// Callbacks del ciclo de vida
// ----------------------------------------------------------------------------

fn next_id() -> u32 {
    INSTANCES.with(|i| i.borrow_mut().next_id())
}

fn connected(id: u32, element: HtmlElement) {
    // Un elemento re-insertado arranca con un controlador nuevo
    let live = container_of(id).filter(|c| !c.lifecycle().is_disposed());
    if live.is_some() {
        return;
    }

    let map_handle = Rc::new(RefCell::new(None));
    let container = MapContainer::new(
        LeafletMap::new(element.clone(), map_handle.clone()),
        UnsplashClient::from_config(&CONFIG),
        BrowserGeolocation,
        DomHost::new(element.clone(), map_handle),
        &CONFIG,
    );

    // Atributos ya presentes en el HTML
    for name in OBSERVED_ATTRIBUTES {
        if let Some(value) = element.get_attribute(name) {
            container.attribute_changed(name, None, Some(&value));
        }
    }

    INSTANCES.with(|i| i.borrow_mut().mount(id, container.clone()));

    Timeout::new(FADE_IN_DELAY_MS, move || {
        if let Err(e) = add_class(element.as_ref(), "visible") {
            log::warn!("⚠️ No se pudo mostrar el mapa: {:?}", e);
        }
    })
    .forget();

    wasm_bindgen_futures::spawn_local(async move {
        container.connect().await;
    });
}

fn disconnected(id: u32) {
    let container = INSTANCES.with(|i| i.borrow_mut().unmount(id));
    if let Some(container) = container {
        container.disconnect();
    }
}

fn attribute_changed(id: u32, name: String, old_value: Option<String>, new_value: Option<String>) {
    // Antes de conectar se leen en connected()
    if let Some(container) = container_of(id) {
        container.attribute_changed(&name, old_value.as_deref(), new_value.as_deref());
    }
}

fn get_zoom(id: u32) -> f64 {
    container_of(id).map(|c| c.get_zoom()).unwrap_or(0.0)
}

fn get_center(id: u32) -> JsValue {
    let center = container_of(id).map(|c| c.get_center()).unwrap_or_default();
    serde_wasm_bindgen::to_value(&center).unwrap_or(JsValue::NULL)
}

fn request_geolocation(id: u32) -> js_sys::Promise {
    let container = container_of(id);
    wasm_bindgen_futures::future_to_promise(async move {
        let moved = match container {
            Some(container) => container.request_geolocation().await,
            None => false,
        };
        Ok(JsValue::from_bool(moved))
    })
}
