// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Shadow root abierto del host (lo crea si no existe)
pub fn ensure_shadow_root(host: &HtmlElement) -> Result<ShadowRoot, JsValue> {
    if let Some(root) = host.shadow_root() {
        return Ok(root);
    }
    let init = ShadowRootInit::new(ShadowRootMode::Open);
    host.attach_shadow(&init)
}

/// Buscar dentro del shadow root del host
pub fn query_in_shadow(host: &HtmlElement, selector: &str) -> Option<Element> {
    host.shadow_root()?.query_selector(selector).ok().flatten()
}

/// Reemplazar el contenido del shadow root
pub fn set_shadow_html(host: &HtmlElement, html: &str) -> Result<(), JsValue> {
    ensure_shadow_root(host)?.set_inner_html(html);
    Ok(())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Agregar clase
pub fn add_class(element: &Element, class: &str) -> Result<(), JsValue> {
    element.class_list().add_1(class)
}
