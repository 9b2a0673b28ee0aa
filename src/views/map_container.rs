// ============================================================================
// MAP CONTAINER VIEW - Shell del shadow DOM
// ============================================================================

use crate::utils::html::escape;
use crate::utils::KEYBOARD_HINT;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

const SHELL_STYLE: &str = r#"
    :host {
        display: block;
        height: 100%;
        width: 100%;
        opacity: 0;
        transition: opacity 0.3s ease-in-out;
    }
    :host(.visible) {
        opacity: 1;
    }
    .map-container {
        height: 100%;
        width: 100%;
        z-index: 1;
    }
    .sr-only {
        position: absolute;
        width: 1px;
        height: 1px;
        padding: 0;
        margin: -1px;
        overflow: hidden;
        clip: rect(0, 0, 0, 0);
        border: 0;
    }
    .photo-marker {
        display: flex;
        align-items: center;
        justify-content: center;
        border-radius: 50%;
        background: #fff;
        box-shadow: 0 1px 4px rgba(0, 0, 0, 0.4);
    }
    .photo-popup img {
        width: 100px;
        height: auto;
        display: block;
    }
    .photo-popup-close {
        float: right;
        border: none;
        background: transparent;
        font-size: 1.2rem;
        cursor: pointer;
    }
"#;

/// Modelo de vista del shell
#[derive(Debug, Clone, PartialEq)]
pub struct ShellView {
    pub container_class: String,
    pub role: String,
    pub aria_label: String,
    pub busy: bool,
    pub hint_id: String,
    pub keyboard_hint: String,
}

impl Default for ShellView {
    fn default() -> Self {
        Self {
            container_class: "map-container".to_string(),
            role: "application".to_string(),
            aria_label: "Interactive map showing photos around you".to_string(),
            busy: true,
            hint_id: "map-keyboard-hint".to_string(),
            keyboard_hint: KEYBOARD_HINT.to_string(),
        }
    }
}

/// Renderizar el shell (estilos + contenedor del mapa + slot)
pub fn render_shell(view: &ShellView) -> String {
    format!(
        r#"<link rel="stylesheet" href="{css}">
<style>{style}</style>
<div class="{class}" part="container" role="{role}" aria-label="{label}" aria-busy="{busy}" aria-describedby="{hint_id}" tabindex="0"></div>
<p id="{hint_id}" class="sr-only">{hint}</p>
<slot></slot>"#,
        css = LEAFLET_CSS,
        style = SHELL_STYLE,
        class = escape(&view.container_class),
        role = escape(&view.role),
        label = escape(&view.aria_label),
        busy = view.busy,
        hint_id = escape(&view.hint_id),
        hint = escape(&view.keyboard_hint),
    )
}

/// Atribución de Unsplash para el control de atribución del mapa
pub fn render_photo_attribution(href: &str) -> String {
    format!(
        r#"<span class="photo-attribution">Photos from <a href="{}" target="_blank" rel="noopener noreferrer">Unsplash</a></span>"#,
        escape(href)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_has_accessible_container() {
        let html = render_shell(&ShellView::default());
        assert!(html.contains(r#"class="map-container""#));
        assert!(html.contains(r#"role="application""#));
        assert!(html.contains(r#"aria-label="Interactive map showing photos around you""#));
        assert!(html.contains(r#"aria-busy="true""#));
        assert!(html.contains(r#"aria-describedby="map-keyboard-hint""#));
        assert!(html.contains("<slot></slot>"));
    }

    #[test]
    fn shell_escapes_labels() {
        let view = ShellView {
            aria_label: "Map \"<b>\"".to_string(),
            ..ShellView::default()
        };
        let html = render_shell(&view);
        assert!(html.contains("aria-label=\"Map &quot;&lt;b&gt;&quot;\""));
    }

    #[test]
    fn photo_attribution_links_to_unsplash() {
        let html = render_photo_attribution("https://unsplash.com/?utm_source=picognito&utm_medium=referral");
        assert!(html.contains(r#"class="photo-attribution""#));
        assert!(html.contains(">Unsplash</a>"));
        assert!(html.contains("utm_source=picognito&amp;utm_medium=referral"));
    }
}
