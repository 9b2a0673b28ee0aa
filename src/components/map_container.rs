// ============================================================================
// MAP CONTAINER - Controlador del <map-container>
// ============================================================================
// Un mapa por contenedor, marcadores de fotos, zoom/centro y geolocalización.
// Genérico sobre el adaptador de mapas, la fuente de fotos, la geolocalización
// y el host DOM, para poder ejecutarse fuera del navegador.
//
// Estados: unattached → rendering → map-initializing → {map-ready | map-error}
//          map-ready → recentering → map-ready ; cualquiera → disposed
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use super::host::{ElementHost, MapEvent};
use crate::config::{AppConfig, MapConfig, PhotoConfig};
use crate::error::MapError;
use crate::maps::{MapAdapter, MapOptions, MarkerSpec, TileLayerSpec, ZoomControlSpec};
use crate::models::{LatLng, MapView};
use crate::services::{load_photos_with_fallback, GeolocationProvider, PhotoBatch, PhotoOrigin, PhotoSource};
use crate::state::{LifecycleState, LifecycleToken};
use crate::utils::*;
use crate::viewmodels::{MapViewModel, PhotoMarker};
use crate::views::{render_photo_attribution, render_popup, render_shell, ShellView};

struct ContainerState<A> {
    adapter: A,
    lifecycle: LifecycleState,
    /// Vista pedida (config + atributos); la real la tiene el adaptador
    requested_view: MapView,
    map_config: MapConfig,
    photo_config: PhotoConfig,
    markers: Vec<PhotoMarker>,
    photo_origin: Option<PhotoOrigin>,
}

pub struct MapContainer<A, P, G, H> {
    state: Rc<RefCell<ContainerState<A>>>,
    photos: Rc<P>,
    geolocation: Rc<G>,
    host: Rc<H>,
    token: LifecycleToken,
}

impl<A, P, G, H> Clone for MapContainer<A, P, G, H> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            photos: self.photos.clone(),
            geolocation: self.geolocation.clone(),
            host: self.host.clone(),
            token: self.token.clone(),
        }
    }
}

impl<A, P, G, H> MapContainer<A, P, G, H>
where
    A: MapAdapter,
    P: PhotoSource,
    G: GeolocationProvider,
    H: ElementHost + 'static,
{
    pub fn new(adapter: A, photos: P, geolocation: G, host: H, config: &AppConfig) -> Self {
        let map_config = config.map_config.clone();
        Self {
            state: Rc::new(RefCell::new(ContainerState {
                adapter,
                lifecycle: LifecycleState::Unattached,
                requested_view: MapView::new(map_config.default_center(), map_config.default_zoom),
                map_config,
                photo_config: config.photo_config.clone(),
                markers: Vec::new(),
                photo_origin: None,
            })),
            photos: Rc::new(photos),
            geolocation: Rc::new(geolocation),
            host: Rc::new(host),
            token: LifecycleToken::new(),
        }
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.state.borrow().lifecycle
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Marcadores añadidos en la última carga, en orden de la fuente
    pub fn markers(&self) -> Vec<PhotoMarker> {
        self.state.borrow().markers.clone()
    }

    pub fn photo_origin(&self) -> Option<PhotoOrigin> {
        self.state.borrow().photo_origin
    }

    fn set_lifecycle(&self, next: LifecycleState) {
        {
            let mut state = self.state.borrow_mut();
            if state.lifecycle.is_disposed() {
                return;
            }
            state.lifecycle = next;
        }
        self.host.set_attribute("data-state", next.as_str());
    }

    /// Conectado al DOM: shell + mapa + fotos
    pub async fn connect(&self) {
        if self.lifecycle() != LifecycleState::Unattached {
            log::warn!("🗺️ ⚠️ connect() en estado {}, ignorado", self.lifecycle().as_str());
            return;
        }

        log::info!("🗺️ 🔌 Map container conectado");
        self.set_lifecycle(LifecycleState::Rendering);

        let shell = ShellView::default();
        self.host.set_attribute("role", &shell.role);
        self.host.set_attribute("aria-label", &shell.aria_label);
        self.host.set_attribute("aria-busy", "true");

        if let Err(e) = self.host.render(&render_shell(&shell)) {
            self.fail(e);
            return;
        }

        // El fallo ya quedó registrado y emitido como map-error
        let _ = self.initialize_map().await;
    }

    /// Crear el mapa, capas y controles; después cargar las fotos
    pub async fn initialize_map(&self) -> Result<(), MapError> {
        {
            let state = self.state.borrow();
            if state.lifecycle.is_disposed() {
                return Err(MapError::Disposed);
            }
            if state.adapter.is_ready() {
                log::debug!("🗺️ Mapa ya inicializado");
                return Ok(());
            }
        }

        self.set_lifecycle(LifecycleState::MapInitializing);

        let result = {
            let mut state = self.state.borrow_mut();
            let options = MapOptions::new(state.requested_view);
            let max_zoom = state.map_config.max_zoom;
            let outcome = Self::setup_map(&mut state.adapter, &options, max_zoom);
            if outcome.is_err() {
                // Nunca dejar una instancia a medio montar
                state.adapter.remove();
            }
            outcome
        };

        let view = match result {
            Ok(view) => view,
            Err(e) => {
                self.fail(e.clone());
                return Err(e);
            }
        };

        let host = self.host.clone();
        self.state.borrow_mut().adapter.on_zoom_change(Box::new(move |zoom| {
            host.set_attribute("aria-label", &MapViewModel::zoom_aria_label(zoom));
        }));

        self.set_lifecycle(LifecycleState::MapReady);
        self.host.set_attribute("aria-busy", "false");
        self.host.dispatch(&MapEvent::Ready { view });
        log::info!(
            "🗺️ 🚀 Mapa inicializado en ({}, {}) zoom {}",
            view.center.lat, view.center.lng, view.zoom
        );

        self.load_photos().await;
        Ok(())
    }

    fn setup_map(adapter: &mut A, options: &MapOptions, max_zoom: f64) -> Result<MapView, MapError> {
        adapter.create(options)?;
        adapter.add_tile_layer(&TileLayerSpec {
            url_template: TILE_URL_TEMPLATE.to_string(),
            attribution: TILE_ATTRIBUTION.to_string(),
            max_zoom,
            no_wrap: true,
        })?;
        // El adaptador deja los controles por delante de los marcadores en el orden de foco
        adapter.add_zoom_control(&ZoomControlSpec {
            position: ZOOM_CONTROL_POSITION.to_string(),
            zoom_in_title: ZOOM_IN_TITLE.to_string(),
            zoom_out_title: ZOOM_OUT_TITLE.to_string(),
        })?;
        adapter.set_attribution_prefix(KEYBOARD_HINT)?;
        adapter.add_attribution(&render_photo_attribution(&MapViewModel::attribution_href(UNSPLASH_HOME)))?;
        adapter.view().ok_or(MapError::NotReady)
    }

    fn fail(&self, error: MapError) {
        log::error!("🗺️ 💥 Error inicializando el mapa: {}", error);
        self.set_lifecycle(LifecycleState::MapError);
        self.host.set_attribute("aria-busy", "false");
        self.host.dispatch(&MapEvent::Error {
            message: error.to_string(),
        });
    }

    /// Pedir fotos (con fallback) y añadir un marcador por foto.
    /// Devuelve cuántos marcadores se añadieron.
    pub async fn load_photos(&self) -> usize {
        let generation = self.token.current();
        let (count, photo_config, center) = {
            let state = self.state.borrow();
            if !state.lifecycle.has_live_map() {
                log::warn!("📸 load_photos() sin mapa listo, ignorado");
                return 0;
            }
            (
                state.photo_config.effective_batch_size(),
                state.photo_config.clone(),
                state.map_config.default_center(),
            )
        };

        let mut batch = load_photos_with_fallback(&*self.photos, count).await;

        if !self.token.is_current(generation) {
            log::debug!("📸 Fotos recibidas tras desconectar, descartadas");
            return 0;
        }

        let mut markers = MapViewModel::prepare_markers(&batch.photos, center, &photo_config);
        if markers.is_empty() {
            // Con `Skip` un lote sin ubicaciones se queda vacío
            log::warn!("📸 Ninguna foto del lote tiene ubicación, usando fotos de muestra");
            batch = PhotoBatch::fallback();
            markers = MapViewModel::prepare_markers(&batch.photos, center, &photo_config);
        }

        let mut state = self.state.borrow_mut();
        if !state.lifecycle.has_live_map() {
            return 0;
        }
        state.adapter.clear_markers();

        let mut added = Vec::with_capacity(markers.len());
        for marker in markers {
            let spec = MarkerSpec {
                id: marker.photo_id.clone(),
                position: marker.position.latlng,
                title: marker.title.clone(),
                icon_class: PHOTO_MARKER_CLASS.to_string(),
                popup_html: render_popup(&marker.popup),
            };
            match state.adapter.add_marker(&spec) {
                Ok(()) => added.push(marker),
                Err(e) => log::error!("📍 No se pudo añadir el marcador {}: {}", marker.photo_id, e),
            }
        }

        let count = added.len();
        log::info!(
            "📸 {} marcadores de fotos en el mapa ({:?})",
            state.adapter.marker_count(),
            batch.origin
        );
        state.markers = added;
        state.photo_origin = Some(batch.origin);
        count
    }

    /// Zoom actual; 0 si no hay mapa
    pub fn get_zoom(&self) -> f64 {
        self.state.borrow().adapter.view().map(|v| v.zoom).unwrap_or(0.0)
    }

    /// Centro actual; {0, 0} si no hay mapa
    pub fn get_center(&self) -> LatLng {
        self.state
            .borrow()
            .adapter
            .view()
            .map(|v| v.center)
            .unwrap_or(LatLng::ZERO)
    }

    /// Recentrar en la posición del usuario. Nunca propaga errores:
    /// devuelve `true` solo si el mapa se movió.
    pub async fn request_geolocation(&self) -> bool {
        if !self.geolocation.is_available() {
            log::warn!("📍 Geolocalización no disponible en este navegador");
            return false;
        }
        if !self.lifecycle().has_live_map() {
            log::warn!("📍 Geolocalización pedida sin mapa listo, ignorada");
            return false;
        }

        let generation = self.token.current();
        self.set_lifecycle(LifecycleState::Recentering);

        let result = self.geolocation.current_position().await;

        if !self.token.is_current(generation) {
            log::debug!("📍 Posición recibida tras desconectar, descartada");
            return false;
        }

        let moved = match result {
            Ok(position) => {
                let zoom = self.state.borrow().map_config.recenter_zoom;
                let outcome = self.state.borrow_mut().adapter.set_view(position, zoom);
                match outcome {
                    Ok(()) => {
                        log::info!("📍 Mapa centrado en ({}, {})", position.lat, position.lng);
                        true
                    }
                    Err(e) => {
                        log::error!("📍 No se pudo centrar el mapa: {}", e);
                        false
                    }
                }
            }
            Err(e) => {
                log::warn!("📍 Error de geolocalización: {}", e);
                false
            }
        };

        self.set_lifecycle(LifecycleState::MapReady);
        moved
    }

    /// `attributeChangedCallback` para latitude / longitude / zoom.
    /// Devuelve `true` si el valor se aplicó.
    pub fn attribute_changed(&self, name: &str, old_value: Option<&str>, new_value: Option<&str>) -> bool {
        if old_value == new_value {
            return false;
        }
        let Some(raw) = new_value else {
            return false;
        };
        let Ok(value) = raw.trim().parse::<f64>() else {
            log::warn!("🗺️ ⚠️ Valor inválido para {}: {:?}", name, raw);
            return false;
        };

        let (view, live) = {
            let mut state = self.state.borrow_mut();
            if state.lifecycle.is_disposed() {
                return false;
            }
            let mut view = state.requested_view;
            match name {
                "latitude" => view.center.lat = value,
                "longitude" => view.center.lng = value,
                "zoom" => view.zoom = value,
                _ => return false,
            }
            if !view.center.is_valid() || !(0.0..=state.map_config.max_zoom).contains(&view.zoom) {
                log::warn!("🗺️ ⚠️ {}={} fuera de rango, ignorado", name, value);
                return false;
            }
            state.requested_view = view;
            (view, state.lifecycle.has_live_map())
        };

        if live {
            let outcome = self.state.borrow_mut().adapter.set_view(view.center, view.zoom);
            match outcome {
                Ok(()) => log::info!(
                    "🗺️ 🎯 Vista actualizada: ({}, {}) zoom {}",
                    view.center.lat, view.center.lng, view.zoom
                ),
                Err(e) => log::error!("🗺️ No se pudo actualizar la vista: {}", e),
            }
        }
        true
    }

    /// Desconectado del DOM: liberar mapa, marcadores y handlers
    pub fn disconnect(&self) {
        self.token.invalidate();
        {
            let mut state = self.state.borrow_mut();
            if state.lifecycle.is_disposed() {
                return;
            }
            state.adapter.clear_markers();
            state.adapter.remove();
            state.markers.clear();
            state.photo_origin = None;
        }
        self.set_lifecycle(LifecycleState::Disposed);
        log::info!("🗺️ 🧹 Mapa liberado");
    }
}
