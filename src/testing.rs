// Fakes compartidos por los tests del crate

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;

use crate::components::{ElementHost, MapEvent};
use crate::error::{GeolocationError, MapError, PhotoError};
use crate::models::{LatLng, Photo};
use crate::services::{GeolocationProvider, PhotoSource};

pub fn photo_at(id: &str, lat: f64, lng: f64) -> Photo {
    Photo {
        location: Some(LatLng::new(lat, lng)),
        ..photo_without_location(id)
    }
}

pub fn photo_without_location(id: &str) -> Photo {
    Photo {
        id: id.to_string(),
        author_name: "Tester".to_string(),
        thumb_url: format!("https://images.unsplash.com/{}-thumb.jpg", id),
        alt_text: format!("A photo of {}", id),
        link_url: format!("https://unsplash.com/photos/{}", id),
        location: None,
    }
}

/// Fuente de fotos con respuesta fija. `gated` no responde hasta que
/// se envía por el canal, para simular un fetch en vuelo.
pub struct FakePhotoSource {
    result: Result<Vec<Photo>, PhotoError>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    requested: RefCell<Vec<usize>>,
}

impl FakePhotoSource {
    pub fn ok(photos: Vec<Photo>) -> Self {
        Self {
            result: Ok(photos),
            gate: RefCell::new(None),
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn err(error: PhotoError) -> Self {
        Self {
            result: Err(error),
            ..Self::ok(Vec::new())
        }
    }

    pub fn gated(photos: Vec<Photo>, gate: oneshot::Receiver<()>) -> Self {
        Self {
            gate: RefCell::new(Some(gate)),
            ..Self::ok(photos)
        }
    }

    pub fn requested(&self) -> Vec<usize> {
        self.requested.borrow().clone()
    }
}

impl PhotoSource for FakePhotoSource {
    async fn fetch_photos(&self, count: usize) -> Result<Vec<Photo>, PhotoError> {
        self.requested.borrow_mut().push(count);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.result.clone()
    }
}

pub struct FakeGeolocation {
    available: bool,
    result: Result<LatLng, GeolocationError>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    calls: Rc<Cell<usize>>,
}

impl FakeGeolocation {
    pub fn at(position: LatLng) -> Self {
        Self {
            available: true,
            result: Ok(position),
            gate: RefCell::new(None),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::at(LatLng::ZERO)
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self {
            result: Err(error),
            ..Self::at(LatLng::ZERO)
        }
    }

    pub fn gated(position: LatLng, gate: oneshot::Receiver<()>) -> Self {
        Self {
            gate: RefCell::new(Some(gate)),
            ..Self::at(position)
        }
    }

    pub fn calls(&self) -> Rc<Cell<usize>> {
        self.calls.clone()
    }
}

impl GeolocationProvider for FakeGeolocation {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        self.calls.set(self.calls.get() + 1);
        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.result.clone()
    }
}

/// Host que guarda lo que el contenedor le pide
#[derive(Default)]
pub struct RecordingHost {
    rendered: RefCell<Option<String>>,
    attributes: RefCell<HashMap<String, String>>,
    events: RefCell<Vec<MapEvent>>,
}

impl RecordingHost {
    pub fn rendered(&self) -> Option<String> {
        self.rendered.borrow().clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    pub fn events(&self) -> Vec<MapEvent> {
        self.events.borrow().clone()
    }
}

impl ElementHost for RecordingHost {
    fn render(&self, html: &str) -> Result<(), MapError> {
        *self.rendered.borrow_mut() = Some(html.to_string());
        Ok(())
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn dispatch(&self, event: &MapEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
