pub mod api_client;
pub mod geolocation;
pub mod photo_service;

pub use api_client::UnsplashClient;
pub use geolocation::GeolocationProvider;
pub use photo_service::{load_photos_with_fallback, PhotoBatch, PhotoOrigin, PhotoSource};

#[cfg(target_arch = "wasm32")]
pub use geolocation::BrowserGeolocation;
