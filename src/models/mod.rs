pub mod geo;
pub mod photo;

pub use geo::{LatLng, MapView};
pub use photo::{sample, Photo, UnsplashPhoto};
