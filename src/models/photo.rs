use serde::{Deserialize, Serialize};

use super::LatLng;

/// Foto lista para mostrarse en el mapa (solo lectura tras crearse)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub author_name: String,
    pub thumb_url: String,
    pub alt_text: String,
    pub link_url: String,
    pub location: Option<LatLng>,
}

impl Photo {
    /// Ubicación utilizable. Unsplash devuelve `0,0` cuando no conoce la posición
    pub fn resolvable_location(&self) -> Option<LatLng> {
        self.location
            .filter(|loc| loc.is_valid())
            .filter(|loc| *loc != LatLng::ZERO)
    }
}

// ----------------------------------------------------------------------------
// DTO de la API de Unsplash (solo los campos que usamos)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsplashPhoto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user: UnsplashUser,
    #[serde(default)]
    pub urls: UnsplashUrls,
    #[serde(default)]
    pub links: UnsplashLinks,
    #[serde(default)]
    pub location: Option<UnsplashLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsplashUser {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsplashUrls {
    #[serde(default)]
    pub thumb: String,
    #[serde(default)]
    pub small: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsplashLinks {
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsplashLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<UnsplashPosition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsplashPosition {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<UnsplashPhoto> for Photo {
    fn from(raw: UnsplashPhoto) -> Self {
        let author_name = if raw.user.name.trim().is_empty() {
            "Unknown photographer".to_string()
        } else {
            raw.user.name.trim().to_string()
        };

        let alt_text = raw
            .alt_description
            .or(raw.description)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("Photo by {}", author_name));

        let location = raw
            .location
            .and_then(|loc| loc.position)
            .and_then(|pos| match (pos.latitude, pos.longitude) {
                (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
                _ => None,
            });

        Self {
            id: raw.id,
            author_name,
            thumb_url: raw.urls.thumb,
            alt_text,
            link_url: raw.links.html,
            location,
        }
    }
}

/// Datos de muestra cuando la API no responde
pub mod sample {
    use super::{LatLng, Photo};

    fn sample(id: &str, author: &str, alt: &str, slug: &str, lat: f64, lng: f64) -> Photo {
        Photo {
            id: id.to_string(),
            author_name: author.to_string(),
            thumb_url: format!("/images/samples/{}-thumb.jpg", slug),
            alt_text: alt.to_string(),
            link_url: format!("https://unsplash.com/s/photos/{}", slug),
            location: Some(LatLng::new(lat, lng)),
        }
    }

    /// Siempre 3 fotos con coordenadas conocidas, en este orden
    pub fn fallback_photos() -> Vec<Photo> {
        vec![
            sample(
                "sample-portland",
                "Picognito Samples",
                "Tilikum Crossing bridge over the Willamette River at dusk",
                "portland",
                45.5152,
                -122.6784,
            ),
            sample(
                "sample-london",
                "Picognito Samples",
                "Tower Bridge seen from the south bank of the Thames",
                "london",
                51.5055,
                -0.0754,
            ),
            sample(
                "sample-tokyo",
                "Picognito Samples",
                "Shibuya crossing at night with crowds and neon signs",
                "tokyo",
                35.6595,
                139.7005,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API_RECORD: &str = r#"{
        "id": "Dwu85P9SOIk",
        "alt_description": "gray concrete bridge under cloudy sky",
        "user": { "name": "Jane Doe", "username": "jdoe" },
        "urls": { "thumb": "https://images.unsplash.com/photo-1?w=200", "small": "https://images.unsplash.com/photo-1?w=400" },
        "links": { "html": "https://unsplash.com/photos/Dwu85P9SOIk" },
        "location": {
            "name": "Portland, Oregon",
            "position": { "latitude": 45.5152, "longitude": -122.6784 }
        }
    }"#;

    #[test]
    fn converts_api_record() {
        let raw: UnsplashPhoto = serde_json::from_str(API_RECORD).unwrap();
        let photo = Photo::from(raw);
        assert_eq!(photo.id, "Dwu85P9SOIk");
        assert_eq!(photo.author_name, "Jane Doe");
        assert_eq!(photo.alt_text, "gray concrete bridge under cloudy sky");
        assert_eq!(photo.link_url, "https://unsplash.com/photos/Dwu85P9SOIk");
        assert_eq!(photo.resolvable_location(), Some(LatLng::new(45.5152, -122.6784)));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let raw: UnsplashPhoto = serde_json::from_str(
            r#"{ "id": "x", "user": { "name": "Ana" }, "location": { "position": { "latitude": null, "longitude": 2.0 } } }"#,
        )
        .unwrap();
        let photo = Photo::from(raw);
        assert_eq!(photo.alt_text, "Photo by Ana");
        assert_eq!(photo.location, None);
        assert_eq!(photo.resolvable_location(), None);
    }

    #[test]
    fn zero_position_is_not_resolvable() {
        let raw: UnsplashPhoto = serde_json::from_str(
            r#"{ "id": "z", "user": { "name": "Bo" }, "location": { "position": { "latitude": 0, "longitude": 0 } } }"#,
        )
        .unwrap();
        let photo = Photo::from(raw);
        assert_eq!(photo.location, Some(LatLng::ZERO));
        assert_eq!(photo.resolvable_location(), None);
    }

    #[test]
    fn fallback_has_three_located_photos() {
        let photos = sample::fallback_photos();
        assert_eq!(photos.len(), 3);
        assert!(photos.iter().all(|p| p.resolvable_location().is_some()));
        assert!(photos.iter().all(|p| p.link_url.contains("unsplash.com")));
    }
}
