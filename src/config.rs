use serde::{Deserialize, Serialize};

use crate::models::LatLng;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub unsplash_api_url: String,
    pub unsplash_access_key: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub photo_config: PhotoConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            unsplash_api_url: "https://api.unsplash.com".to_string(),
            unsplash_access_key: "YOUR_ACCESS_KEY".to_string(),
            enable_logging: true,
            map_config: MapConfig::default(),
            photo_config: PhotoConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
    /// Zoom fijo al recentrar con geolocalización
    pub recenter_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: 51.505,
            default_center_lng: -0.09,
            default_zoom: 13.0,
            recenter_zoom: 15.0,
            max_zoom: 19.0,
        }
    }
}

impl MapConfig {
    pub fn default_center(&self) -> LatLng {
        LatLng::new(self.default_center_lat, self.default_center_lng)
    }
}

/// Qué hacer con fotos sin coordenadas utilizables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingLocationPolicy {
    /// Colocar cerca del centro por defecto con un desplazamiento acotado
    Jitter,
    /// Descartar la foto
    Skip,
}

impl MissingLocationPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "jitter" => Some(Self::Jitter),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoConfig {
    pub batch_size: usize,
    pub missing_location_policy: MissingLocationPolicy,
    /// Desplazamiento máximo (en grados, por eje) para fotos sin ubicación
    pub jitter_degrees: f64,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            missing_location_policy: MissingLocationPolicy::Jitter,
            jitter_degrees: 0.02,
        }
    }
}

pub const DEFAULT_BATCH_SIZE: usize = 3;
pub const MAX_BATCH_SIZE: usize = 5;

impl PhotoConfig {
    /// Tamaño de lote acotado a 1..=5
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            unsplash_api_url: option_env!("UNSPLASH_API_URL")
                .unwrap_or("https://api.unsplash.com").to_string(),
            unsplash_access_key: option_env!("UNSPLASH_ACCESS_KEY")
                .unwrap_or("YOUR_ACCESS_KEY").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            map_config: MapConfig {
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.map_config.default_center_lat),
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.map_config.default_center_lng),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.map_config.default_zoom),
                recenter_zoom: option_env!("RECENTER_ZOOM")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.map_config.recenter_zoom),
                max_zoom: defaults.map_config.max_zoom,
            },
            photo_config: PhotoConfig {
                batch_size: option_env!("PHOTO_BATCH_SIZE")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_BATCH_SIZE),
                missing_location_policy: option_env!("MISSING_LOCATION_POLICY")
                    .and_then(MissingLocationPolicy::parse)
                    .unwrap_or(MissingLocationPolicy::Jitter),
                jitter_degrees: option_env!("JITTER_DEGREES")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.photo_config.jitter_degrees),
            },
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// La clave por defecto es un placeholder; con ella la API siempre responde 401
    pub fn has_real_access_key(&self) -> bool {
        !self.unsplash_access_key.is_empty() && self.unsplash_access_key != "YOUR_ACCESS_KEY"
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_is_clamped() {
        let mut photos = PhotoConfig::default();
        assert_eq!(photos.effective_batch_size(), 3);
        photos.batch_size = 0;
        assert_eq!(photos.effective_batch_size(), 1);
        photos.batch_size = 40;
        assert_eq!(photos.effective_batch_size(), MAX_BATCH_SIZE);
    }

    #[test]
    fn policy_parsing_is_case_insensitive() {
        assert_eq!(MissingLocationPolicy::parse(" Skip "), Some(MissingLocationPolicy::Skip));
        assert_eq!(MissingLocationPolicy::parse("JITTER"), Some(MissingLocationPolicy::Jitter));
        assert_eq!(MissingLocationPolicy::parse("drop"), None);
    }

    #[test]
    fn placeholder_key_is_not_real() {
        let mut config = AppConfig::default();
        assert!(!config.has_real_access_key());
        config.unsplash_access_key = "abc123".to_string();
        assert!(config.has_real_access_key());
    }
}
