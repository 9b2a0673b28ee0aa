// ============================================================================
// MAP VIEWMODEL - Preparación de datos para el mapa
// ============================================================================
// SOLO lógica de preparación de datos - Sin estado, sin DOM
// ============================================================================

use url::Url;

use crate::config::{MissingLocationPolicy, PhotoConfig};
use crate::models::{LatLng, Photo};
use crate::utils::html::dom_id;
use crate::utils::{UNSPLASH_HOME, UTM_MEDIUM, UTM_SOURCE};

/// Posición final de un marcador
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPosition {
    pub latlng: LatLng,
    /// `true` si la foto no traía ubicación y se colocó junto al centro por defecto
    pub jittered: bool,
}

/// Datos del popup de una foto (la vista los convierte en HTML)
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub dialog_id: String,
    pub heading_id: String,
    pub thumb_src: String,
    pub thumb_alt: String,
    pub credit: String,
    pub attribution_href: String,
    pub link_text: String,
    pub close_label: String,
}

/// Un marcador de foto listo para el mapa
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoMarker {
    pub photo_id: String,
    pub position: ResolvedPosition,
    pub title: String,
    pub popup: PopupView,
}

/// ViewModel del mapa - SOLO lógica de negocio
pub struct MapViewModel;

impl MapViewModel {
    /// Desplazamiento determinista en [-max, max] por eje, derivado del id
    pub fn jitter_offset(id: &str, max_degrees: f64) -> (f64, f64) {
        // FNV-1a de 64 bits: estable entre ejecuciones y plataformas
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in id.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        let unit = |bits: u64| (bits & 0xffff) as f64 / 65535.0 * 2.0 - 1.0;
        (unit(hash) * max_degrees, unit(hash >> 16) * max_degrees)
    }

    /// Coordenada del marcador según la política para fotos sin ubicación
    pub fn resolve_position(
        photo: &Photo,
        default_center: LatLng,
        config: &PhotoConfig,
    ) -> Option<ResolvedPosition> {
        if let Some(latlng) = photo.resolvable_location() {
            return Some(ResolvedPosition { latlng, jittered: false });
        }

        match config.missing_location_policy {
            MissingLocationPolicy::Skip => {
                log::warn!("📍 Foto {} sin ubicación, descartada", photo.id);
                None
            }
            MissingLocationPolicy::Jitter => {
                let (dlat, dlng) = Self::jitter_offset(&photo.id, config.jitter_degrees.abs());
                let latlng = LatLng::new(
                    (default_center.lat + dlat).clamp(-90.0, 90.0),
                    (default_center.lng + dlng).clamp(-180.0, 180.0),
                );
                log::warn!(
                    "📍 Foto {} sin ubicación, colocada junto al centro por defecto ({:.4}, {:.4})",
                    photo.id, latlng.lat, latlng.lng
                );
                Some(ResolvedPosition { latlng, jittered: true })
            }
        }
    }

    /// Enlace a la foto con los parámetros de referencia que pide Unsplash
    pub fn attribution_href(link: &str) -> String {
        let mut url = Url::parse(link)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .or_else(|| Url::parse(UNSPLASH_HOME).ok());
        match url.as_mut() {
            Some(url) => {
                url.query_pairs_mut()
                    .append_pair("utm_source", UTM_SOURCE)
                    .append_pair("utm_medium", UTM_MEDIUM);
                url.to_string()
            }
            None => UNSPLASH_HOME.to_string(),
        }
    }

    pub fn build_popup(photo: &Photo) -> PopupView {
        PopupView {
            dialog_id: dom_id("photo-popup", &photo.id),
            heading_id: dom_id("photo-title", &photo.id),
            thumb_src: photo.thumb_url.clone(),
            thumb_alt: photo.alt_text.clone(),
            credit: format!("Photo by {}", photo.author_name),
            attribution_href: Self::attribution_href(&photo.link_url),
            link_text: "View on Unsplash".to_string(),
            close_label: "Close photo details".to_string(),
        }
    }

    /// Convertir fotos en marcadores, en el mismo orden que la fuente
    pub fn prepare_markers(photos: &[Photo], default_center: LatLng, config: &PhotoConfig) -> Vec<PhotoMarker> {
        let markers: Vec<PhotoMarker> = photos
            .iter()
            .filter_map(|photo| {
                let position = Self::resolve_position(photo, default_center, config)?;
                Some(PhotoMarker {
                    photo_id: photo.id.clone(),
                    position,
                    title: format!("Photo by {}", photo.author_name),
                    popup: Self::build_popup(photo),
                })
            })
            .collect();

        let jittered = markers.iter().filter(|m| m.position.jittered).count();
        log::info!(
            "📍 Preparados {} marcadores (de {} fotos, {} sin ubicación real)",
            markers.len(),
            photos.len(),
            jittered
        );
        markers
    }

    /// Etiqueta ARIA del host tras un cambio de zoom
    pub fn zoom_aria_label(zoom: f64) -> String {
        format!(
            "Map at zoom level {}. Use arrow keys to pan, plus and minus to zoom.",
            zoom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{photo_at, photo_without_location};

    const CENTER: LatLng = LatLng::new(51.505, -0.09);

    #[test]
    fn real_locations_are_kept() {
        let photo = photo_at("p1", 45.5152, -122.6784);
        let pos = MapViewModel::resolve_position(&photo, CENTER, &PhotoConfig::default()).unwrap();
        assert_eq!(pos.latlng, LatLng::new(45.5152, -122.6784));
        assert!(!pos.jittered);
    }

    #[test]
    fn missing_location_is_jittered_near_center() {
        let config = PhotoConfig::default();
        let photo = photo_without_location("nowhere");
        let pos = MapViewModel::resolve_position(&photo, CENTER, &config).unwrap();
        assert!(pos.jittered);
        assert!((pos.latlng.lat - CENTER.lat).abs() <= config.jitter_degrees + 1e-9);
        assert!((pos.latlng.lng - CENTER.lng).abs() <= config.jitter_degrees + 1e-9);
    }

    #[test]
    fn jitter_is_deterministic_and_spreads_ids() {
        assert_eq!(
            MapViewModel::jitter_offset("abc", 0.02),
            MapViewModel::jitter_offset("abc", 0.02)
        );
        assert_ne!(
            MapViewModel::jitter_offset("abc", 0.02),
            MapViewModel::jitter_offset("abd", 0.02)
        );
    }

    #[test]
    fn skip_policy_drops_unlocated_photos() {
        let config = PhotoConfig {
            missing_location_policy: MissingLocationPolicy::Skip,
            ..PhotoConfig::default()
        };
        let photos = vec![
            photo_at("a", 1.0, 1.0),
            photo_without_location("b"),
            photo_at("c", 3.0, 3.0),
        ];
        let markers = MapViewModel::prepare_markers(&photos, CENTER, &config);
        let ids: Vec<_> = markers.iter().map(|m| m.photo_id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn attribution_href_adds_referral_params() {
        let href = MapViewModel::attribution_href("https://unsplash.com/photos/abc");
        assert_eq!(
            href,
            "https://unsplash.com/photos/abc?utm_source=picognito&utm_medium=referral"
        );
    }

    #[test]
    fn attribution_href_rejects_non_http_links() {
        let href = MapViewModel::attribution_href("javascript:alert(1)");
        assert!(href.starts_with("https://unsplash.com/?"));
        assert!(href.contains("utm_source=picognito"));
    }

    #[test]
    fn popup_has_credit_and_ids() {
        let popup = MapViewModel::build_popup(&photo_at("x y", 1.0, 1.0));
        assert_eq!(popup.dialog_id, "photo-popup-x-y");
        assert_eq!(popup.heading_id, "photo-title-x-y");
        assert!(popup.credit.starts_with("Photo by "));
        assert_eq!(popup.link_text, "View on Unsplash");
    }

    #[test]
    fn zoom_label_mentions_level() {
        assert_eq!(
            MapViewModel::zoom_aria_label(15.0),
            "Map at zoom level 15. Use arrow keys to pan, plus and minus to zoom."
        );
    }
}
