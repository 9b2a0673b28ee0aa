// ============================================================================
// PHOTO SERVICE - Lote de fotos con fallback a datos de muestra
// ============================================================================

use crate::error::PhotoError;
use crate::models::{sample, Photo};

/// Fuente de fotos (API real o fake en tests)
#[allow(async_fn_in_trait)]
pub trait PhotoSource {
    async fn fetch_photos(&self, count: usize) -> Result<Vec<Photo>, PhotoError>;
}

/// De dónde salió el lote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoOrigin {
    Api,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoBatch {
    pub photos: Vec<Photo>,
    pub origin: PhotoOrigin,
}

impl PhotoBatch {
    pub fn fallback() -> Self {
        Self {
            photos: sample::fallback_photos(),
            origin: PhotoOrigin::Fallback,
        }
    }
}

/// Pide `count` fotos; ante cualquier fallo (o lista vacía) usa las de muestra.
/// Nunca devuelve un lote vacío y respeta el orden de la fuente.
pub async fn load_photos_with_fallback<P: PhotoSource>(source: &P, count: usize) -> PhotoBatch {
    match source.fetch_photos(count).await {
        Ok(photos) if !photos.is_empty() => {
            let mut photos = photos;
            if photos.len() > count {
                log::debug!("📸 La API devolvió {} fotos, se usan {}", photos.len(), count);
                photos.truncate(count);
            }
            log::info!("✅ {} fotos obtenidas de la API", photos.len());
            PhotoBatch {
                photos,
                origin: PhotoOrigin::Api,
            }
        }
        Ok(_) => {
            log::warn!("⚠️ La API no devolvió fotos, usando datos de muestra");
            PhotoBatch::fallback()
        }
        Err(e) => {
            log::warn!("⚠️ Error obteniendo fotos ({}), usando datos de muestra", e);
            PhotoBatch::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{photo_at, FakePhotoSource};
    use futures::executor::block_on;

    #[test]
    fn api_photos_are_used_in_order() {
        let source = FakePhotoSource::ok(vec![
            photo_at("a", 1.0, 1.0),
            photo_at("b", 2.0, 2.0),
            photo_at("c", 3.0, 3.0),
        ]);
        let batch = block_on(load_photos_with_fallback(&source, 3));
        assert_eq!(batch.origin, PhotoOrigin::Api);
        let ids: Vec<_> = batch.photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(source.requested(), vec![3]);
    }

    #[test]
    fn http_error_falls_back() {
        let source = FakePhotoSource::err(PhotoError::Status(401, "Unauthorized".into()));
        let batch = block_on(load_photos_with_fallback(&source, 3));
        assert_eq!(batch.origin, PhotoOrigin::Fallback);
        assert_eq!(batch.photos, sample::fallback_photos());
    }

    #[test]
    fn network_error_falls_back() {
        let source = FakePhotoSource::err(PhotoError::Network("offline".into()));
        let batch = block_on(load_photos_with_fallback(&source, 5));
        assert_eq!(batch.photos.len(), 3);
    }

    #[test]
    fn empty_response_falls_back() {
        let source = FakePhotoSource::ok(Vec::new());
        let batch = block_on(load_photos_with_fallback(&source, 3));
        assert_eq!(batch.origin, PhotoOrigin::Fallback);
        assert!(!batch.photos.is_empty());
    }

    #[test]
    fn oversized_response_is_truncated() {
        let photos = (0..8).map(|i| photo_at(&i.to_string(), 1.0, 1.0)).collect();
        let source = FakePhotoSource::ok(photos);
        let batch = block_on(load_photos_with_fallback(&source, 4));
        assert_eq!(batch.photos.len(), 4);
        assert_eq!(batch.photos[0].id, "0");
    }
}
