// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP con Unsplash (Stateless)
// ============================================================================

use gloo_net::http::Request;
use url::Url;

use super::photo_service::PhotoSource;
use crate::config::AppConfig;
use crate::error::PhotoError;
use crate::models::{Photo, UnsplashPhoto};

/// Cliente de Unsplash - SOLO comunicación HTTP
#[derive(Clone, Debug)]
pub struct UnsplashClient {
    base_url: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(base_url: &str, access_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: access_key.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.unsplash_api_url, &config.unsplash_access_key)
    }

    /// URL del lote de fotos aleatorias
    pub fn photos_url(&self, count: usize) -> Result<Url, PhotoError> {
        let mut url = Url::parse(&format!("{}/photos/random", self.base_url))
            .map_err(|e| PhotoError::Network(format!("Invalid API URL: {}", e)))?;
        url.query_pairs_mut().append_pair("count", &count.to_string());
        Ok(url)
    }

    pub fn authorization_header(&self) -> String {
        format!("Client-ID {}", self.access_key)
    }
}

impl PhotoSource for UnsplashClient {
    async fn fetch_photos(&self, count: usize) -> Result<Vec<Photo>, PhotoError> {
        let url = self.photos_url(count)?;

        log::info!("📸 Pidiendo {} fotos a Unsplash", count);

        let response = Request::get(url.as_str())
            .header("Authorization", &self.authorization_header())
            .header("Accept-Version", "v1")
            .send()
            .await
            .map_err(|e| PhotoError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(PhotoError::Status(response.status(), response.status_text()));
        }

        let raw = response
            .json::<Vec<UnsplashPhoto>>()
            .await
            .map_err(|e| PhotoError::Parse(e.to_string()))?;

        Ok(raw.into_iter().map(Photo::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_random_photos_url() {
        let client = UnsplashClient::new("https://api.unsplash.com/", "key");
        let url = client.photos_url(4).unwrap();
        assert_eq!(url.as_str(), "https://api.unsplash.com/photos/random?count=4");
    }

    #[test]
    fn client_id_authorization() {
        let client = UnsplashClient::new("https://api.unsplash.com", "abc");
        assert_eq!(client.authorization_header(), "Client-ID abc");
    }

    #[test]
    fn invalid_base_url_is_a_network_error() {
        let client = UnsplashClient::new("not a url", "abc");
        assert!(matches!(client.photos_url(3), Err(PhotoError::Network(_))));
    }
}
