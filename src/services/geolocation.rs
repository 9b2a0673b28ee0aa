// ============================================================================
// GEOLOCATION - Un solo fix de posición del navegador
// ============================================================================

use crate::error::GeolocationError;
use crate::models::LatLng;

#[allow(async_fn_in_trait)]
pub trait GeolocationProvider {
    /// `false` si el navegador no expone la API de geolocalización
    fn is_available(&self) -> bool;

    async fn current_position(&self) -> Result<LatLng, GeolocationError>;
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserGeolocation;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::PositionOptions;

    use super::GeolocationProvider;
    use crate::error::GeolocationError;
    use crate::models::LatLng;

    const TIMEOUT_MS: u32 = 10_000;
    const MAXIMUM_AGE_MS: u32 = 60_000;

    /// `navigator.geolocation` envuelto en un futuro
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserGeolocation;

    fn read_f64(target: &JsValue, key: &str) -> Option<f64> {
        js_sys::Reflect::get(target, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
    }

    fn position_to_latlng(position: &JsValue) -> Result<LatLng, GeolocationError> {
        let coords = js_sys::Reflect::get(position, &JsValue::from_str("coords"))
            .map_err(|_| GeolocationError::Other("Position without coords".to_string()))?;
        match (read_f64(&coords, "latitude"), read_f64(&coords, "longitude")) {
            (Some(lat), Some(lng)) => Ok(LatLng::new(lat, lng)),
            _ => Err(GeolocationError::Other("Position without latitude/longitude".to_string())),
        }
    }

    fn js_to_error(error: &JsValue) -> GeolocationError {
        let code = read_f64(error, "code").unwrap_or(0.0) as u16;
        let message = js_sys::Reflect::get(error, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .unwrap_or_else(|| format!("{:?}", error));
        GeolocationError::from_code(code, &message)
    }

    impl GeolocationProvider for BrowserGeolocation {
        fn is_available(&self) -> bool {
            web_sys::window()
                .map(|w| {
                    js_sys::Reflect::has(&w.navigator(), &JsValue::from_str("geolocation"))
                        .unwrap_or(false)
                })
                .unwrap_or(false)
        }

        async fn current_position(&self) -> Result<LatLng, GeolocationError> {
            let geolocation = web_sys::window()
                .ok_or(GeolocationError::Unsupported)?
                .navigator()
                .geolocation()
                .map_err(|_| GeolocationError::Unsupported)?;

            let promise = js_sys::Promise::new(&mut |resolve, reject| {
                let reject_on_call = reject.clone();
                let success = Closure::once_into_js(move |position: JsValue| {
                    let _ = resolve.call1(&JsValue::NULL, &position);
                });
                let failure = Closure::once_into_js(move |error: JsValue| {
                    let _ = reject.call1(&JsValue::NULL, &error);
                });

                let options = PositionOptions::new();
                options.set_enable_high_accuracy(false);
                options.set_timeout(TIMEOUT_MS);
                options.set_maximum_age(MAXIMUM_AGE_MS);

                if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
                    success.unchecked_ref(),
                    Some(failure.unchecked_ref()),
                    &options,
                ) {
                    let _ = reject_on_call.call1(&JsValue::NULL, &e);
                }
            });

            match JsFuture::from(promise).await {
                Ok(position) => position_to_latlng(&position),
                Err(error) => Err(js_to_error(&error)),
            }
        }
    }
}
