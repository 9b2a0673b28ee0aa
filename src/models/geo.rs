use serde::{Deserialize, Serialize};

/// Coordenadas geográficas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Centro "sin mapa": el valor que devuelven los accesores antes de inicializar
    pub const ZERO: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Coordenadas finitas y dentro de ±90 / ±180
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Comparación con tolerancia (redondeo de la librería de mapas)
    pub fn approx_eq(&self, other: &LatLng, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance && (self.lng - other.lng).abs() <= tolerance
    }

    /// Formato `[lat, lng]` que espera Leaflet
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Vista actual del mapa
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
}

impl MapView {
    pub const fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_bounds() {
        assert!(LatLng::new(45.5152, -122.6784).is_valid());
        assert!(LatLng::new(90.0, 180.0).is_valid());
        assert!(!LatLng::new(90.5, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -181.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn approx_eq_uses_tolerance() {
        let a = LatLng::new(45.5152, -122.6784);
        let b = LatLng::new(45.51521, -122.67839);
        assert!(a.approx_eq(&b, 1e-4));
        assert!(!a.approx_eq(&LatLng::ZERO, 1e-4));
    }
}
