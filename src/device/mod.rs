pub mod camera;
pub mod geo;

use async_trait::async_trait;

use crate::error::PontoError;
use crate::model::GeoFix;

pub use camera::FileCamera;
pub use geo::{GeoAdapter, HttpGeocoder, StaticLocator};

/// Opaque handle to a captured image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub uri: String,
}

/// Requested accuracy tier for a position fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Low,
    Balanced,
    High,
}

/// Capture device. A single hardware handle serves one request at a time;
/// callers must not issue concurrent captures.
#[async_trait]
pub trait Camera: Send + Sync {
    async fn take_picture(&self, quality: f32) -> Result<Photo, PontoError>;
}

/// Position fix provider.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self, accuracy: Accuracy) -> Result<GeoFix, PontoError>;
}

/// Reverse-geocoding provider. Returns zero or one candidate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, latitude: f64, longitude: f64)
    -> Result<Option<Address>, PontoError>;
}

/// Address components as returned by the geocoding provider. Every field
/// is best-effort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub name: Option<String>,
    pub subregion: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
}

impl Address {
    /// Human-readable one-liner: `"{street} {name} - {subregion|district},
    /// {city} - {region}"`, with missing parts rendered empty.
    pub fn format(&self) -> String {
        let part = |v: &Option<String>| v.clone().unwrap_or_default();
        format!(
            "{} {} - {}, {} - {}",
            part(&self.street),
            part(&self.name),
            self.subregion
                .clone()
                .or_else(|| self.district.clone())
                .unwrap_or_default(),
            part(&self.city),
            part(&self.region),
        )
    }
}
