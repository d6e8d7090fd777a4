use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Accuracy, Address, Geocoder, Locator};
use crate::error::PontoError;
use crate::model::GeoFix;

/// Joins the position fix provider and the reverse geocoder with the
/// degradation rules the capture flow needs: a failed fix yields no
/// location and skips geocoding entirely; a failed geocode only drops the
/// address. The two calls run sequentially, never in parallel.
pub struct GeoAdapter {
    locator: Arc<dyn Locator>,
    geocoder: Arc<dyn Geocoder>,
}

impl GeoAdapter {
    pub fn new(locator: Arc<dyn Locator>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { locator, geocoder }
    }

    /// High-accuracy fix plus best-effort address. Never fails.
    pub async fn acquire(&self) -> (Option<GeoFix>, Option<String>) {
        let fix = match self.locator.current_position(Accuracy::High).await {
            Ok(fix) => fix,
            Err(e) => {
                warn!(error = %e, "position fix unavailable, proceeding without location");
                return (None, None);
            }
        };

        let address = match self.geocoder.reverse(fix.latitude, fix.longitude).await {
            Ok(Some(address)) => Some(address.format()),
            Ok(None) => None,
            Err(e) => {
                debug!(error = %e, "reverse geocoding failed, address omitted");
                None
            }
        };

        (Some(fix), address)
    }
}

/// Fix provider with coordinates frozen at construction. Used by the CLI,
/// where the host has no positioning hardware.
pub struct StaticLocator {
    fix: Option<GeoFix>,
}

impl StaticLocator {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let fix = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoFix {
                latitude,
                longitude,
                accuracy: None,
            }),
            _ => None,
        };
        Self { fix }
    }
}

#[async_trait]
impl Locator for StaticLocator {
    async fn current_position(&self, _accuracy: Accuracy) -> Result<GeoFix, PontoError> {
        self.fix
            .ok_or_else(|| PontoError::Location("no coordinates configured".to_string()))
    }
}

/// Reverse geocoder over a Nominatim-compatible HTTP endpoint.
pub struct HttpGeocoder {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    road: Option<String>,
    house_number: Option<String>,
    suburb: Option<String>,
    neighbourhood: Option<String>,
    city: Option<String>,
    town: Option<String>,
    state: Option<String>,
}

impl HttpGeocoder {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, PontoError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| PontoError::Geocode(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<Address>, PontoError> {
        let response = self
            .client
            .get(self.endpoint.as_str())
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "jsonv2".to_string()),
            ])
            .header("User-Agent", "ponto-client")
            .send()
            .await
            .map_err(|e| PontoError::Geocode(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PontoError::Geocode(format!(
                "geocoder returned {}",
                response.status()
            )));
        }

        let parsed: NominatimResponse = response
            .json()
            .await
            .map_err(|e| PontoError::Geocode(e.to_string()))?;

        Ok(parsed.address.map(|a| Address {
            street: a.road,
            name: a.house_number,
            subregion: a.suburb,
            district: a.neighbourhood,
            city: a.city.or(a.town),
            region: a.state,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct FailingLocator;

    #[async_trait]
    impl Locator for FailingLocator {
        async fn current_position(&self, _accuracy: Accuracy) -> Result<GeoFix, PontoError> {
            Err(PontoError::Location("timeout".to_string()))
        }
    }

    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn reverse(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<Option<Address>, PontoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(PontoError::Geocode("provider down".to_string()))
        }
    }

    #[tokio::test]
    async fn failed_fix_skips_geocoding() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let adapter = GeoAdapter::new(Arc::new(FailingLocator), geocoder.clone());

        let (fix, address) = adapter.acquire().await;
        assert!(fix.is_none());
        assert!(address.is_none());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn geocode_failure_keeps_the_fix() {
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let locator = Arc::new(StaticLocator::new(Some(-23.55), Some(-46.63)));
        let adapter = GeoAdapter::new(locator, geocoder.clone());

        let (fix, address) = adapter.acquire().await;
        assert_eq!(fix.unwrap().latitude, -23.55);
        assert!(address.is_none());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn static_locator_without_coordinates_fails() {
        let locator = StaticLocator::new(None, None);
        let result = locator.current_position(Accuracy::High).await;
        assert!(matches!(result, Err(PontoError::Location(_))));
    }
}
