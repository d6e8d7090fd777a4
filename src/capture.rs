use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::device::{Camera, GeoAdapter};
use crate::error::PontoError;
use crate::model::EvidenceBundle;

/// Orchestrates photo capture plus location fetch into one evidence
/// bundle.
///
/// At most one capture may be in flight per coordinator; a second call
/// while one is pending is rejected with `Capture` rather than queued,
/// because the underlying camera and location handles are single-use per
/// request. The steps run sequentially: photo first (terminal on failure),
/// then position fix (degrades to no location), then reverse geocoding
/// (degrades to no address).
pub struct CaptureCoordinator {
    camera: Arc<dyn Camera>,
    geo: GeoAdapter,
    photo_quality: f32,
    in_flight: AtomicBool,
}

impl CaptureCoordinator {
    pub fn new(camera: Arc<dyn Camera>, geo: GeoAdapter, photo_quality: f32) -> Self {
        Self {
            camera,
            geo,
            photo_quality,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn capture(&self) -> Result<EvidenceBundle, PontoError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(PontoError::Capture(
                "capture already in progress".to_string(),
            ));
        }

        let result = self.run(self.photo_quality).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run(&self, quality: f32) -> Result<EvidenceBundle, PontoError> {
        // Photo failure is terminal: without it there is no bundle and the
        // caller stays in the pre-capture state.
        let photo = self.camera.take_picture(quality).await?;

        let (location, address) = self.geo.acquire().await;
        info!(
            has_location = location.is_some(),
            has_address = address.is_some(),
            "evidence captured"
        );

        Ok(EvidenceBundle {
            photo_uri: photo.uri,
            location,
            address,
            justification: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::device::{Accuracy, Address, Geocoder, Locator, Photo};
    use crate::model::GeoFix;

    struct BlockingCamera {
        calls: AtomicUsize,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl Camera for BlockingCamera {
        async fn take_picture(&self, _quality: f32) -> Result<Photo, PontoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(Photo {
                uri: "file:///tmp/foto.jpg".to_string(),
            })
        }
    }

    struct FixedLocator;

    #[async_trait]
    impl Locator for FixedLocator {
        async fn current_position(&self, _accuracy: Accuracy) -> Result<GeoFix, PontoError> {
            Ok(GeoFix {
                latitude: -23.55,
                longitude: -46.63,
                accuracy: Some(10.0),
            })
        }
    }

    struct FailingLocator;

    #[async_trait]
    impl Locator for FailingLocator {
        async fn current_position(&self, _accuracy: Accuracy) -> Result<GeoFix, PontoError> {
            Err(PontoError::Location("permission denied".to_string()))
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
            Ok(Some(Address {
                street: Some("Av. Paulista".to_string()),
                city: Some("São Paulo".to_string()),
                ..Default::default()
            }))
        }
    }

    struct BrokenCamera;

    #[async_trait]
    impl Camera for BrokenCamera {
        async fn take_picture(&self, _quality: f32) -> Result<Photo, PontoError> {
            Err(PontoError::Capture("device unavailable".to_string()))
        }
    }

    fn geo(locator: Arc<dyn Locator>, geocoder: Arc<dyn Geocoder>) -> GeoAdapter {
        GeoAdapter::new(locator, geocoder)
    }

    #[tokio::test]
    async fn second_capture_while_pending_is_rejected() {
        let release = Arc::new(Notify::new());
        let camera = Arc::new(BlockingCamera {
            calls: AtomicUsize::new(0),
            release: release.clone(),
        });
        let coordinator = Arc::new(CaptureCoordinator::new(
            camera.clone(),
            geo(Arc::new(FixedLocator), Arc::new(CountingGeocoder {
                calls: AtomicUsize::new(0),
            })),
            0.5,
        ));

        let first = tokio::spawn({
            let coordinator = coordinator.clone();
            async move { coordinator.capture().await }
        });

        // Let the first capture reach the camera and park there.
        tokio::task::yield_now().await;
        while camera.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let second = coordinator.capture().await;
        assert!(matches!(second, Err(PontoError::Capture(_))));
        assert_eq!(camera.calls.load(Ordering::SeqCst), 1);

        release.notify_one();
        let bundle = first.await.unwrap().unwrap();
        assert_eq!(bundle.photo_uri, "file:///tmp/foto.jpg");

        // Guard released: a new capture is accepted again.
        release.notify_one();
        assert!(coordinator.capture().await.is_ok());
    }

    #[tokio::test]
    async fn location_failure_degrades_the_bundle() {
        let path = std::env::temp_dir().join("ponto-capture-test.jpg");
        std::fs::write(&path, b"jpeg bytes").unwrap();
        let geocoder = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });

        let coordinator = CaptureCoordinator::new(
            Arc::new(crate::device::FileCamera::new(&path)),
            geo(Arc::new(FailingLocator), geocoder.clone()),
            0.5,
        );

        let bundle = coordinator.capture().await.unwrap();
        assert!(bundle.photo_uri.starts_with("file://"));
        assert!(bundle.location.is_none());
        assert!(bundle.address.is_none());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn successful_capture_carries_fix_and_address() {
        let path = std::env::temp_dir().join("ponto-capture-full.jpg");
        std::fs::write(&path, b"jpeg bytes").unwrap();

        let coordinator = CaptureCoordinator::new(
            Arc::new(crate::device::FileCamera::new(&path)),
            geo(Arc::new(FixedLocator), Arc::new(CountingGeocoder {
                calls: AtomicUsize::new(0),
            })),
            0.5,
        );

        let bundle = coordinator.capture().await.unwrap();
        assert_eq!(bundle.location.unwrap().latitude, -23.55);
        assert!(bundle.address.unwrap().contains("Av. Paulista"));
        assert!(bundle.justification.is_none());

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn camera_failure_releases_the_guard() {
        let coordinator = CaptureCoordinator::new(
            Arc::new(BrokenCamera),
            geo(Arc::new(FixedLocator), Arc::new(CountingGeocoder {
                calls: AtomicUsize::new(0),
            })),
            0.5,
        );

        assert!(matches!(
            coordinator.capture().await,
            Err(PontoError::Capture(_))
        ));
        // The guard must not stay latched after a failed attempt: the
        // second call must reach the device again, not be rejected as
        // in-flight.
        let second = coordinator.capture().await.unwrap_err();
        assert_eq!(second.to_string(), "capture failed: device unavailable");
    }
}
