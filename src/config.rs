use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the attendance service, e.g. http://192.168.2.105:3333
    pub backend_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,

    // Capture
    pub photo_quality: f32,
    pub photo_path: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Reverse geocoding endpoint (Nominatim-compatible).
    pub geocoder_url: String,

    /// Route the UI should move to after a successful submission, if any.
    pub post_submit_route: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            backend_url: env::var("BACKEND_URL").expect("BACKEND_URL must be set"),
            connect_timeout_secs: env::var("CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap(),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),

            photo_quality: env::var("PHOTO_QUALITY")
                .unwrap_or_else(|_| "0.5".to_string())
                .parse()
                .unwrap(),
            photo_path: env::var("PHOTO_PATH").unwrap_or_else(|_| "foto.jpg".to_string()),
            latitude: env::var("LATITUDE").ok().map(|v| v.parse().unwrap()),
            longitude: env::var("LONGITUDE").ok().map(|v| v.parse().unwrap()),

            geocoder_url: env::var("GEOCODER_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/reverse".to_string()),

            post_submit_route: env::var("POST_SUBMIT_ROUTE").ok(),
        }
    }
}
