pub mod api;
pub mod capture;
pub mod config;
pub mod device;
pub mod error;
pub mod model;
pub mod resolver;
pub mod session;
pub mod workflow;

pub use config::Config;
pub use error::PontoError;
