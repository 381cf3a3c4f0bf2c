//! Image Resize Service
//!
//! Event-driven worker that shrinks newly uploaded images to a bounded size,
//! stores the derivative under `resized/`, and publishes a status notification.

pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
pub use handler::handle_event;
pub use services::EventProcessor;
