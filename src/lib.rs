pub mod animation;
pub mod config;
pub mod display;
pub mod error;
pub mod session;
pub mod stats;
pub mod storage;

pub use error::AppError;
pub use session::Session;
