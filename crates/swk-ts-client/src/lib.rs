pub mod emitters;
pub mod error;
pub mod generator;

pub use error::RenderError;
pub use generator::{TsClientConfig, TsClientGenerator};
