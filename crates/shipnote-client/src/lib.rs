//! Provider adapters, HTTP transport and the generation dispatcher for shipnote

pub mod adapter;
pub mod dispatch;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod transport;

pub use dispatch::Dispatcher;
pub use error::{FailureKind, GenerationError};
