pub mod backend;
pub mod config;
pub mod conversation;
pub mod error;
pub mod message;
pub mod payload;
pub mod plain;
pub mod render;

// Re-export main types for convenience
pub use backend::{HttpBackend, QueryBackend, QueryRequest};
pub use config::Config;
pub use conversation::Conversation;
pub use error::BackendError;
pub use message::{Message, Role, FAILURE_TEXT};
pub use payload::{ChartKind, ChartSpec, Envelope, Payload};
pub use render::{render, Node, RenderTree, Renderer};
