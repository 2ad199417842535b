//! Error handling for the evaluation engine.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod definition_error;
pub mod detection_error;
pub mod embedding_error;
pub mod error_code;
pub mod heval_error;
pub mod input_error;
pub mod knowledge_error;
pub mod retrieval_error;

pub use config_error::ConfigError;
pub use definition_error::DefinitionError;
pub use detection_error::DetectionError;
pub use embedding_error::EmbeddingError;
pub use error_code::{ErrorResponse, HevalErrorCode};
pub use heval_error::{HevalError, HevalResult};
pub use input_error::InputError;
pub use knowledge_error::KnowledgeError;
pub use retrieval_error::RetrievalError;
