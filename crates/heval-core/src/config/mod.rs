//! Configuration for every subsystem, with compiled defaults in [`defaults`].

pub mod defaults;
pub mod engine_config;
pub mod explain_config;
pub mod heval_config;
pub mod knowledge_config;
pub mod observability_config;
pub mod scoring_config;

pub use engine_config::EngineConfig;
pub use explain_config::ExplainConfig;
pub use heval_config::HevalConfig;
pub use knowledge_config::KnowledgeConfig;
pub use observability_config::ObservabilityConfig;
pub use scoring_config::{ScoringConfig, SeverityMultipliers};
