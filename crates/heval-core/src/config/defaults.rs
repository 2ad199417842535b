// Single source of truth for all default values.

// --- Scoring ---
pub const DEFAULT_CRITICAL_MULTIPLIER: u32 = 10;
pub const DEFAULT_MAJOR_MULTIPLIER: u32 = 6;
pub const DEFAULT_MINOR_MULTIPLIER: u32 = 3;
pub const DEFAULT_COSMETIC_MULTIPLIER: u32 = 1;

// --- Knowledge base ---
pub const DEFAULT_SIMILARITY_FLOOR: f64 = 0.3;
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;
pub const DEFAULT_SEED_EXPERT_EXEMPLARS: bool = true;
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 10_000;

// --- Explanation ---
pub const DEFAULT_RETRIEVAL_K: usize = 3;
pub const DEFAULT_RETRIEVAL_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_RETRIEVAL_WORKERS: usize = 4;
pub const DEFAULT_RETRIEVAL_QUEUE_CAPACITY: usize = 64;

// --- Engine ---
pub const DEFAULT_PARALLEL: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_FILTER: &str = "heval=info";
pub const DEFAULT_JSON_LOGS: bool = false;

// --- Files & environment ---
pub const DEFAULT_CONFIG_FILENAME: &str = "heval.toml";
pub const ENV_SIMILARITY_FLOOR: &str = "HEVAL_SIMILARITY_FLOOR";
pub const ENV_RETRIEVAL_TIMEOUT_MS: &str = "HEVAL_RETRIEVAL_TIMEOUT_MS";
pub const ENV_RETRIEVAL_K: &str = "HEVAL_RETRIEVAL_K";
pub const ENV_LOG: &str = "HEVAL_LOG";
