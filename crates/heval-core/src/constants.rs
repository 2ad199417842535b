/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Score a heuristic starts from before deductions.
pub const MAX_SCORE: u32 = 100;

/// Lowest score a heuristic can reach.
pub const MIN_SCORE: u32 = 0;

/// Smallest number of exemplars the explanation step may request.
pub const MIN_RETRIEVAL_K: usize = 3;

/// Description used for the single violation emitted per criterion when the catalog is empty.
pub const NO_ELEMENTS_DETECTED: &str = "no elements detected";
