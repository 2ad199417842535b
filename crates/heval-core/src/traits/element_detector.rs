use crate::errors::DetectionError;
use crate::models::DetectedElement;

/// Upstream UI-element detector, usually a vision model behind a service boundary.
pub trait IElementDetector: Send + Sync {
    /// Detect UI elements in an encoded screenshot.
    fn detect_elements(&self, image: &[u8]) -> Result<Vec<DetectedElement>, DetectionError>;

    /// Human-readable detector name.
    fn name(&self) -> &str;
}
