//! Vision engine seam for the BinBot gateway.
//!
//! The downstream model is an external collaborator; handlers talk to it
//! through the [`VisionEngine`] trait. The built-in [`HeuristicEngine`] is
//! deterministic and network-free.

pub mod engine;
pub mod format;

pub use engine::{HeuristicEngine, IdentifiedItem, ImageAnalysis, VisionEngine};
pub use format::{sniff_format, ImageFormat};
