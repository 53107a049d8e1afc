use crate::format::{sniff_format, ImageFormat};
use async_trait::async_trait;
use bb_core::{BotError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// An object the engine identified in an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedItem {
    pub name: String,
    pub description: String,
    /// 0-10 scale, matching the upstream vision contract.
    pub confidence: u8,
}

/// Result of analyzing one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub format: ImageFormat,
    pub summary: String,
    pub identified_items: Vec<IdentifiedItem>,
}

/// Seam to the downstream vision/NLP model.
#[async_trait]
pub trait VisionEngine: Send + Sync {
    /// Analyze an uploaded image.
    async fn analyze(&self, filename: &str, bytes: &[u8]) -> Result<ImageAnalysis>;

    /// Produce a natural-language answer for a command, optionally grounded
    /// in an image analysis.
    async fn answer(&self, command: &str, analysis: Option<&ImageAnalysis>) -> Result<String>;
}

fn describe_intent() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(what|describe|identify|see|list|show)\b").unwrap()
    })
}

/// Deterministic built-in engine: sniffs the format from magic bytes and
/// shapes answers from the command's intent. No network, no model.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEngine;

impl HeuristicEngine {
    pub fn new() -> Self {
        Self
    }

    fn item_name(filename: &str) -> String {
        let stem = filename
            .rsplit('/')
            .next()
            .unwrap_or(filename)
            .split('.')
            .next()
            .unwrap_or("item");
        if stem.is_empty() {
            "item".to_string()
        } else {
            stem.replace(['_', '-'], " ")
        }
    }
}

#[async_trait]
impl VisionEngine for HeuristicEngine {
    async fn analyze(&self, filename: &str, bytes: &[u8]) -> Result<ImageAnalysis> {
        let format = sniff_format(bytes)
            .ok_or_else(|| BotError::InvalidImage("unrecognized image format".into()))?;
        debug!(filename, %format, size = bytes.len(), "analyzing image");
        let name = Self::item_name(filename);
        let summary = format!("{format} image, {} bytes, appears to contain: {name}", bytes.len());
        Ok(ImageAnalysis {
            format,
            summary,
            identified_items: vec![IdentifiedItem {
                description: format!("Object inferred from upload '{filename}'"),
                name,
                confidence: 5,
            }],
        })
    }

    async fn answer(&self, command: &str, analysis: Option<&ImageAnalysis>) -> Result<String> {
        let command = command.trim();
        if command.is_empty() {
            return Err(BotError::EmptyCommand);
        }
        match analysis {
            Some(analysis) => {
                let names: Vec<&str> = analysis
                    .identified_items
                    .iter()
                    .map(|i| i.name.as_str())
                    .collect();
                if describe_intent().is_match(command) {
                    Ok(format!(
                        "I can see a {} image. It appears to contain: {}.",
                        analysis.format,
                        names.join(", ")
                    ))
                } else {
                    Ok(format!(
                        "Processed your command against the uploaded {} image ({}).",
                        analysis.format,
                        names.join(", ")
                    ))
                }
            }
            None => Ok(format!("Processed command: {command}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    #[tokio::test]
    async fn test_analyze_jpeg() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("coaster_pen_mouse.jpg", JPEG).await.unwrap();
        assert_eq!(analysis.format, ImageFormat::Jpeg);
        assert_eq!(analysis.identified_items.len(), 1);
        assert_eq!(analysis.identified_items[0].name, "coaster pen mouse");
    }

    #[tokio::test]
    async fn test_analyze_rejects_garbage() {
        let engine = HeuristicEngine::new();
        let err = engine.analyze("x.jpg", b"plainly not an image").await.unwrap_err();
        assert!(matches!(err, BotError::InvalidImage(_)));
    }

    #[tokio::test]
    async fn test_answer_describe_intent() {
        let engine = HeuristicEngine::new();
        let analysis = engine.analyze("red_square.jpg", JPEG).await.unwrap();
        let answer = engine
            .answer("what do you see in this image?", Some(&analysis))
            .await
            .unwrap();
        assert!(answer.contains("JPEG"));
        assert!(answer.contains("red square"));
    }

    #[tokio::test]
    async fn test_answer_without_image() {
        let engine = HeuristicEngine::new();
        let answer = engine.answer("help", None).await.unwrap();
        assert!(!answer.is_empty());
    }

    #[tokio::test]
    async fn test_answer_empty_command() {
        let engine = HeuristicEngine::new();
        let err = engine.answer("   ", None).await.unwrap_err();
        assert!(matches!(err, BotError::EmptyCommand));
    }
}
