//! Assistant backends for the NeuroScan backend.
//!
//! Implements the core `AssistantBackend` contract against external
//! generation services. Currently: the Gemini REST API.

pub mod gemini_assistant;

pub use crate::gemini_assistant::GeminiAssistant;
