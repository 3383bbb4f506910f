//! Client for a locally hosted Ollama chat model that returns lure picks
//! as strict JSON.

pub mod client;
pub mod types;

pub use client::OllamaClient;
pub use types::{parse_model_content, AiError, AiPick, AiRecommendation, Why};
