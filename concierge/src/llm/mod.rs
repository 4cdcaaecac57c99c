mod api;
pub mod prompts;
mod provider;

pub use api::LlmApiClient;
pub use provider::{generate_structured, LlmBackend, LlmProvider, TextGeneration};
