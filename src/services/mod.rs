//! Service layer modules for external integrations.

pub mod openai;

pub use openai::OpenAiClient;
