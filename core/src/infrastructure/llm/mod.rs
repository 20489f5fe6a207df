pub mod anthropic_client;
#[cfg(test)]
pub(crate) mod fake_vendor;
pub mod gemini_client;
pub mod openai_client;
pub mod provider;
mod transport;

pub use provider::{HttpVisionClientFactory, VisionProvider};
