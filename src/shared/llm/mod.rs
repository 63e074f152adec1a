pub mod client;
pub mod parser;
pub mod response;

pub use client::{CompletionClient, CompletionRequest, TensorZeroCompletionClient};
pub use parser::parse_validated;
pub use response::LlmResponse;
