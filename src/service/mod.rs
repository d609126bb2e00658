pub mod classification;
pub mod llm;

pub use classification::ClassificationCoordinator;
pub use llm::CompletionClient;
