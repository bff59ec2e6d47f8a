//! Prompt construction for backend queries

pub mod template;

pub use template::PromptTemplate;
