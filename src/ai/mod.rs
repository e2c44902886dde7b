pub mod chat;
pub mod llm;
pub mod prompt;
