pub mod action;
pub mod chat;
pub mod create;
pub mod effects;
pub mod error;
pub mod event_bus;
pub mod llm_client;
pub mod prompt;
pub mod provider;
pub mod store;
pub mod toolset;

#[cfg(test)]
pub mod test_support;
