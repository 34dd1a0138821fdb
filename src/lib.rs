pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod prompt;
pub mod provider;
pub mod server;
