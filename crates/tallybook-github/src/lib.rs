pub mod client;
pub mod content;

pub use client::{ConfigError, GithubStore};
