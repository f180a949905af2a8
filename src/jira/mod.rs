//! Jira REST client and wire types.

pub mod client;
pub mod error;
pub mod issues;

pub use client::JiraClient;
pub use error::JiraError;
