//! Zendesk REST client and wire types.

pub mod client;
pub mod error;
pub mod tickets;

pub use client::ZendeskClient;
pub use error::ZendeskError;
