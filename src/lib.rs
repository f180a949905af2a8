//! kbot — release reconciliation between Jira and Zendesk.
//!
//! Finds support tickets linked to issue keys through a custom field,
//! annotates both trackers with a release comment, marks tickets as
//! released and transitions issue state.

pub mod cli;
pub mod config;
pub mod jira;
pub mod release;
pub mod run;
pub mod zendesk;
