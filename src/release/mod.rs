//! Cross-tracker release reconciliation: matching support tickets to
//! issue keys and applying best-effort release updates to both systems.

pub mod gateways;
pub mod matcher;
pub mod reconciler;
pub mod report;
