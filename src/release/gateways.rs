use crate::jira::error::JiraError;
use crate::jira::issues::Issue;
use crate::zendesk::error::ZendeskError;
use crate::zendesk::tickets::Ticket;

/// Issue-tracker operations the release flow depends on.
#[allow(async_fn_in_trait)]
pub trait IssueTracker {
    async fn fetch_issue(&self, key: &str) -> Result<Issue, JiraError>;
    async fn update_release_notes(&self, key: &str, notes: &str) -> Result<(), JiraError>;
    async fn add_comment(&self, key: &str, body: &str) -> Result<(), JiraError>;
    async fn transition(&self, key: &str, transition_id: u64) -> Result<(), JiraError>;
}

/// Support-tracker operations the release flow depends on.
#[allow(async_fn_in_trait)]
pub trait SupportTracker {
    async fn tickets_in_view(&self, view_id: &str) -> Result<Vec<Ticket>, ZendeskError>;
    async fn release_ticket(&self, ticket: &Ticket, comment: &str) -> Result<(), ZendeskError>;
}
