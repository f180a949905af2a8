use tracing::debug;

use crate::jira::issues::Issue;
use crate::release::gateways::{IssueTracker, SupportTracker};
use crate::release::matcher;
use crate::release::reconciler;
use crate::zendesk::error::ZendeskError;
use crate::zendesk::tickets::Ticket;

/// A ticket/issue pair surfaced by the read-only views. The issue is
/// absent when its lookup failed.
#[derive(Debug)]
pub struct TicketIssueRow {
    pub key: String,
    pub ticket: Ticket,
    pub issue: Option<Issue>,
}

/// Every issue key referenced from the view, with its ticket and the
/// issue when it could be fetched. Rows are sorted by key for stable
/// output. No mutation is performed.
pub async fn tickets_with_issues<I: IssueTracker, S: SupportTracker>(
    jira: &I,
    zendesk: &S,
    view_id: &str,
) -> Result<Vec<TicketIssueRow>, ZendeskError> {
    let tickets = zendesk.tickets_in_view(view_id).await?;
    let index = matcher::build_ticket_index(&tickets);
    debug!(
        "view '{}' has {} tickets with issue links",
        view_id,
        index.len()
    );

    let mut entries: Vec<(String, Ticket)> = index.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut rows = Vec::with_capacity(entries.len());
    for (key, ticket) in entries {
        let issue = jira.fetch_issue(&key).await.ok();
        debug!(
            "   {}/{}: zd{} - jira{}",
            ticket.id,
            key,
            ticket.short_string(),
            issue.as_ref().map(Issue::short_string).unwrap_or_default()
        );
        rows.push(TicketIssueRow { key, ticket, issue });
    }

    Ok(rows)
}

/// The configured issues that could be fetched, in input-key order.
pub async fn issues_for_keys<I: IssueTracker>(jira: &I, keys: &[String]) -> Vec<Issue> {
    let issues = reconciler::fetch_issues(jira, keys).await;
    keys.iter().filter_map(|k| issues.get(k).cloned()).collect()
}

/// The subset of configured keys matched by a view ticket, with the
/// issue fetched best-effort: the pairs a release run would touch.
/// No mutation is performed.
pub async fn released_candidates<I: IssueTracker, S: SupportTracker>(
    jira: &I,
    zendesk: &S,
    view_id: &str,
    keys: &[String],
) -> Result<Vec<TicketIssueRow>, ZendeskError> {
    let tickets = zendesk.tickets_in_view(view_id).await?;
    let index = matcher::build_ticket_index(&tickets);
    debug!(
        "view '{}' has {} tickets with issue links",
        view_id,
        index.len()
    );

    let mut rows = Vec::new();
    for key in keys {
        if let Some(ticket) = index.get(key) {
            let issue = jira.fetch_issue(key).await.ok();
            rows.push(TicketIssueRow {
                key: key.clone(),
                ticket: ticket.clone(),
                issue,
            });
        }
    }

    Ok(rows)
}
