use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error, info};

use crate::jira::error::JiraError;
use crate::jira::issues::{CLOSE_TRANSITION_ID, Issue};
use crate::release::gateways::{IssueTracker, SupportTracker};
use crate::release::matcher;
use crate::zendesk::error::ZendeskError;
use crate::zendesk::tickets::Ticket;

/// Per-key result of a release run.
#[derive(Debug)]
pub struct KeyOutcome {
    pub key: String,
    pub ticket: TicketOutcome,
    pub issue: IssueOutcome,
}

#[derive(Debug)]
pub enum TicketOutcome {
    Released { ticket_id: u64 },
    Failed(ZendeskError),
    NoMatch,
}

#[derive(Debug)]
pub enum IssueOutcome {
    Released { transitioned: bool },
    Failed(JiraError),
    NotFound,
}

impl fmt::Display for KeyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ticket ", self.key)?;
        match &self.ticket {
            TicketOutcome::Released { ticket_id } => write!(f, "released ({ticket_id})")?,
            TicketOutcome::Failed(e) => write!(f, "failed ({e})")?,
            TicketOutcome::NoMatch => write!(f, "no match")?,
        }
        write!(f, ", issue ")?;
        match &self.issue {
            IssueOutcome::Released { transitioned: true } => write!(f, "released, closed"),
            IssueOutcome::Released { transitioned: false } => write!(f, "released"),
            IssueOutcome::Failed(e) => write!(f, "failed ({e})"),
            IssueOutcome::NotFound => write!(f, "not found"),
        }
    }
}

/// Releases every configured issue key against both trackers.
///
/// Listing the view is the only fatal step; everything after it is
/// best-effort per key, and one key's failure never stops the others.
/// Returns one outcome per input key, in input order.
pub async fn release_keys<I: IssueTracker, S: SupportTracker>(
    jira: &I,
    zendesk: &S,
    view_id: &str,
    keys: &[String],
    message: &str,
    timestamp: &str,
) -> Result<Vec<KeyOutcome>, ZendeskError> {
    let tickets = zendesk.tickets_in_view(view_id).await?;
    let index = matcher::build_ticket_index(&tickets);
    debug!(
        "view '{}' has {} tickets with issue links",
        view_id,
        index.len()
    );

    let issues = fetch_issues(jira, keys).await;

    let mut outcomes = Vec::with_capacity(keys.len());
    for key in keys {
        let issue = issues.get(key);

        let ticket = match index.get(key) {
            Some(t) => release_ticket(zendesk, t, issue, message, timestamp).await,
            None => TicketOutcome::NoMatch,
        };

        let issue = match issue {
            Some(i) => release_issue(jira, i, message, timestamp).await,
            None => IssueOutcome::NotFound,
        };

        outcomes.push(KeyOutcome {
            key: key.clone(),
            ticket,
            issue,
        });
    }

    Ok(outcomes)
}

/// Fetches every key's issue, dropping keys whose lookup fails.
pub async fn fetch_issues<I: IssueTracker>(jira: &I, keys: &[String]) -> HashMap<String, Issue> {
    let mut issues = HashMap::new();
    for key in keys {
        match jira.fetch_issue(key).await {
            Ok(issue) => {
                issues.insert(key.clone(), issue);
            }
            Err(e) => {
                error!("{e}");
                debug!("issue '{}' lookup detail: {:?}", key, e);
            }
        }
    }
    debug!("found {} issues of {} keys", issues.len(), keys.len());
    issues
}

async fn release_ticket<S: SupportTracker>(
    zendesk: &S,
    ticket: &Ticket,
    issue: Option<&Issue>,
    message: &str,
    timestamp: &str,
) -> TicketOutcome {
    info!("zendesk.release: '{}'", ticket.short_string());
    let comment = compose_release_comment(timestamp, message, issue);
    match zendesk.release_ticket(ticket, &comment).await {
        Ok(()) => TicketOutcome::Released { ticket_id: ticket.id },
        Err(e) => {
            error!("{e}");
            debug!("ticket {} release detail: {:?}", ticket.id, e);
            TicketOutcome::Failed(e)
        }
    }
}

async fn release_issue<I: IssueTracker>(
    jira: &I,
    issue: &Issue,
    message: &str,
    timestamp: &str,
) -> IssueOutcome {
    info!("jira.release: '{}'", issue.short_string());
    let comment = compose_release_comment(timestamp, message, Some(issue));

    let result: Result<bool, JiraError> = async {
        let notes = prepend_release_notes(&comment, issue.release_notes());
        jira.update_release_notes(&issue.key, &notes).await?;
        jira.add_comment(&issue.key, &comment).await?;
        if issue.is_resolved() {
            jira.transition(&issue.key, CLOSE_TRANSITION_ID).await?;
            return Ok(true);
        }
        Ok(false)
    }
    .await;

    match result {
        Ok(transitioned) => IssueOutcome::Released { transitioned },
        Err(e) => {
            error!("{e}");
            debug!("issue '{}' release detail: {:?}", issue.key, e);
            IssueOutcome::Failed(e)
        }
    }
}

/// Builds the release comment block posted to both trackers. The
/// `jira:` line is present only when the issue is known.
pub fn compose_release_comment(timestamp: &str, message: &str, issue: Option<&Issue>) -> String {
    let mut comment = format!("### kbot begin. {timestamp}\n");
    comment.push_str(message);
    comment.push('\n');
    if let Some(issue) = issue {
        comment.push_str(&format!("jira: {}\n", issue.short_string()));
    }
    comment.push_str("### kbot end.\n");
    comment
}

/// Prepends the new block to the accumulated notes, most recent first.
/// Absent or empty notes yield just the block, with no leading blank
/// line.
pub fn prepend_release_notes(comment: &str, existing: Option<&str>) -> String {
    match existing {
        Some(old) if !old.is_empty() => format!("{comment}\n{old}"),
        _ => comment.to_string(),
    }
}
