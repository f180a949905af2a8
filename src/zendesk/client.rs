use reqwest::StatusCode;
use std::time::Duration;

use crate::release::gateways::SupportTracker;
use crate::zendesk::error::ZendeskError;
use crate::zendesk::tickets::{Ticket, TicketPage};

/// HTTP gateway to the Zendesk REST API.
pub struct ZendeskClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    token: String,
}

impl ZendeskClient {
    pub fn new(domain: &str, username: &str, token: &str) -> Result<Self, ZendeskError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(ZendeskClient {
            client,
            base_url: format!("https://{domain}.zendesk.com"),
            // API tokens authenticate as "<username>/token".
            username: format!("{username}/token"),
            token: token.to_string(),
        })
    }
}

impl SupportTracker for ZendeskClient {
    async fn tickets_in_view(&self, view_id: &str) -> Result<Vec<Ticket>, ZendeskError> {
        let url = format!("{}/api/v2/views/{}/tickets.json", self.base_url, view_id);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.token))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ZendeskError::Lookup {
                status: status.as_u16(),
                body,
            });
        }

        let page = response.json::<TicketPage>().await?;
        Ok(page.tickets)
    }

    async fn release_ticket(&self, ticket: &Ticket, comment: &str) -> Result<(), ZendeskError> {
        let url = format!("{}/api/v2/tickets/{}.json", self.base_url, ticket.id);
        let response = self
            .client
            .put(&url)
            .basic_auth(&self.username, Some(&self.token))
            .json(&ticket.released_update(comment))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ZendeskError::Update {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
