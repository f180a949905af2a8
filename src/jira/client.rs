use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

use crate::jira::error::JiraError;
use crate::jira::issues::{
    CommentUpdate, ISSUE_FIELDS, Issue, NotesPatch, TransitionRequest,
};
use crate::release::gateways::IssueTracker;

const ISSUE_PATH: &str = "/rest/api/2/issue";

/// HTTP gateway to the Jira REST API.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    user: String,
    password: String,
}

impl JiraClient {
    pub fn new(url: &str, user: &str, password: &str) -> Result<Self, JiraError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(JiraClient {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: password.to_string(),
        })
    }

    fn issue_url(&self, key: &str) -> String {
        format!("{}{}/{}", self.base_url, ISSUE_PATH, key)
    }

    /// PUT a JSON body to an issue path. Jira answers mutations with
    /// 200 or 204 depending on the verb.
    async fn put<T: Serialize>(&self, url: &str, body: &T) -> Result<(), JiraError> {
        let response = self
            .client
            .put(url)
            .basic_auth(&self.user, Some(&self.password))
            .json(body)
            .send()
            .await?;
        check_update_status(response).await
    }

    async fn post<T: Serialize>(&self, url: &str, body: &T) -> Result<(), JiraError> {
        let response = self
            .client
            .post(url)
            .basic_auth(&self.user, Some(&self.password))
            .json(body)
            .send()
            .await?;
        check_update_status(response).await
    }
}

async fn check_update_status(response: reqwest::Response) -> Result<(), JiraError> {
    let status = response.status();
    if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
        let body = response.text().await.unwrap_or_default();
        return Err(JiraError::Update {
            status: status.as_u16(),
            body,
        });
    }
    Ok(())
}

impl IssueTracker for JiraClient {
    async fn fetch_issue(&self, key: &str) -> Result<Issue, JiraError> {
        let response = self
            .client
            .get(self.issue_url(key))
            .basic_auth(&self.user, Some(&self.password))
            .query(&[("fields", ISSUE_FIELDS)])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JiraError::Lookup {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Issue>().await?)
    }

    async fn update_release_notes(&self, key: &str, notes: &str) -> Result<(), JiraError> {
        self.put(&self.issue_url(key), &NotesPatch::new(notes)).await
    }

    async fn add_comment(&self, key: &str, body: &str) -> Result<(), JiraError> {
        self.put(&self.issue_url(key), &CommentUpdate::new(body)).await
    }

    async fn transition(&self, key: &str, transition_id: u64) -> Result<(), JiraError> {
        let url = format!("{}/transitions", self.issue_url(key));
        self.post(&url, &TransitionRequest::new(transition_id)).await
    }
}
