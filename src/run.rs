use anyhow::{Context, Result};
use tracing::info;

use crate::cli;
use crate::config::Config;
use crate::jira::JiraClient;
use crate::jira::issues::Issue;
use crate::release::report::TicketIssueRow;
use crate::release::{reconciler, report};
use crate::zendesk::ZendeskClient;

/// Configuration and clients shared by every command, built once at
/// startup and passed down explicitly.
pub struct ReleaseContext {
    pub config: Config,
    pub jira: JiraClient,
    pub zendesk: ZendeskClient,
}

impl ReleaseContext {
    pub fn from_config(config: Config) -> Result<Self> {
        let jira = JiraClient::new(&config.jira_url, &config.jira_user, &config.jira_password)
            .context("Failed to create Jira client")?;
        let zendesk = ZendeskClient::new(
            &config.zendesk_domain,
            &config.zendesk_username,
            &config.zendesk_token,
        )
        .context("Failed to create Zendesk client")?;

        Ok(ReleaseContext {
            config,
            jira,
            zendesk,
        })
    }
}

pub async fn run(args: Vec<String>) -> Result<()> {
    info!("Running kbot ...");

    match cli::parser::parse_args(&args) {
        cli::parser::Command::Release => {
            let ctx = startup_context()?;
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            let outcomes = reconciler::release_keys(
                &ctx.jira,
                &ctx.zendesk,
                &ctx.config.view_id,
                &ctx.config.issue_keys,
                &ctx.config.release_message,
                &timestamp,
            )
            .await
            .context("Failed to list view tickets")?;

            for outcome in &outcomes {
                info!("{outcome}");
            }
            info!("Processed {} keys.", outcomes.len());
        }
        cli::parser::Command::ListTickets => {
            let ctx = startup_context()?;
            let rows = report::tickets_with_issues(&ctx.jira, &ctx.zendesk, &ctx.config.view_id)
                .await
                .context("Failed to list view tickets")?;
            print_rows(&rows);
        }
        cli::parser::Command::ListIssues => {
            let ctx = startup_context()?;
            let issues = report::issues_for_keys(&ctx.jira, &ctx.config.issue_keys).await;
            for issue in &issues {
                println!("   {}", issue.short_string());
            }
        }
        cli::parser::Command::ListReleasedTickets => {
            let ctx = startup_context()?;
            let rows = report::released_candidates(
                &ctx.jira,
                &ctx.zendesk,
                &ctx.config.view_id,
                &ctx.config.issue_keys,
            )
            .await
            .context("Failed to list view tickets")?;
            print_rows(&rows);
        }
        cli::parser::Command::Help => print_usage(),
        cli::parser::Command::Unknown(cmd) => {
            println!("Unknown command '{cmd}'.");
            print_usage();
        }
    }

    info!("... end.");
    Ok(())
}

fn startup_context() -> Result<ReleaseContext> {
    let config =
        Config::load(&Config::default_path()).context("Failed to load configuration")?;
    ReleaseContext::from_config(config)
}

fn print_rows(rows: &[TicketIssueRow]) {
    for row in rows {
        println!(
            "   {}/{}: zd{} - jira{}",
            row.ticket.id,
            row.key,
            row.ticket.short_string(),
            row.issue
                .as_ref()
                .map(Issue::short_string)
                .unwrap_or_else(|| "{}".to_string())
        );
    }
}

fn print_usage() {
    println!("Options:");
    println!("   release                  (keys from release.jira.issues, view from zendesk.view)");
    println!("   list-tickets             (view configured in zendesk.view)");
    println!("   list-issues              (keys configured in release.jira.issues)");
    println!("   list-released-tickets    (zendesk.view and release.jira.issues)");
}
