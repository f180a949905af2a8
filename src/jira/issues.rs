use serde::{Deserialize, Serialize};
use serde_json::json;

/// Status id an issue must be in to be closed on release
/// (classic workflow "Resolved").
pub const RESOLVED_STATUS_ID: u64 = 5;
/// Transition id applied to resolved issues ("Close Issue").
pub const CLOSE_TRANSITION_ID: u64 = 701;

/// Fields requested on issue lookups. `customfield_10321` holds the
/// accumulated release notes.
pub const ISSUE_FIELDS: &str = "status,resolution,summary,customfield_10321";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IssueFields {
    pub status: Status,
    #[serde(default)]
    pub resolution: Option<Resolution>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub customfield_10321: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Status {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Resolution {
    pub name: String,
}

impl Issue {
    /// Current value of the release-notes field, if any.
    pub fn release_notes(&self) -> Option<&str> {
        self.fields.customfield_10321.as_deref()
    }

    /// Whether the issue sits in the status that qualifies for closing.
    pub fn is_resolved(&self) -> bool {
        self.fields.status.id == RESOLVED_STATUS_ID
    }

    /// Compact one-line rendering used in logs, reports and release
    /// comments.
    pub fn short_string(&self) -> String {
        json!({
            "key": self.key,
            "status": self.fields.status.name,
            "resolution": self
                .fields
                .resolution
                .as_ref()
                .map(|r| r.name.as_str())
                .unwrap_or(""),
            "releaseNotes": self.fields.customfield_10321,
        })
        .to_string()
    }
}

/// PUT body replacing the release-notes field.
#[derive(Debug, PartialEq, Serialize)]
pub struct NotesPatch {
    pub fields: NotesFields,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct NotesFields {
    pub customfield_10321: String,
}

impl NotesPatch {
    pub fn new(notes: &str) -> Self {
        NotesPatch {
            fields: NotesFields {
                customfield_10321: notes.to_string(),
            },
        }
    }
}

/// PUT body adding a comment through the issue update verb.
#[derive(Debug, PartialEq, Serialize)]
pub struct CommentUpdate {
    pub update: CommentOps,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CommentOps {
    pub comment: Vec<CommentAdd>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CommentAdd {
    pub add: CommentBody,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CommentBody {
    pub body: String,
}

impl CommentUpdate {
    pub fn new(body: &str) -> Self {
        CommentUpdate {
            update: CommentOps {
                comment: vec![CommentAdd {
                    add: CommentBody {
                        body: body.to_string(),
                    },
                }],
            },
        }
    }
}

/// POST body for a workflow transition.
#[derive(Debug, PartialEq, Serialize)]
pub struct TransitionRequest {
    pub transition: TransitionId,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct TransitionId {
    pub id: String,
}

impl TransitionRequest {
    pub fn new(transition_id: u64) -> Self {
        TransitionRequest {
            transition: TransitionId {
                id: transition_id.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved_issue(notes: Option<&str>) -> Issue {
        Issue {
            id: Some("10002".to_string()),
            key: "PROJ-1".to_string(),
            fields: IssueFields {
                status: Status {
                    id: RESOLVED_STATUS_ID,
                    name: "Resolved".to_string(),
                },
                resolution: Some(Resolution {
                    name: "Fixed".to_string(),
                }),
                summary: Some("Crash on startup".to_string()),
                customfield_10321: notes.map(str::to_string),
            },
        }
    }

    #[test]
    fn deserializes_issue_response() {
        let json = r#"{
            "id": "10002",
            "key": "PROJ-1",
            "fields": {
                "status": {"id": 5, "name": "Resolved"},
                "resolution": {"name": "Fixed"},
                "summary": "Crash on startup",
                "customfield_10321": "old notes"
            }
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue, resolved_issue(Some("old notes")));
    }

    #[test]
    fn deserializes_issue_without_optional_fields() {
        let json = r#"{
            "key": "PROJ-2",
            "fields": {"status": {"id": 1, "name": "Open"}}
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "PROJ-2");
        assert_eq!(issue.fields.resolution, None);
        assert_eq!(issue.release_notes(), None);
        assert!(!issue.is_resolved());
    }

    #[test]
    fn is_resolved_matches_status_id_only() {
        let mut issue = resolved_issue(None);
        assert!(issue.is_resolved());
        issue.fields.status.id = 1;
        issue.fields.status.name = "Resolved".to_string();
        assert!(!issue.is_resolved());
    }

    #[test]
    fn short_string_renders_key_fields() {
        let issue = resolved_issue(Some("old notes"));
        let rendered: serde_json::Value =
            serde_json::from_str(&issue.short_string()).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!({
                "key": "PROJ-1",
                "status": "Resolved",
                "resolution": "Fixed",
                "releaseNotes": "old notes"
            })
        );
    }

    #[test]
    fn short_string_blank_resolution_when_unresolved() {
        let mut issue = resolved_issue(None);
        issue.fields.resolution = None;
        let rendered: serde_json::Value =
            serde_json::from_str(&issue.short_string()).unwrap();
        assert_eq!(rendered["resolution"], "");
        assert_eq!(rendered["releaseNotes"], serde_json::Value::Null);
    }

    #[test]
    fn notes_patch_serializes_to_fields_object() {
        let patch = NotesPatch::new("new notes");
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"fields": {"customfield_10321": "new notes"}})
        );
    }

    #[test]
    fn comment_update_serializes_to_update_verb() {
        let update = CommentUpdate::new("release comment");
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({
                "update": {"comment": [{"add": {"body": "release comment"}}]}
            })
        );
    }

    #[test]
    fn transition_request_serializes_id_as_string() {
        let request = TransitionRequest::new(CLOSE_TRANSITION_ID);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"transition": {"id": "701"}})
        );
    }
}
