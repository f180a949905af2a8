use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Well-known custom field ids on support tickets.
pub mod fields {
    /// Field holding the linked issue key(s).
    pub const ISSUE_LINK: u64 = 360_001_675_219;
    /// Field holding the ticket sub-status.
    pub const SUB_STATUS: u64 = 360_001_788_879;
}

/// Sub-status value marking a ticket as released.
pub const RELEASED_SUB_STATUS: &str = "released";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A custom field on a ticket. Values are polymorphic: the issue-link
/// field carries a string, the sub-status field an array of tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: u64,
    pub value: Option<Value>,
}

/// One page of tickets as returned by the view endpoint.
#[derive(Debug, Deserialize)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
}

/// PUT body for the ticket endpoint.
#[derive(Debug, PartialEq, Serialize)]
pub struct TicketUpdate {
    pub ticket: TicketPatch,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct TicketPatch {
    pub comment: Comment,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub body: String,
}

impl Ticket {
    pub fn field_value(&self, id: u64) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .and_then(|f| f.value.as_ref())
    }

    /// Issue keys referenced by this ticket's link field. A single field
    /// value may name several keys, separated by whitespace or commas.
    pub fn issue_keys(&self) -> Vec<String> {
        match self
            .field_value(fields::ISSUE_LINK)
            .and_then(Value::as_str)
        {
            Some(value) => value
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Compact one-line rendering used in logs and reports.
    pub fn short_string(&self) -> String {
        json!({
            "id": self.id,
            "substatus": self.field_value(fields::SUB_STATUS).cloned().unwrap_or(Value::Null),
            "jira": self.field_value(fields::ISSUE_LINK).cloned().unwrap_or(Value::Null),
        })
        .to_string()
    }

    /// Update that posts `comment` and marks the ticket released.
    pub fn released_update(&self, comment: &str) -> TicketUpdate {
        TicketUpdate {
            ticket: TicketPatch {
                comment: Comment {
                    body: comment.to_string(),
                },
                fields: vec![Field {
                    id: fields::SUB_STATUS,
                    value: Some(json!([RELEASED_SUB_STATUS])),
                }],
            },
        }
    }
}
