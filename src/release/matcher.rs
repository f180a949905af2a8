use std::collections::HashMap;

use crate::zendesk::tickets::Ticket;

/// Index tickets by the issue keys their link field references.
///
/// A ticket naming several keys appears under each of them. Tickets
/// without a link value produce no entries; an empty index is a valid
/// result. When two tickets reference the same key, the ticket seen
/// later in fetch order wins.
pub fn build_ticket_index(tickets: &[Ticket]) -> HashMap<String, Ticket> {
    let mut index = HashMap::new();
    for ticket in tickets {
        for key in ticket.issue_keys() {
            index.insert(key, ticket.clone());
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zendesk::tickets::{Field, fields};
    use serde_json::json;

    fn ticket(id: u64, link: Option<&str>) -> Ticket {
        Ticket {
            id,
            fields: vec![Field {
                id: fields::ISSUE_LINK,
                value: link.map(|l| json!(l)),
            }],
        }
    }

    #[test]
    fn multi_key_link_maps_every_key_to_the_ticket() {
        let tickets = vec![ticket(500, Some("PROJ-1, PROJ-2 PROJ-3"))];
        let index = build_ticket_index(&tickets);
        assert_eq!(index.len(), 3);
        assert_eq!(index["PROJ-1"].id, 500);
        assert_eq!(index["PROJ-2"].id, 500);
        assert_eq!(index["PROJ-3"].id, 500);
    }

    #[test]
    fn ticket_without_link_value_produces_no_entries() {
        let tickets = vec![ticket(500, None), ticket(501, Some("PROJ-1"))];
        let index = build_ticket_index(&tickets);
        assert_eq!(index.len(), 1);
        assert_eq!(index["PROJ-1"].id, 501);
    }

    #[test]
    fn empty_view_produces_empty_index() {
        assert!(build_ticket_index(&[]).is_empty());
    }

    // Two tickets referencing the same key collapse to the one fetched
    // last. Intentional: views are expected not to overlap on keys, and
    // the behavior is kept rather than fixed.
    #[test]
    fn duplicate_key_reference_keeps_last_ticket() {
        let tickets = vec![ticket(500, Some("PROJ-1")), ticket(501, Some("PROJ-1"))];
        let index = build_ticket_index(&tickets);
        assert_eq!(index.len(), 1);
        assert_eq!(index["PROJ-1"].id, 501);
    }
}
