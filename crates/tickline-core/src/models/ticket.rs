//! Ticket and complaint models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status code space used by the ticket backend.
///
/// The server owns status semantics and transition legality; the client only
/// maps codes to labels. Codes the client does not recognize are carried
/// through verbatim so a newer backend never breaks list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    NoResponse,
    Closed,
    Other(String),
}

impl TicketStatus {
    pub const KNOWN_CODES: [&'static str; 5] = ["OPN", "INP", "CRS", "CNR", "RES"];

    /// The wire code for this status.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Open => "OPN",
            Self::InProgress => "INP",
            Self::Resolved => "CRS",
            Self::NoResponse => "CNR",
            Self::Closed => "RES",
            Self::Other(code) => code,
        }
    }

    /// Map a wire code to a status, preserving unknown codes verbatim.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "OPN" => Self::Open,
            "INP" => Self::InProgress,
            "CRS" => Self::Resolved,
            "CNR" => Self::NoResponse,
            "RES" => Self::Closed,
            _ => Self::Other(code.trim().to_string()),
        }
    }

    /// Human-readable label for CLI output.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::NoResponse => "No Response from Client",
            Self::Closed => "Closed",
            Self::Other(code) => code,
        }
    }
}

impl FromStr for TicketStatus {
    type Err = std::convert::Infallible;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(code))
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for TicketStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}

/// A support ticket as returned by the backend.
///
/// Fetched read-only; a subset of fields is submitted back via
/// [`ComplaintPatch`] during an update. Field names follow the backend's
/// wire format, which mixes naming conventions across endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub status: TicketStatus,
    #[serde(default)]
    pub ticket_description: Option<String>,
    #[serde(default)]
    pub activity_description: Option<String>,
    /// Name of the person the issue was generated from.
    #[serde(default)]
    pub complaintname: Option<String>,
    #[serde(default)]
    pub complaint_mobile: Option<String>,
    #[serde(default, rename = "deviceID")]
    pub device_id: Option<String>,
    #[serde(default, rename = "assignedTo")]
    pub assigned_to: Option<i64>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub complaints: Vec<Complaint>,
}

impl Ticket {
    /// Creation date at day granularity, when the backend supplied one.
    ///
    /// The backend emits `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`; only the
    /// date prefix matters for filtering.
    #[must_use]
    pub fn created_date(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?;
        let prefix = raw.get(..10)?;
        NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
    }
}

/// One complaint line item within a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: i64,
    #[serde(default)]
    pub complaint_detail: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub followup_date: Option<String>,
    #[serde(default)]
    pub status: Option<TicketStatus>,
}

/// Per-complaint fields submitted during a ticket update.
///
/// Wire names match what the backend's update endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplaintPatch {
    #[serde(rename = "p_DC_id")]
    pub complaint_id: i64,
    pub description: String,
    #[serde(rename = "followUpDate")]
    pub follow_up_date: Option<String>,
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<i64>,
    pub status: TicketStatus,
}

impl ComplaintPatch {
    /// Build patches applying one remark/status/follow-up to every complaint
    /// of a ticket, the way the agent update flow submits them.
    #[must_use]
    pub fn for_ticket(
        ticket: &Ticket,
        remark: &str,
        status: &TicketStatus,
        follow_up_date: Option<&NaiveDate>,
    ) -> Vec<Self> {
        ticket
            .complaints
            .iter()
            .map(|complaint| Self {
                complaint_id: complaint.id,
                description: remark.to_string(),
                follow_up_date: follow_up_date.map(|date| date.format("%Y-%m-%d").to_string()),
                assigned_to: ticket.assigned_to,
                status: status.clone(),
            })
            .collect()
    }
}

/// Client-side filter over a fetched ticket list.
///
/// Pure view logic: the fetched data is never mutated, entries are only
/// included or excluded. Date bounds are inclusive at day granularity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TicketFilter {
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if let Some(status) = &self.status {
            if &ticket.status != status {
                return false;
            }
        }
        if self.from.is_some() || self.to.is_some() {
            let Some(created) = ticket.created_date() else {
                // Undated tickets only survive when no date bound is active.
                return false;
            };
            if self.from.is_some_and(|from| created < from) {
                return false;
            }
            if self.to.is_some_and(|to| created > to) {
                return false;
            }
        }
        true
    }

    #[must_use]
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        tickets
            .into_iter()
            .filter(|ticket| self.matches(ticket))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ticket(id: i64, status: &str, created_at: &str) -> Ticket {
        Ticket {
            id,
            status: status.parse().unwrap(),
            ticket_description: None,
            activity_description: None,
            complaintname: None,
            complaint_mobile: None,
            device_id: None,
            assigned_to: None,
            created_at: Some(created_at.to_string()),
            complaints: Vec::new(),
        }
    }

    #[test]
    fn status_codes_round_trip() {
        for code in TicketStatus::KNOWN_CODES {
            let status: TicketStatus = code.parse().unwrap();
            assert_eq!(status.code(), code);
        }
    }

    #[test]
    fn unknown_status_code_is_preserved() {
        let status: TicketStatus = "ESC".parse().unwrap();
        assert_eq!(status, TicketStatus::Other("ESC".to_string()));
        assert_eq!(status.code(), "ESC");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"ESC\"");
    }

    #[test]
    fn status_deserializes_from_wire_code() {
        let status: TicketStatus = serde_json::from_str("\"INP\"").unwrap();
        assert_eq!(status, TicketStatus::InProgress);
    }

    #[test]
    fn ticket_parses_backend_payload() {
        let payload = r#"
        {
            "id": 31,
            "status": "OPN",
            "deviceID": "DV-009",
            "complaint_mobile": "9998887776",
            "complaintname": "Ravi",
            "assignedTo": 9,
            "createdAt": "2025-06-14 09:12:44",
            "complaints": [
                {"id": 71, "complaint_detail": "No power", "product_name": "Inverter", "followup_date": null, "status": "OPN"}
            ]
        }
        "#;

        let parsed: Ticket = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.id, 31);
        assert_eq!(parsed.status, TicketStatus::Open);
        assert_eq!(parsed.device_id.as_deref(), Some("DV-009"));
        assert_eq!(parsed.complaints.len(), 1);
        assert_eq!(
            parsed.created_date(),
            NaiveDate::from_ymd_opt(2025, 6, 14)
        );
    }

    #[test]
    fn complaint_patch_uses_backend_wire_names() {
        let mut base = ticket(31, "OPN", "2025-06-14");
        base.assigned_to = Some(9);
        base.complaints.push(Complaint {
            id: 71,
            complaint_detail: None,
            product_name: None,
            followup_date: None,
            status: None,
        });

        let patches = ComplaintPatch::for_ticket(
            &base,
            "Replaced fuse",
            &TicketStatus::Resolved,
            NaiveDate::from_ymd_opt(2025, 6, 20).as_ref(),
        );
        let rendered = serde_json::to_value(&patches).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!([{
                "p_DC_id": 71,
                "description": "Replaced fuse",
                "followUpDate": "2025-06-20",
                "assignedTo": 9,
                "status": "CRS"
            }])
        );
    }

    #[test]
    fn filter_by_status_keeps_matching_entries() {
        let tickets = vec![
            ticket(1, "OPN", "2025-06-01"),
            ticket(2, "INP", "2025-06-02"),
            ticket(3, "OPN", "2025-06-03"),
        ];
        let filter = TicketFilter {
            status: Some(TicketStatus::Open),
            ..TicketFilter::default()
        };

        let filtered = filter.apply(tickets);
        assert_eq!(
            filtered.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn filter_date_bounds_are_inclusive() {
        let tickets = vec![
            ticket(1, "OPN", "2025-05-31"),
            ticket(2, "OPN", "2025-06-01"),
            ticket(3, "OPN", "2025-06-15"),
            ticket(4, "OPN", "2025-06-16"),
        ];
        let filter = TicketFilter {
            status: None,
            from: NaiveDate::from_ymd_opt(2025, 6, 1),
            to: NaiveDate::from_ymd_opt(2025, 6, 15),
        };

        let filtered = filter.apply(tickets);
        assert_eq!(
            filtered.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn filter_drops_undated_tickets_only_under_date_bounds() {
        let mut undated = ticket(1, "OPN", "2025-06-01");
        undated.created_at = None;

        assert!(TicketFilter::default().matches(&undated));

        let bounded = TicketFilter {
            from: NaiveDate::from_ymd_opt(2025, 1, 1),
            ..TicketFilter::default()
        };
        assert!(!bounded.matches(&undated));
    }
}
