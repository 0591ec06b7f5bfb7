use chrono::NaiveDate;
use serde::Serialize;

use tickline_core::auth::{Session, SessionPersistence};
use tickline_core::{AuthClient, Ticket, TicketClient, TicketStatus};

use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;
use crate::session_store::SessionStore;

/// Resolved profile name, base URL, and session store for one invocation.
pub struct ProfileContext {
    pub profile_name: String,
    pub base_url: String,
    pub store: SessionStore,
}

impl ProfileContext {
    pub fn resolve(global_profile: Option<&str>, explicit: Option<&str>) -> Result<Self, CliError> {
        let config = CliProfilesConfig::load().map_err(CliError::Config)?;
        let profile_name = config.resolve_profile_name(explicit.or(global_profile));
        let profile = config.profile(&profile_name).cloned().unwrap_or_default();
        let base_url = profile.api_base_url().ok_or(CliError::ApiNotConfigured)?;

        Ok(Self {
            store: SessionStore::for_profile(&profile_name),
            profile_name,
            base_url,
        })
    }

    pub fn auth_client(&self) -> Result<AuthClient<SessionStore>, CliError> {
        Ok(AuthClient::new(&self.base_url, self.store.clone())?)
    }

    pub fn ticket_client(&self) -> Result<TicketClient<SessionStore>, CliError> {
        Ok(TicketClient::new(&self.base_url, self.store.clone())?)
    }

    /// The persisted session, or a signed-out error.
    ///
    /// Storage failures count as signed out, matching the store contract.
    pub fn require_session(&self) -> Result<Session, CliError> {
        self.store
            .load_session()
            .ok()
            .flatten()
            .ok_or(CliError::NotSignedIn)
    }
}

/// The client account id the session belongs to.
pub fn require_client_id(session: &Session) -> Result<i64, CliError> {
    session.profile.client_id.ok_or_else(|| {
        CliError::Config(
            "Stored session has no client id; sign in again to refresh it".to_string(),
        )
    })
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(raw.to_string()))
}

/// Parse a status code, accepting only the codes the backend publishes.
pub fn parse_known_status(raw: &str) -> Result<TicketStatus, CliError> {
    let status = TicketStatus::from_code(raw);
    if matches!(status, TicketStatus::Other(_)) {
        return Err(CliError::Config(format!(
            "Unknown status code '{}'. Expected one of: {}",
            raw,
            TicketStatus::KNOWN_CODES.join(", ")
        )));
    }
    Ok(status)
}

#[derive(Debug, Serialize)]
pub struct TicketListItem {
    pub id: i64,
    pub status: String,
    pub status_label: String,
    pub created_at: Option<String>,
    pub contact: Option<String>,
    pub products: Vec<String>,
    pub issues: Vec<String>,
}

pub fn ticket_to_list_item(ticket: &Ticket) -> TicketListItem {
    TicketListItem {
        id: ticket.id,
        status: ticket.status.code().to_string(),
        status_label: ticket.status.label().to_string(),
        created_at: ticket.created_at.clone(),
        contact: ticket.complaint_mobile.clone(),
        products: ticket
            .complaints
            .iter()
            .filter_map(|complaint| complaint.product_name.clone())
            .collect(),
        issues: ticket
            .complaints
            .iter()
            .filter_map(|complaint| complaint.complaint_detail.clone())
            .collect(),
    }
}

pub fn format_ticket_lines(tickets: &[Ticket]) -> Vec<String> {
    if tickets.is_empty() {
        return vec!["No tickets matched.".to_string()];
    }

    tickets
        .iter()
        .map(|ticket| {
            let created = ticket.created_at.as_deref().unwrap_or("-");
            let issues = ticket
                .complaints
                .iter()
                .filter_map(|complaint| complaint.complaint_detail.as_deref())
                .collect::<Vec<_>>()
                .join(", ");
            let issues = if issues.is_empty() {
                "(no detail)".to_string()
            } else {
                issues
            };
            format!(
                "#{:<6} {:<24} {:<20} {}",
                ticket.id,
                ticket.status.label(),
                created,
                issues
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ticket(id: i64, status: &str) -> Ticket {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "status": status,
            "createdAt": "2025-06-01",
            "complaint_mobile": "9998887776",
            "complaints": [
                {"id": 1, "complaint_detail": "No power", "product_name": "Inverter"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(
            parse_date("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(parse_date("01/06/2025").is_err());
    }

    #[test]
    fn parse_known_status_rejects_unknown_codes() {
        assert_eq!(parse_known_status("crs").unwrap(), TicketStatus::Resolved);
        assert!(parse_known_status("ESC").is_err());
    }

    #[test]
    fn list_item_carries_status_and_complaint_fields() {
        let item = ticket_to_list_item(&ticket(31, "OPN"));
        assert_eq!(item.status, "OPN");
        assert_eq!(item.status_label, "Open");
        assert_eq!(item.products, vec!["Inverter".to_string()]);
        assert_eq!(item.issues, vec!["No power".to_string()]);
    }

    #[test]
    fn format_ticket_lines_handles_empty_list() {
        assert_eq!(format_ticket_lines(&[]), vec!["No tickets matched."]);
        let lines = format_ticket_lines(&[ticket(31, "INP")]);
        assert!(lines[0].contains("#31"));
        assert!(lines[0].contains("In Progress"));
    }
}
