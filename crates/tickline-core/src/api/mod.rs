//! Typed client for the ticket backend.
//!
//! One `TicketClient` is bound to a single base origin. Every outgoing
//! request reads the persisted session and, when one is present, carries
//! `Authorization: Bearer <credential>`; otherwise it goes out
//! unauthenticated and the server decides. Calls are independent and
//! stateless — no retries, no backoff, no shared state beyond the
//! read-only credential.

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use crate::auth::SessionPersistence;
use crate::envelope::{parse_api_error, ApiStatus, Envelope};
use crate::error::{Error, Result};
use crate::models::{ComplaintPatch, Ticket, TicketCounts, UserProfile};
use crate::util::normalize_base_url;

#[derive(Clone)]
pub struct TicketClient<S: SessionPersistence> {
    base_url: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> TicketClient<S> {
    pub fn new(base_url: impl AsRef<str>, store: S) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            client: crate::util::http_client()?,
            store,
        })
    }

    /// Fetch a single ticket with its nested complaints.
    pub async fn fetch_ticket(&self, ticket_id: i64) -> Result<Ticket> {
        let request = self
            .client
            .get(format!("{}/getTicket", self.base_url))
            .query(&[("id", ticket_id)]);
        let response = self.send(request).await?;
        let envelope = response.json::<Envelope<Ticket>>().await?;
        envelope.into_data("Failed to fetch ticket details")
    }

    /// Submit a remark/status update for a ticket's complaints.
    ///
    /// Returns the server's acknowledgement message.
    pub async fn update_ticket(
        &self,
        ticket_id: i64,
        patches: &[ComplaintPatch],
        remark: &str,
        updated_by: i64,
    ) -> Result<String> {
        let payload = serde_json::json!({
            "ticketId": ticket_id,
            "complaintIDs": patches,
            "description": remark,
            "updatedBy": updated_by,
        });
        let request = self
            .client
            .post(format!("{}/updateTicket", self.base_url))
            .json(&payload);
        let response = self.send(request).await?;
        let envelope = response.json::<Envelope<serde_json::Value>>().await?;
        envelope.into_ack("Ticket updated")
    }

    /// Tickets assigned to one agent within a client account.
    pub async fn list_tickets_for_agent(
        &self,
        client_id: i64,
        agent_id: i64,
    ) -> Result<Vec<Ticket>> {
        let request = self
            .client
            .get(format!("{}/getAgentTicketsWithDetails", self.base_url))
            .query(&[("client_id", client_id), ("agent_id", agent_id)]);
        let response = self.send(request).await?;
        let payload = response.json::<TicketListResponse>().await?;
        payload.into_tickets()
    }

    /// All tickets of a client account.
    pub async fn list_tickets_for_client(&self, client_id: i64) -> Result<Vec<Ticket>> {
        let request = self
            .client
            .get(format!("{}/getAllTicketsWithDetails", self.base_url))
            .query(&[("clientId", client_id)]);
        let response = self.send(request).await?;
        let payload = response.json::<TicketListResponse>().await?;
        payload.into_tickets()
    }

    /// Aggregate counts by status, optionally scoped to one agent.
    pub async fn count_tickets(&self, agent_id: Option<i64>) -> Result<TicketCounts> {
        let mut request = self.client.get(format!("{}/getTicketCounts", self.base_url));
        if let Some(agent_id) = agent_id {
            request = request.query(&[("agentId", agent_id)]);
        }
        let response = self.send(request).await?;
        let envelope = response.json::<Envelope<TicketCounts>>().await?;
        envelope.into_data("Failed to fetch ticket counts")
    }

    /// Aggregate counts by status across a whole client account.
    pub async fn count_tickets_by_client(&self, client_id: i64) -> Result<TicketCounts> {
        let request = self
            .client
            .get(format!("{}/getTicketCountsByClient", self.base_url))
            .query(&[("clientId", client_id)]);
        let response = self.send(request).await?;
        let envelope = response.json::<Envelope<TicketCounts>>().await?;
        envelope.into_data("Failed to fetch ticket counts")
    }

    /// Fetch a user profile by id.
    pub async fn fetch_profile(&self, user_id: i64) -> Result<UserProfile> {
        let request = self
            .client
            .get(format!("{}/manage-user", self.base_url))
            .query(&[("p_user_id", user_id)]);
        let response = self.send(request).await?;
        let envelope = response.json::<Envelope<UserProfile>>().await?;
        envelope.into_data("Failed to fetch user profile")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = crate::auth::with_bearer(&self.store, request).send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api(parse_api_error(status, &body)))
        }
    }
}

/// List endpoints skip the standard envelope and answer `{tickets: [...]}`.
#[derive(Debug, Deserialize)]
struct TicketListResponse {
    #[serde(default)]
    status: Option<ApiStatus>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    tickets: Option<Vec<Ticket>>,
}

impl TicketListResponse {
    fn into_tickets(self) -> Result<Vec<Ticket>> {
        let failed = self
            .status
            .as_ref()
            .is_some_and(|status| !status.is_success());
        match self.tickets {
            Some(tickets) if !failed => Ok(tickets),
            _ => Err(Error::Api(
                self.message
                    .unwrap_or_else(|| "Failed to fetch tickets".to_string()),
            )),
        }
    }
}
