//! tickline-core - Core library for Tickline
//!
//! This crate contains the shared models, the session/auth layer, and the
//! typed ticket API client used by all Tickline front ends.

pub mod api;
pub mod auth;
pub mod envelope;
pub mod error;
pub mod models;
#[cfg(test)]
pub(crate) mod testing;
pub mod util;

pub use api::TicketClient;
pub use auth::{AuthClient, Session, SessionPersistence};
pub use error::{Error, Result};
pub use models::{
    Complaint, ComplaintPatch, Ticket, TicketCounts, TicketFilter, TicketStatus, UserProfile,
};
