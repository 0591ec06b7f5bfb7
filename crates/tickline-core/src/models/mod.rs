//! Data models shared across Tickline front ends.

pub mod counts;
pub mod ticket;
pub mod user;

pub use counts::TicketCounts;
pub use ticket::{Complaint, ComplaintPatch, Ticket, TicketFilter, TicketStatus};
pub use user::UserProfile;
