//! Reshaping of raw GLPI search records into the client-facing models.

pub mod fields;
pub mod tickets;
pub mod users;

pub use tickets::{format_tickets, AuthorResolver, FormattedTicket, TicketStatus, UpstreamAuthorResolver, UNKNOWN};
pub use users::{format_users, FormattedUser};
