//! Session authentication utilities

mod session;

pub use session::{SessionClaims, SessionService};
