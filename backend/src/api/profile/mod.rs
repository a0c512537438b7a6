//! Self-service profile endpoints: display info, avatar and password.
//!
//! Info and avatar are plain relays. The password change is checked locally and
//! ends the session when the upstream accepts it.

pub mod handlers;
pub mod routes;
