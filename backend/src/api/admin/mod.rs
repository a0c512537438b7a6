//! Module for the administrative relay.
//!
//! Users, roles, permissions, scopes, punishments and bans all live under the
//! upstream `/admin` tree and are relayed through one catch-all route.

pub mod handlers;
pub mod routes;
