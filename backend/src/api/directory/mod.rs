//! Relays for the signed-in user's directory resources: OAuth client
//! applications, domains and scopes.

pub mod routes;
