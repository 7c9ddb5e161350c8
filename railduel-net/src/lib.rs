//! Remote play for the railduel engine.
//!
//! The orchestrator side wraps a connection in a
//! [`remote_proxy::RemotePlayerProxy`], which implements the engine's
//! `Player` trait by speaking a newline-delimited text protocol: one request
//! line per decision, one reply line per request, a single request in flight
//! at a time. The player side runs a [`remote_client::RemotePlayerClient`],
//! which decodes requests and dispatches them to a local `Player`.

pub mod message;
pub mod remote_client;
pub mod remote_proxy;
pub mod serdes;
