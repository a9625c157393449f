//! Interactive client logic, independent of any terminal or HTTP library.
//!
//! `state` models the per-session transcript and conversation handle,
//! `gateway` is the port to the gateway service, and `session` drives the
//! chat, upload, and info views on top of both. `analysis` runs the
//! five-forces questionnaire locally, without the gateway.

pub mod analysis;
pub mod gateway;
pub mod session;
pub mod state;
