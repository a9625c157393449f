//! Interactive terminal client for the gateway.
//!
//! Three views share one session: chat (markdown-rendered replies, spinner
//! while waiting), upload (a three-field form), and info (reachability and
//! configuration). Slash commands switch views. Entry point:
//! `loop_runner::run_client_loop`.

pub mod banner;
pub mod commands;
pub mod form;
pub mod input;
pub mod loop_runner;
pub mod renderer;
