//! Repository upload: clone a remote repository into a scoped scratch
//! directory and copy its file tree into object storage.

pub mod ports;
pub mod service;
pub mod tree;
