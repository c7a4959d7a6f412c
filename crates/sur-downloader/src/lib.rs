//! Remote repository client for sur.
//!
//! The remote service speaks a small HTTP protocol:
//!
//! - `GET /list` returns the full catalog (double-encoded)
//! - `GET /get/{digest}` streams one package archive
//! - `POST /submit` uploads a package (multipart `user` and `file`)
//! - `POST /annotate` flags a package (form `digest` and `user`)

#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod progress;

pub use client::RemoteClient;
pub use progress::{BarProgress, NoProgress, ProgressSink};
