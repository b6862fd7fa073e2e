// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the breakdown report chat.
//!
//! Serves the single-page chat UI and the JSON API it drives. Sessions live
//! in memory until the page deletes them or they sit idle past the configured
//! timeout.

pub mod handlers;
pub mod server;
pub mod sessions;

pub use server::{router, start_server, AppState, ServerConfig};
pub use sessions::{sweep_idle_sessions, SessionStore};
