// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interview sessions and the dialogue driver.
//!
//! A [`Session`] is the state of one user's interview. The
//! [`DialogueDriver`] runs chat turns against a completion provider, attaches
//! hosted photos, and hands confirmed summaries to the report service.

pub mod dialogue;
pub mod prompt;
pub mod session;

pub use dialogue::{classify_reply, DialogueDriver, DialogueState, Turn};
pub use prompt::{load_system_instruction, photo_notice, SYSTEM_INSTRUCTION};
pub use session::Session;
