// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user interview state.
//!
//! A [`Session`] owns its transcript and flags exclusively. It is mutated only
//! through [`DialogueDriver`](crate::DialogueDriver), which keeps the
//! transcript append-only with the system instruction at position 0.

use breakdesk_core::{BreakdeskError, ChatMessage, Role};

use crate::dialogue::DialogueState;

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) transcript: Vec<ChatMessage>,
    pub(crate) submitter_email: Option<String>,
    pub(crate) current_photo_url: Option<String>,
    pub(crate) state: DialogueState,
    pub(crate) pending_summary: Option<String>,
}

impl Session {
    /// Starts a session whose transcript holds only the system instruction.
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            transcript: vec![ChatMessage::system(system_instruction)],
            submitter_email: None,
            current_photo_url: None,
            state: DialogueState::Collecting,
            pending_summary: None,
        }
    }

    /// Full transcript, system entries included, in insertion order.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Entries shown to the user: everything except system entries.
    pub fn visible_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.transcript.iter().filter(|m| m.role != Role::System)
    }

    pub fn submitter_email(&self) -> Option<&str> {
        self.submitter_email.as_deref()
    }

    /// Records the submitter's email, opening the chat gate.
    ///
    /// The value is stored as typed (trimmed); no address validation is done.
    pub fn set_submitter_email(&mut self, email: &str) -> Result<(), BreakdeskError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(BreakdeskError::Session(
                "email address must not be empty".into(),
            ));
        }
        self.submitter_email = Some(email.to_string());
        Ok(())
    }

    pub fn current_photo_url(&self) -> Option<&str> {
        self.current_photo_url.as_deref()
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// True while the confirmation action should be offered.
    pub fn awaiting_confirmation(&self) -> bool {
        self.state == DialogueState::ConfirmPending
    }

    /// Most recent assistant reply; the text a confirmation would submit.
    pub fn pending_summary(&self) -> Option<&str> {
        self.pending_summary.as_deref()
    }

    pub(crate) fn reset_confirmation(&mut self) {
        self.state = DialogueState::Collecting;
        self.pending_summary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_with_system_entry_only() {
        let session = Session::new("instruction");
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0], ChatMessage::system("instruction"));
        assert_eq!(session.visible_messages().count(), 0);
        assert_eq!(session.state(), DialogueState::Collecting);
        assert!(!session.awaiting_confirmation());
        assert!(session.submitter_email().is_none());
        assert!(session.current_photo_url().is_none());
        assert!(session.pending_summary().is_none());
    }

    #[test]
    fn email_is_trimmed_and_blank_rejected() {
        let mut session = Session::new("x");
        assert!(matches!(
            session.set_submitter_email("   "),
            Err(BreakdeskError::Session(_))
        ));
        assert!(session.submitter_email().is_none());

        session.set_submitter_email(" sam@mineco.com ").unwrap();
        assert_eq!(session.submitter_email(), Some("sam@mineco.com"));
    }

    #[test]
    fn visible_messages_skip_system_entries() {
        let mut session = Session::new("x");
        session.transcript.push(ChatMessage::user("hi"));
        session.transcript.push(ChatMessage::system("notice"));
        session.transcript.push(ChatMessage::assistant("hello"));

        let roles: Vec<Role> = session.visible_messages().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
    }
}
