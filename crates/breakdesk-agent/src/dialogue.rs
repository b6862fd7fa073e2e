// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn-taking over a [`Session`]: chat turns, photo attachment, and the
//! confirm/decline step that hands the summary to the report service.
//!
//! States: Collecting -> ConfirmPending (reply invites submission) ->
//! Confirmed (report written) -> Collecting. Declining returns to Collecting
//! without writing anything.

use std::sync::Arc;

use breakdesk_core::{BreakdeskError, ChatMessage, CompletionProvider, CompletionRequest, ImageHost};
use breakdesk_report::{ReportService, SubmissionOutcome};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::prompt::photo_notice;
use crate::session::Session;

/// Phrases whose presence in a reply means the assistant is asking to submit.
const SUBMIT_KEYWORDS: [&str; 2] = ["submit", "ready to send"];

/// Where an interview stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DialogueState {
    /// Still gathering fields.
    Collecting,
    /// The last reply invites the user to submit.
    ConfirmPending,
    /// A report was written for the pending summary.
    Confirmed,
}

/// Classifies an assistant reply by keyword, case-insensitively.
///
/// Only ever yields `Collecting` or `ConfirmPending`. This is a heuristic: a
/// match says nothing about whether the reply is a well-formed summary.
pub fn classify_reply(reply: &str) -> DialogueState {
    let lower = reply.to_lowercase();
    if SUBMIT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        DialogueState::ConfirmPending
    } else {
        DialogueState::Collecting
    }
}

/// Result of one chat turn.
#[derive(Debug, Clone)]
pub struct Turn {
    pub reply: String,
    pub state: DialogueState,
}

/// Drives sessions against a completion provider.
pub struct DialogueDriver {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    system_instruction: String,
}

impl DialogueDriver {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        model: impl Into<String>,
        system_instruction: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            system_instruction: system_instruction.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    /// A fresh session seeded with this driver's system instruction.
    pub fn new_session(&self) -> Session {
        Session::new(self.system_instruction.clone())
    }

    /// Runs one chat turn.
    ///
    /// The user entry is staged and sent with the full transcript; both the
    /// user and assistant entries are committed only when the provider
    /// answers. On any error the session is left exactly as it was.
    ///
    /// Once a reply invites submission the session stays `ConfirmPending`
    /// until it is confirmed or declined; the pending summary always tracks
    /// the latest reply.
    pub async fn send(&self, session: &mut Session, utterance: &str) -> Result<Turn, BreakdeskError> {
        if session.submitter_email.is_none() {
            return Err(BreakdeskError::Session(
                "enter your email address to start the chat".into(),
            ));
        }
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(BreakdeskError::Session("message must not be empty".into()));
        }

        let staged = ChatMessage::user(utterance);
        let mut messages = Vec::with_capacity(session.transcript.len() + 1);
        messages.extend_from_slice(&session.transcript);
        messages.push(staged.clone());

        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
        };
        let response = self.provider.complete(request).await.inspect_err(|e| {
            warn!(error = %e, "completion failed, turn rolled back");
        })?;

        let reply = response.content;
        session.transcript.push(staged);
        session.transcript.push(ChatMessage::assistant(reply.clone()));
        session.pending_summary = Some(reply.clone());

        if classify_reply(&reply) == DialogueState::ConfirmPending {
            session.state = DialogueState::ConfirmPending;
        }
        debug!(
            state = %session.state,
            entries = session.transcript.len(),
            model = %response.model,
            "turn committed"
        );

        Ok(Turn {
            reply,
            state: session.state,
        })
    }

    /// Uploads a photo and records its URL.
    ///
    /// On success the URL replaces any earlier photo and a system notice is
    /// appended so the assistant quotes it in the summary. On failure the
    /// session, including any earlier photo URL, is untouched.
    pub async fn attach_photo(
        &self,
        session: &mut Session,
        host: &dyn ImageHost,
        image: Vec<u8>,
    ) -> Result<String, BreakdeskError> {
        let url = host.upload(image).await.inspect_err(|e| {
            warn!(host = host.name(), error = %e, "photo upload failed");
        })?;

        session.current_photo_url = Some(url.clone());
        session.transcript.push(ChatMessage::system(photo_notice(&url)));
        info!(host = host.name(), url = %url, "photo attached");
        Ok(url)
    }

    /// Submits the pending summary as a report.
    ///
    /// Requires a `ConfirmPending` session with a pending summary. The
    /// uploaded photo URL, if any, overrides the one in the summary text. A
    /// log write failure leaves the session pending so the user can retry.
    pub async fn confirm(
        &self,
        session: &mut Session,
        reports: &ReportService,
    ) -> Result<SubmissionOutcome, BreakdeskError> {
        if session.state != DialogueState::ConfirmPending {
            return Err(BreakdeskError::Session(
                "there is no report waiting for confirmation".into(),
            ));
        }
        let (Some(summary), Some(email)) = (
            session.pending_summary.as_deref(),
            session.submitter_email.as_deref(),
        ) else {
            return Err(BreakdeskError::Session(
                "there is no report waiting for confirmation".into(),
            ));
        };

        let outcome = reports
            .submit(summary, email, session.current_photo_url.as_deref())
            .await?;

        session.state = DialogueState::Confirmed;
        info!(report_id = %outcome.report.report_id, state = %session.state, "submission confirmed");
        session.reset_confirmation();
        Ok(outcome)
    }

    /// Drops the pending confirmation without writing anything.
    pub fn decline(&self, session: &mut Session) {
        if session.state == DialogueState::ConfirmPending {
            debug!("submission declined");
        }
        session.reset_confirmation();
    }
}
