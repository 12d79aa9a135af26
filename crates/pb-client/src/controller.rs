//! Thread controller
//!
//! Drives a [`ThreadState`] against a [`CommentBackend`]. Every user action
//! goes through here: writes are sent to the backend, the thread is
//! reloaded when ids or ordering are assigned server-side, and failures end
//! up as a one-shot [`Notice`] instead of an error the view has to handle.

use crate::backend::CommentBackend;
use crate::error::{ClientError, Result};
use pb_core::comment::{CommentForest, CommentRecord, CommentValidator, NewComment, ThreadView};
use pb_core::config::ThreadConfig;
use pb_core::generation::{ReloadTicket, ThreadState};
use pb_core::{CommentId, ProbboardError, ProblemId, UserId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One-shot message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
}

impl Notice {
    /// Create a notice
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Text of the notice
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A reload that has been issued but not fetched yet
pub struct PendingReload {
    ticket: ReloadTicket,
    backend: Arc<dyn CommentBackend>,
}

impl PendingReload {
    /// Ticket the reload was issued with
    pub fn ticket(&self) -> &ReloadTicket {
        &self.ticket
    }

    /// Fetch the thread from the backend
    pub async fn fetch(self) -> FetchedReload {
        let result = self.backend.fetch_comments(self.ticket.problem()).await;
        FetchedReload {
            ticket: self.ticket,
            result,
        }
    }
}

/// Backend answer to a reload, waiting to be applied
pub struct FetchedReload {
    ticket: ReloadTicket,
    result: Result<Vec<CommentRecord>>,
}

impl FetchedReload {
    /// Ticket the reload was issued with
    pub fn ticket(&self) -> &ReloadTicket {
        &self.ticket
    }
}

/// Coordinates a problem's thread with the backend
pub struct ThreadController {
    state: ThreadState,
    backend: Arc<dyn CommentBackend>,
    validator: CommentValidator,
    strict_single_solution: bool,
    user: UserId,
    notice: Option<Notice>,
}

impl ThreadController {
    /// Create a controller with default thread settings
    pub fn new(problem: ProblemId, backend: Arc<dyn CommentBackend>, user: UserId) -> Self {
        Self::from_config(problem, backend, user, &ThreadConfig::default())
    }

    /// Create a controller from the `[thread]` config section
    pub fn from_config(
        problem: ProblemId,
        backend: Arc<dyn CommentBackend>,
        user: UserId,
        config: &ThreadConfig,
    ) -> Self {
        Self {
            state: ThreadState::with_max_depth(problem, config.max_depth),
            backend,
            validator: CommentValidator::from_config(config),
            strict_single_solution: config.strict_single_solution,
            user,
            notice: None,
        }
    }

    /// Current thread state
    pub fn state(&self) -> &ThreadState {
        &self.state
    }

    /// Problem currently shown
    pub fn problem(&self) -> &ProblemId {
        self.state.problem()
    }

    /// Bounded-depth view of the thread
    pub fn view(&self) -> ThreadView<'_> {
        self.state.view()
    }

    /// Take the pending notice, if any
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Show another problem's thread
    ///
    /// The forest is cleared and reloads issued for the previous problem are
    /// dropped when they complete.
    pub fn switch_problem(&mut self, problem: ProblemId) {
        self.state.switch_problem(problem);
    }

    /// Issue a reload without waiting for it
    pub fn begin_reload(&mut self) -> PendingReload {
        PendingReload {
            ticket: self.state.begin_reload(),
            backend: Arc::clone(&self.backend),
        }
    }

    /// Apply a fetched reload
    ///
    /// Returns whether the forest was replaced. Answers to superseded tickets
    /// are dropped without a notice, failures included.
    pub fn complete_reload(&mut self, fetched: FetchedReload) -> bool {
        let FetchedReload { ticket, result } = fetched;

        if !self.state.is_current(&ticket) {
            debug!(
                "Ignoring superseded reload {} for problem {}",
                ticket.generation(),
                ticket.problem()
            );
            return false;
        }

        let records = match result {
            Ok(records) => records,
            Err(e) => {
                self.fail("load comments", e);
                return false;
            }
        };

        if self.strict_single_solution {
            let candidate = CommentForest::from_records(records.clone());
            if let Err(e) = self.validator.validate_single_solution(&candidate) {
                self.fail("load comments", e.into());
                return false;
            }
        }

        match self.state.finish_reload(ticket, records) {
            Ok(()) => {}
            Err(ProbboardError::StaleReload { .. }) => return false,
            Err(e) => {
                self.fail("load comments", e.into());
                return false;
            }
        }

        if let Err(e) = self.validator.validate_single_solution(self.state.forest()) {
            warn!("Problem {}: {}", self.state.problem(), e);
        }
        true
    }

    /// Fetch and apply the thread
    pub async fn reload(&mut self) -> bool {
        let pending = self.begin_reload();
        let fetched = pending.fetch().await;
        self.complete_reload(fetched)
    }

    /// Post a top-level comment
    ///
    /// Blank text is ignored. Returns the id assigned by the backend.
    pub async fn post_comment(&mut self, text: &str) -> Option<CommentId> {
        let draft = self.state.prepare_comment(text, &self.user)?;
        self.submit(draft).await
    }

    /// Reply to a comment at any depth
    ///
    /// Blank text is ignored. Returns the id assigned by the backend.
    pub async fn reply(&mut self, parent_id: &CommentId, text: &str) -> Option<CommentId> {
        let draft = self.state.prepare_reply(parent_id, text, &self.user)?;
        self.submit(draft).await
    }

    async fn submit(&mut self, draft: NewComment) -> Option<CommentId> {
        if let Err(e) = self.validator.validate_new(&draft) {
            self.fail("post comment", e.into());
            return None;
        }

        let result = self.backend.post_comment(self.state.problem(), &draft).await;
        match result {
            Ok(record) => {
                info!("Posted comment {} on problem {}", record.id, self.state.problem());
                self.reload().await;
                Some(record.id)
            }
            Err(e) => {
                self.fail("post comment", e);
                None
            }
        }
    }

    /// Edit a comment's text
    ///
    /// The new text shows immediately; the backend's copy replaces it once
    /// the update is accepted, and the previous text comes back when it is
    /// rejected. Blank text and comments missing from the current thread
    /// are ignored.
    pub async fn edit(&mut self, id: &CommentId, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let Some(previous) = self
            .state
            .forest()
            .get(id)
            .map(|comment| CommentRecord::from_comment(comment, Vec::new()))
        else {
            return false;
        };
        if let Err(e) = self.validator.validate_text(text) {
            self.fail("edit comment", e.into());
            return false;
        }

        self.state.edit_text(id, text);
        let problem = self.state.problem().clone();
        let result = self.backend.put_comment(&problem, id, text).await;
        match result {
            Ok(record) => {
                self.state.apply_server_record(&record);
                true
            }
            Err(e) => {
                self.state.apply_server_record(&previous);
                self.fail("edit comment", e);
                false
            }
        }
    }

    /// Delete a comment together with its replies
    ///
    /// The subtree leaves the thread once the backend accepts the delete or
    /// reports the comment gone.
    pub async fn delete(&mut self, id: &CommentId) -> bool {
        if !self.state.forest().contains(id) {
            return false;
        }

        let problem = self.state.problem().clone();
        let result = self.backend.delete_comment(&problem, id).await;
        match result {
            Ok(()) => {
                self.state.delete(id);
                true
            }
            Err(e) if e.is_not_found() => {
                debug!("Comment {} was already gone on the backend", id);
                self.state.delete(id);
                true
            }
            Err(e) => {
                self.fail("delete comment", e);
                false
            }
        }
    }

    /// Flip a comment's solution flag
    ///
    /// The local flag follows the backend's answer, then the thread is
    /// reloaded so other comments pick up the backend's view of the problem.
    pub async fn toggle_solution(&mut self, id: &CommentId) -> bool {
        if !self.state.forest().contains(id) {
            return false;
        }

        let problem = self.state.problem().clone();
        let result = self.backend.put_solution_toggle(&problem, id).await;
        match result {
            Ok(toggle) => {
                self.state.toggle_solution(id, toggle.is_solution);
                self.reload().await;
                true
            }
            Err(e) => {
                self.fail("update solution", e);
                false
            }
        }
    }

    fn fail(&mut self, action: &str, err: ClientError) {
        warn!("Failed to {} on problem {}: {}", action, self.state.problem(), err);
        self.notice = Some(Notice::new(err.notification()));
    }
}
