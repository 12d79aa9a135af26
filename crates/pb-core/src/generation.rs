//! Reload generations for a problem's thread
//!
//! Every fetch is tagged with a ticket. Only the answer to the most recently
//! issued ticket for the problem currently shown is applied; anything older
//! is dropped instead of overwriting fresher state.

use crate::comment::{CommentForest, CommentRecord, NewComment, ThreadView};
use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{ProbboardError, Result};
use crate::types::{CommentId, Generation, ProblemId, UserId};
use tracing::debug;

/// Handle for one in-flight reload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    problem: ProblemId,
    generation: Generation,
}

impl ReloadTicket {
    /// Problem the reload was issued for
    pub fn problem(&self) -> &ProblemId {
        &self.problem
    }

    /// Generation of the reload
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// Monotonic generation counter
#[derive(Debug, Clone, Default)]
pub struct ReloadGuard {
    latest: Generation,
}

impl ReloadGuard {
    /// Create a new guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next generation
    pub fn issue(&mut self) -> Generation {
        self.latest = self.latest.next();
        self.latest
    }

    /// Invalidate every generation issued so far
    pub fn invalidate(&mut self) {
        self.latest = self.latest.next();
    }

    /// Whether `generation` is the most recently issued one
    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.latest
    }

    /// Most recently issued generation
    pub fn latest(&self) -> Generation {
        self.latest
    }
}

/// The thread shown for one problem
///
/// Local edits, deletions and solution toggles apply to the current snapshot
/// right away and invalidate reloads issued before them.
#[derive(Debug, Clone)]
pub struct ThreadState {
    problem: ProblemId,
    forest: CommentForest,
    guard: ReloadGuard,
    max_depth: usize,
    loaded: Option<Generation>,
}

impl ThreadState {
    /// Create an empty thread for `problem`
    pub fn new(problem: ProblemId) -> Self {
        Self::with_max_depth(problem, DEFAULT_MAX_DEPTH)
    }

    /// Create an empty thread with a custom nesting cutoff
    pub fn with_max_depth(problem: ProblemId, max_depth: usize) -> Self {
        Self {
            problem,
            forest: CommentForest::new(),
            guard: ReloadGuard::new(),
            max_depth,
            loaded: None,
        }
    }

    /// Problem currently shown
    pub fn problem(&self) -> &ProblemId {
        &self.problem
    }

    /// Current comment forest
    pub fn forest(&self) -> &CommentForest {
        &self.forest
    }

    /// Generation of the last applied reload
    pub fn loaded_generation(&self) -> Option<Generation> {
        self.loaded
    }

    /// Show another problem, dropping the forest and outstanding reloads
    pub fn switch_problem(&mut self, problem: ProblemId) {
        if problem == self.problem {
            return;
        }
        debug!("Switching thread from problem {} to {}", self.problem, problem);
        self.problem = problem;
        self.forest = CommentForest::new();
        self.guard.invalidate();
        self.loaded = None;
    }

    /// Start a reload of the current problem
    pub fn begin_reload(&mut self) -> ReloadTicket {
        let generation = self.guard.issue();
        debug!("Reload {} issued for problem {}", generation, self.problem);
        ReloadTicket {
            problem: self.problem.clone(),
            generation,
        }
    }

    /// Whether an answer to `ticket` would still be applied
    pub fn is_current(&self, ticket: &ReloadTicket) -> bool {
        ticket.problem == self.problem && self.guard.is_current(ticket.generation)
    }

    /// Apply the answer to a reload
    ///
    /// Fails with [`ProbboardError::StaleReload`] and leaves the forest alone
    /// when the ticket is for another problem or a newer reload was issued.
    pub fn finish_reload(&mut self, ticket: ReloadTicket, records: Vec<CommentRecord>) -> Result<()> {
        if !self.is_current(&ticket) {
            debug!(
                "Dropping reload {} for problem {} (latest {} for {})",
                ticket.generation,
                ticket.problem,
                self.guard.latest(),
                self.problem
            );
            return Err(ProbboardError::StaleReload {
                problem: ticket.problem.to_string(),
                generation: ticket.generation.0,
                latest: self.guard.latest().0,
            });
        }

        self.forest.load(records);
        self.loaded = Some(ticket.generation);
        Ok(())
    }

    /// Prepare a reply, `None` when the text is blank
    pub fn prepare_reply(&self, parent_id: &CommentId, text: &str, author_id: &UserId) -> Option<NewComment> {
        self.forest.prepare_reply(parent_id, text, author_id)
    }

    /// Prepare a top-level comment, `None` when the text is blank
    pub fn prepare_comment(&self, text: &str, author_id: &UserId) -> Option<NewComment> {
        self.forest.prepare_comment(text, author_id)
    }

    /// Edit a comment's text locally
    pub fn edit_text(&mut self, id: &CommentId, text: &str) -> bool {
        let changed = self.forest.edit_text(id, text);
        if changed {
            self.guard.invalidate();
        }
        changed
    }

    /// Patch a comment with the backend's copy
    pub fn apply_server_record(&mut self, record: &CommentRecord) -> bool {
        self.forest.apply_server_record(record)
    }

    /// Delete a comment and its replies locally
    pub fn delete(&mut self, id: &CommentId) -> usize {
        let removed = self.forest.delete(id).len();
        if removed > 0 {
            self.guard.invalidate();
        }
        removed
    }

    /// Set a comment's solution flag to the backend's value
    pub fn toggle_solution(&mut self, id: &CommentId, is_solution: bool) -> bool {
        let found = self.forest.toggle_solution(id, is_solution);
        if found {
            self.guard.invalidate();
        }
        found
    }

    /// Bounded-depth view of the current thread
    pub fn view(&self) -> ThreadView<'_> {
        self.forest
            .produce_view(self.max_depth)
            .for_problem(self.problem.clone())
    }
}
