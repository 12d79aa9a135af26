//! In-memory implementation of [`CommentBackend`]
//!
//! Keeps threads as nested records the way the REST backend returns them.
//! Used by tests and offline demos.

use crate::backend::{CommentBackend, SolutionToggle};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use chrono::Utc;
use pb_core::comment::{CommentRecord, CommentRecordBuilder, NewComment};
use pb_core::{CommentId, ProblemId};
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Store {
    threads: HashMap<ProblemId, Vec<CommentRecord>>,
    next_id: u64,
    failure: Option<(u16, String)>,
    fetches: usize,
}

impl Store {
    fn take_failure(&mut self) -> Result<()> {
        match self.failure.take() {
            Some((status, message)) => Err(ClientError::Status { status, message }),
            None => Ok(()),
        }
    }

    fn thread_mut(&mut self, problem: &ProblemId) -> Result<&mut Vec<CommentRecord>> {
        self.threads
            .get_mut(problem)
            .ok_or_else(|| ClientError::NotFound(format!("Problem {}", problem)))
    }

    fn fresh_id(&mut self) -> CommentId {
        loop {
            self.next_id += 1;
            let id = CommentId::from(self.next_id);
            if !self.threads.values().any(|thread| find(thread, &id).is_some()) {
                return id;
            }
        }
    }
}

fn find<'a>(records: &'a [CommentRecord], id: &CommentId) -> Option<&'a CommentRecord> {
    records.iter().find_map(|record| {
        if &record.id == id {
            Some(record)
        } else {
            find(&record.replies, id)
        }
    })
}

fn find_mut<'a>(records: &'a mut [CommentRecord], id: &CommentId) -> Option<&'a mut CommentRecord> {
    records.iter_mut().find_map(|record| {
        if &record.id == id {
            Some(record)
        } else {
            find_mut(&mut record.replies, id)
        }
    })
}

fn remove(records: &mut Vec<CommentRecord>, id: &CommentId) -> bool {
    if let Some(pos) = records.iter().position(|record| &record.id == id) {
        records.remove(pos);
        return true;
    }
    records.iter_mut().any(|record| remove(&mut record.replies, id))
}

fn not_found(comment: &CommentId) -> ClientError {
    ClientError::NotFound(format!("Comment {}", comment))
}

/// Comment backend holding threads in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    store: Mutex<Store>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with one seeded thread
    pub fn with_thread(problem: ProblemId, records: Vec<CommentRecord>) -> Self {
        let mut store = Store::default();
        store.threads.insert(problem, records);
        Self {
            store: Mutex::new(store),
        }
    }

    /// Replace a problem's thread
    pub async fn set_thread(&self, problem: ProblemId, records: Vec<CommentRecord>) {
        self.store.lock().await.threads.insert(problem, records);
    }

    /// Current thread of a problem
    pub async fn thread(&self, problem: &ProblemId) -> Vec<CommentRecord> {
        self.store
            .lock()
            .await
            .threads
            .get(problem)
            .cloned()
            .unwrap_or_default()
    }

    /// Make the next call fail with `status`
    pub async fn fail_next(&self, status: u16, message: impl Into<String>) {
        self.store.lock().await.failure = Some((status, message.into()));
    }

    /// Number of thread fetches served
    pub async fn fetch_count(&self) -> usize {
        self.store.lock().await.fetches
    }
}

#[async_trait]
impl CommentBackend for MemoryBackend {
    async fn fetch_comments(&self, problem: &ProblemId) -> Result<Vec<CommentRecord>> {
        let mut store = self.store.lock().await;
        store.take_failure()?;
        store.fetches += 1;
        Ok(store.threads.get(problem).cloned().unwrap_or_default())
    }

    async fn post_comment(&self, problem: &ProblemId, comment: &NewComment) -> Result<CommentRecord> {
        let mut store = self.store.lock().await;
        store.take_failure()?;

        let id = store.fresh_id();
        let record = CommentRecordBuilder::new(id)
            .text(comment.text.clone())
            .author(comment.author_id.clone())
            .created_at(Utc::now())
            .build()?;

        let thread = store.threads.entry(problem.clone()).or_default();
        match &comment.parent_id {
            Some(parent_id) => {
                let parent = find_mut(thread, parent_id).ok_or_else(|| not_found(parent_id))?;
                parent.replies.push(record.clone());
            }
            None => thread.push(record.clone()),
        }
        Ok(record)
    }

    async fn put_comment(
        &self,
        problem: &ProblemId,
        comment: &CommentId,
        text: &str,
    ) -> Result<CommentRecord> {
        let mut store = self.store.lock().await;
        store.take_failure()?;

        let record = find_mut(store.thread_mut(problem)?, comment).ok_or_else(|| not_found(comment))?;
        record.text = text.to_string();
        record.updated_at = Some(Utc::now().max(record.created_at));

        let mut answer = record.clone();
        answer.replies.clear();
        Ok(answer)
    }

    async fn delete_comment(&self, problem: &ProblemId, comment: &CommentId) -> Result<()> {
        let mut store = self.store.lock().await;
        store.take_failure()?;

        if remove(store.thread_mut(problem)?, comment) {
            Ok(())
        } else {
            Err(not_found(comment))
        }
    }

    async fn put_solution_toggle(
        &self,
        problem: &ProblemId,
        comment: &CommentId,
    ) -> Result<SolutionToggle> {
        let mut store = self.store.lock().await;
        store.take_failure()?;

        let record = find_mut(store.thread_mut(problem)?, comment).ok_or_else(|| not_found(comment))?;
        record.is_solution = !record.is_solution;
        Ok(SolutionToggle {
            is_solution: record.is_solution,
        })
    }
}
