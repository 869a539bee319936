//! Outcome reporting for best-effort attachment steps.
//!
//! Creating or updating a project or task attaches related records (members,
//! required skills, assignees) one by one. A failing or ineligible candidate
//! never fails the surrounding operation; it is skipped and recorded here so
//! the caller can see which requested identifiers did not make it.

use serde::Serialize;

/// Reason a requested identifier was not attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The referenced record does not exist.
    NotFound,
    /// The candidate does not hold every skill the task requires.
    Ineligible,
    /// The identifier was already attached earlier in the same request.
    Duplicate,
    /// The store rejected the attachment or a lookup failed.
    Persistence(String),
}

/// A requested identifier that was skipped, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAttachment<I> {
    /// Identifier from the request.
    pub id: I,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Attached and skipped identifiers for one attachment pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentReport<I> {
    attached: Vec<I>,
    skipped: Vec<SkippedAttachment<I>>,
}

impl<I> Default for AttachmentReport<I> {
    fn default() -> Self {
        Self {
            attached: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<I: Copy + PartialEq> AttachmentReport<I> {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `id` was already attached or skipped in this pass.
    #[must_use]
    pub fn has_seen(&self, id: I) -> bool {
        self.attached.contains(&id) || self.skipped.iter().any(|entry| entry.id == id)
    }

    /// Records a successful attachment.
    pub fn attach(&mut self, id: I) {
        self.attached.push(id);
    }

    /// Records a skipped identifier.
    pub fn skip(&mut self, id: I, reason: SkipReason) {
        self.skipped.push(SkippedAttachment { id, reason });
    }

    /// Returns identifiers that were attached, in request order.
    #[must_use]
    pub fn attached(&self) -> &[I] {
        &self.attached
    }

    /// Returns identifiers that were skipped, in request order.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedAttachment<I>] {
        &self.skipped
    }

    /// Returns `true` when nothing was skipped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Splits the report into attached and skipped lists.
    #[must_use]
    pub fn into_parts(self) -> (Vec<I>, Vec<SkippedAttachment<I>>) {
        (self.attached, self.skipped)
    }
}
