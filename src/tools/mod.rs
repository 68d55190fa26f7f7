//! Tool controllers
//!
//! Each workflow (merge, split, extract text, AI edit) is a small state
//! machine that owns its selection state and orchestrates calls into the
//! facade traits. Controllers never talk to the PDF libraries or the AI
//! transport directly.

mod ai_edit;
mod extract;
mod merge;
mod split;

pub use ai_edit::{AiEditTool, PendingExtract, PendingGenerate, DEFAULT_PROMPT, PRESET_PROMPTS};
pub use extract::ExtractTextTool;
pub use merge::MergeTool;
pub use split::SplitTool;

use crate::error::{Error, Result};

/// Lifecycle of a tool controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No input loaded
    Idle,
    /// Input loaded, awaiting an action
    FileLoaded,
    /// A facade or service call is in flight
    Processing,
    /// Last action succeeded; result available
    Ready,
    /// Last action failed; message stored, result cleared
    Error,
}

impl Phase {
    /// Selection mutations (toggle page, reorder file, edit prompt) are
    /// permitted whenever no operation is in flight. Error is included:
    /// every failure is recoverable and the user may adjust and retry.
    pub fn allows_selection_changes(self) -> bool {
        matches!(self, Phase::FileLoaded | Phase::Ready | Phase::Error)
    }
}

/// Ticket identifying one in-flight operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpTicket(u64);

/// Monotonic sequencer for in-flight operations.
///
/// Every new operation and every selection mutation or reset supersedes the
/// operations before it; a completion carrying a stale ticket is discarded
/// instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct OpSequencer {
    current: u64,
}

impl OpSequencer {
    /// Start a new operation, superseding any in flight.
    pub fn begin(&mut self) -> OpTicket {
        self.current += 1;
        OpTicket(self.current)
    }

    /// Invalidate whatever is in flight without starting anything.
    pub fn supersede(&mut self) {
        self.current += 1;
    }

    /// True when `ticket` belongs to the most recent operation.
    pub fn is_current(&self, ticket: OpTicket) -> bool {
        ticket.0 == self.current
    }
}

/// Ordered, duplicate-free set of 1-based page indices, bounded by the
/// loaded document's page count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    pages: Vec<u32>,
}

impl PageSelection {
    /// Add the page if absent, remove it if present. Kept in ascending
    /// order, so the eventual extraction follows document order.
    pub fn toggle(&mut self, page: u32, page_count: u32) -> Result<()> {
        if page < 1 || page > page_count {
            return Err(Error::PageOutOfBounds {
                page,
                total: page_count,
            });
        }

        match self.pages.iter().position(|&p| p == page) {
            Some(idx) => {
                self.pages.remove(idx);
            }
            None => {
                self.pages.push(page);
                self.pages.sort_unstable();
            }
        }

        Ok(())
    }

    pub fn select_all(&mut self, page_count: u32) {
        self.pages = (1..=page_count).collect();
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages.binary_search(&page).is_ok()
    }

    /// Selected pages in ascending order.
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Map a blocking-task join failure into our error type.
pub(crate) fn join_error(e: tokio::task::JoinError) -> Error {
    Error::Pdfium {
        reason: format!("Task join error: {}", e),
    }
}
