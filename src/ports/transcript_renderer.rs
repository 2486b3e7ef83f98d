//! Transcript Renderer Port - the outward-facing display collaborator.
//!
//! Renderers only read. They receive a snapshot, the citation index and the
//! empty-state content, and never call back into the protocol.

use crate::domain::citation::{Citation, SourceIndex};
use crate::domain::transcript::Turn;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptView<'a> {
    pub turns: &'a [Turn],
    pub citations: &'a SourceIndex,
    pub empty_state: &'a str,
}

impl<'a> TranscriptView<'a> {
    /// Citations for the turn at `render_index`.
    pub fn citations_for(&self, render_index: usize) -> Vec<Citation> {
        self.citations.for_render(self.turns.len(), render_index)
    }
}

pub trait TranscriptRenderer {
    fn render(&mut self, view: TranscriptView<'_>) -> std::io::Result<()>;
}
