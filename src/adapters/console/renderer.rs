//! ConsoleRenderer - plain-text transcript output.
//!
//! Prints oldest first. Render indices count from the newest turn, which is
//! how citation keys are derived. Turns can be prefixed with their UTC
//! admission time.

use std::io::{self, Write};

use crate::domain::replay::StepRecord;
use crate::domain::transcript::{Role, Turn};
use crate::ports::{TranscriptRenderer, TranscriptView};

/// Writes the transcript to any `Write` sink.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    timestamps: bool,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            timestamps: false,
        }
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_turn(&mut self, turn: &Turn) -> io::Result<()> {
        if self.timestamps {
            write!(self.out, "[{}] ", turn.created_at().clock())?;
        }
        if let Some(step) = StepRecord::from_turn(turn) {
            let action = step
                .action
                .map(|call| format!("{}({})", call.function_name(), call.function_arguments()))
                .unwrap_or_else(|| "-".to_string());
            return writeln!(self.out, "  [step] {action} -> {}", step.observation);
        }

        let label = match turn.role() {
            Role::User => "you",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::System => "system",
        };
        writeln!(self.out, "{label}> {}", turn.content())
    }
}

impl<W: Write> TranscriptRenderer for ConsoleRenderer<W> {
    fn render(&mut self, view: TranscriptView<'_>) -> io::Result<()> {
        if view.turns.is_empty() {
            writeln!(self.out, "{}", view.empty_state)?;
            return self.out.flush();
        }

        let count = view.turns.len();
        for (position, turn) in view.turns.iter().enumerate() {
            self.write_turn(turn)?;
            for (n, citation) in view.citations_for(count - 1 - position).iter().enumerate() {
                writeln!(self.out, "    [{}] {}", n + 1, citation)?;
            }
        }
        self.out.flush()
    }
}
