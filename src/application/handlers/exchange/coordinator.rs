//! ExchangeCoordinator - one request/response cycle with the chat backend.
//!
//! The coordinator is the only writer of the transcript and the citation
//! index. At most one exchange runs at a time; a `send` issued while one is
//! in flight is rejected without touching any state.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::errors::ExchangeError;
use super::response::ResponseShape;
use super::step_replayer::{RevealSummary, StepReplayer};
use crate::domain::citation::{decode_citation_header, PositionKey, SourceIndex};
use crate::domain::constraint::{ConstraintSchema, StructuredOutput};
use crate::domain::foundation::TurnId;
use crate::domain::replay::PacingPolicy;
use crate::domain::transcript::{TranscriptEntry, TranscriptStore, TurnDraft};
use crate::ports::{
    BackendResponse, ChatBackend, ChatRequest, CredentialProvider, FailureReporter, Pacer,
    ResponseHeaders, TranscriptRenderer, TranscriptView, WireTurn,
};

const IDLE: u8 = 0;
const LOADING: u8 = 1;
const STEPS_LOADING: u8 = 2;

/// How the assistant's side of an exchange is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeMode {
    /// Returned messages replace pending state in one update.
    #[default]
    Plain,
    /// Tool activity is revealed step by step before the answer.
    Steps,
}

impl ExchangeMode {
    fn phase(self) -> u8 {
        match self {
            Self::Plain => LOADING,
            Self::Steps => STEPS_LOADING,
        }
    }
}

/// What a call to `send` did.
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeOutcome {
    /// Another exchange was in flight; nothing happened.
    Rejected,
    /// A structured output was appended as one assistant turn.
    Structured { turn: TurnId, output: StructuredOutput },
    /// Plain-mode messages were merged into the transcript.
    Replied {
        turns: Vec<TurnId>,
        citations: Option<PositionKey>,
    },
    /// Steps were revealed, followed by the final answer.
    Revealed(RevealSummary),
    /// The exchange failed and was reported.
    Failed(ExchangeError),
}

impl ExchangeOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    pub fn error(&self) -> Option<&ExchangeError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Clears the in-flight phase on every exit path.
struct InFlightGuard<'a> {
    phase: &'a AtomicU8,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(phase: &'a AtomicU8, next: u8) -> Option<Self> {
        phase
            .compare_exchange(IDLE, next, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { phase })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.phase.store(IDLE, Ordering::Release);
    }
}

/// Orchestrates exchanges between the user, the backend and the transcript.
pub struct ExchangeCoordinator {
    backend: Arc<dyn ChatBackend>,
    credentials: Arc<dyn CredentialProvider>,
    reporter: Arc<dyn FailureReporter>,
    pacer: Arc<dyn Pacer>,
    pacing: PacingPolicy,
    transcript: Arc<TranscriptStore>,
    sources: Arc<SourceIndex>,
    mode: RwLock<ExchangeMode>,
    phase: AtomicU8,
}

impl ExchangeCoordinator {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        credentials: Arc<dyn CredentialProvider>,
        reporter: Arc<dyn FailureReporter>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            backend,
            credentials,
            reporter,
            pacer,
            pacing: PacingPolicy::default(),
            transcript: Arc::new(TranscriptStore::new()),
            sources: Arc::new(SourceIndex::new()),
            mode: RwLock::new(ExchangeMode::default()),
            phase: AtomicU8::new(IDLE),
        }
    }

    pub fn with_mode(mut self, mode: ExchangeMode) -> Self {
        self.mode = RwLock::new(mode);
        self
    }

    pub fn with_pacing(mut self, pacing: PacingPolicy) -> Self {
        self.pacing = pacing;
        self
    }

    /// Shares an existing transcript instead of starting empty.
    pub fn with_transcript(mut self, transcript: Arc<TranscriptStore>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn with_sources(mut self, sources: Arc<SourceIndex>) -> Self {
        self.sources = sources;
        self
    }

    pub fn transcript(&self) -> Arc<TranscriptStore> {
        Arc::clone(&self.transcript)
    }

    pub fn sources(&self) -> Arc<SourceIndex> {
        Arc::clone(&self.sources)
    }

    pub fn mode(&self) -> ExchangeMode {
        *self.mode.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches mode. Refused while an exchange is in flight.
    pub fn set_mode(&self, mode: ExchangeMode) -> bool {
        if self.is_loading() {
            return false;
        }
        *self.mode.write().unwrap_or_else(PoisonError::into_inner) = mode;
        true
    }

    /// True while any exchange is in flight.
    pub fn is_loading(&self) -> bool {
        self.phase.load(Ordering::Acquire) != IDLE
    }

    /// True while a step-revealing exchange is in flight.
    pub fn is_steps_loading(&self) -> bool {
        self.phase.load(Ordering::Acquire) == STEPS_LOADING
    }

    /// Renders the current snapshot with the citation index.
    pub fn render<R>(&self, renderer: &mut R, empty_state: &str) -> std::io::Result<()>
    where
        R: TranscriptRenderer + ?Sized,
    {
        let turns = self.transcript.snapshot();
        renderer.render(TranscriptView {
            turns: &turns,
            citations: &self.sources,
            empty_state,
        })
    }

    /// Sends one user message and applies the response.
    ///
    /// Failures are handed to the `FailureReporter` and returned as
    /// `ExchangeOutcome::Failed`; they never leave the coordinator as errors.
    /// The in-flight flag is cleared on every path.
    pub async fn send(&self, user_text: impl Into<String>) -> ExchangeOutcome {
        let mode = self.mode();
        let Some(_guard) = InFlightGuard::acquire(&self.phase, mode.phase()) else {
            debug!("exchange already in flight, send ignored");
            return ExchangeOutcome::Rejected;
        };

        match self.run(mode, user_text.into()).await {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(kind = error.kind(), "exchange failed");
                self.reporter.report(&error.to_report());
                ExchangeOutcome::Failed(error)
            }
        }
    }

    async fn run(&self, mode: ExchangeMode, user_text: String) -> Result<ExchangeOutcome, ExchangeError> {
        // 1. Optimistic user turn; the payload is everything up to and including it
        let user_turn = self.transcript.append(TurnDraft::user(user_text));
        let messages: Vec<WireTurn> = self.transcript.snapshot().iter().map(WireTurn::from).collect();

        // 2. Per-request credential
        let credential = self.credentials.credential().await?;
        let request = ChatRequest::new(messages)
            .with_intermediate_steps(mode == ExchangeMode::Steps)
            .with_credential(credential);

        let info = self.backend.backend_info();
        info!(
            backend = %info.name,
            mode = ?mode,
            user_turn = %user_turn,
            turns = request.messages.len(),
            "dispatching exchange"
        );

        // 3. Dispatch; any status comes back as a response
        let response = self.backend.exchange(request).await?;
        let shape = ResponseShape::interpret(&response)?;
        debug!(status = response.status, shape = shape.label(), "response interpreted");

        // 4. Branch on shape
        match shape {
            ResponseShape::Structured {
                constraints,
                metadata,
            } => self.apply_structured(&constraints, metadata.as_ref()),
            ResponseShape::Failure { status, message } => {
                Err(ExchangeError::backend(status, message.as_deref()))
            }
            ResponseShape::Messages(turns) => match mode {
                ExchangeMode::Plain => self.apply_messages(turns, &response),
                ExchangeMode::Steps => {
                    let replayer = StepReplayer::new(
                        Arc::clone(&self.transcript),
                        Arc::clone(&self.pacer),
                        self.pacing,
                    );
                    let drafts = turns.into_iter().map(WireTurn::into_draft).collect();
                    let summary = replayer.replay(drafts).await?;
                    info!(steps = summary.step_turns.len(), "steps revealed");
                    Ok(ExchangeOutcome::Revealed(summary))
                }
            },
        }
    }

    fn apply_structured(
        &self,
        constraints: &[serde_json::Value],
        metadata: Option<&serde_json::Value>,
    ) -> Result<ExchangeOutcome, ExchangeError> {
        let output = ConstraintSchema::validate_output(constraints, metadata).map_err(|rejection| {
            ExchangeError::MalformedConstraint {
                index: rejection.index,
                source: rejection.error,
            }
        })?;
        let text = output
            .to_display_text()
            .map_err(|e| ExchangeError::unrecognized(format!("constraints not displayable: {e}")))?;

        let turn = self.transcript.append(TurnDraft::assistant(text));
        info!(constraints = output.constraints().len(), turn = %turn, "structured output received");
        Ok(ExchangeOutcome::Structured { turn, output })
    }

    fn apply_messages(
        &self,
        turns: Vec<WireTurn>,
        response: &BackendResponse,
    ) -> Result<ExchangeOutcome, ExchangeError> {
        let prior = self.transcript.snapshot();
        let prior_len = prior.len();
        let entries = prior
            .into_iter()
            .map(TranscriptEntry::from)
            .chain(turns.into_iter().map(|t| TranscriptEntry::from(t.into_draft())));

        let mut ids = self.transcript.replace_all(entries)?;
        let appended = ids.split_off(prior_len.min(ids.len()));
        info!(appended = appended.len(), "messages received");

        // Citations are keyed relative to the transcript as it stands now
        let citations = self.correlate_citations(&response.headers);
        Ok(ExchangeOutcome::Replied {
            turns: appended,
            citations,
        })
    }

    fn correlate_citations(&self, headers: &ResponseHeaders) -> Option<PositionKey> {
        let (Some(sources), Some(index)) = (&headers.sources, &headers.message_index) else {
            return None;
        };
        match decode_citation_header(sources) {
            Ok(citations) if !citations.is_empty() => {
                let key = PositionKey::new(index.as_str());
                debug!(key = %key, count = citations.len(), "citations attached");
                self.sources.set(key.clone(), citations);
                Some(key)
            }
            Ok(_) => None,
            Err(error) => {
                debug!(error = %error, "discarding undecodable citation header");
                None
            }
        }
    }
}
