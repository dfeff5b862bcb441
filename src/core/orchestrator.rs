use crate::domain::model::{FormState, PredictionRequest, PredictionResult};
use crate::domain::ports::PredictionService;
use crate::utils::error::{PredictError, Result, BACKEND_UNAVAILABLE_MESSAGE};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Where the current request cycle stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestLifecycle {
    #[default]
    Idle,
    Pending,
    Succeeded(PredictionResult),
    Failed(String),
}

impl RequestLifecycle {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestLifecycle::Pending)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            RequestLifecycle::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestLifecycle::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RequestLifecycle::Idle => "idle",
            RequestLifecycle::Pending => "pending",
            RequestLifecycle::Succeeded(_) => "succeeded",
            RequestLifecycle::Failed(_) => "failed",
        }
    }
}

/// Identifies one dispatched request so its completion can be matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitOutcome {
    Dispatched {
        ticket: RequestTicket,
        request: PredictionRequest,
    },
    /// A request is already in flight; nothing changed.
    Rejected,
    /// The request could not be dispatched at all; the lifecycle is now `Failed`.
    NotDispatched,
}

impl SubmitOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, SubmitOutcome::Dispatched { .. })
    }
}

#[derive(Debug)]
struct Completion {
    ticket: RequestTicket,
    outcome: Result<PredictionResult>,
}

/// Drives one prediction request at a time through
/// `Idle -> Pending -> Succeeded | Failed`.
///
/// `submit` spawns the service call on the current tokio runtime and returns
/// immediately. The outcome is sent back over a channel and only applied when
/// the owner calls [`poll`](Self::poll) or [`settle`](Self::settle), so all
/// state changes happen on the owner's task.
pub struct RequestOrchestrator {
    service: Arc<dyn PredictionService>,
    lifecycle: RequestLifecycle,
    in_flight: Option<RequestTicket>,
    next_ticket: u64,
    dispatched: u64,
    last_request: Option<PredictionRequest>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl RequestOrchestrator {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            service,
            lifecycle: RequestLifecycle::Idle,
            in_flight: None,
            next_ticket: 0,
            dispatched: 0,
            last_request: None,
            completion_tx,
            completion_rx,
        }
    }

    pub fn submit(&mut self, form: &FormState) -> SubmitOutcome {
        if self.lifecycle.is_pending() {
            tracing::debug!("Submit ignored: a prediction request is already pending");
            return SubmitOutcome::Rejected;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!("❌ Cannot dispatch prediction request: {}", e);
                self.lifecycle = RequestLifecycle::Failed(BACKEND_UNAVAILABLE_MESSAGE.to_string());
                return SubmitOutcome::NotDispatched;
            }
        };

        let request = PredictionRequest::from_form(form);
        let non_numeric = request.non_numeric_fields();
        if !non_numeric.is_empty() {
            // 不在客戶端擋下，交給服務端判斷
            tracing::debug!("Dispatching with non-numeric fields: {:?}", non_numeric);
        }

        self.next_ticket += 1;
        let ticket = RequestTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        self.dispatched += 1;
        self.last_request = Some(request);
        self.lifecycle = RequestLifecycle::Pending;

        tracing::info!("🚀 Dispatching prediction request {}", ticket);

        let service = Arc::clone(&self.service);
        let completion_tx = self.completion_tx.clone();
        runtime.spawn(async move {
            let outcome = service.predict(&request).await;
            if completion_tx.send(Completion { ticket, outcome }).is_err() {
                tracing::debug!(
                    "Completion for request {} arrived after teardown; ignored",
                    ticket
                );
            }
        });

        SubmitOutcome::Dispatched { ticket, request }
    }

    /// Apply any completion that has already arrived, without waiting.
    /// Returns `true` if the lifecycle changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Wait for the in-flight request, if any, to finish.
    ///
    /// Returns immediately when nothing is pending. A request that never
    /// completes keeps this future pending forever.
    pub async fn settle(&mut self) -> &RequestLifecycle {
        while self.lifecycle.is_pending() {
            match self.completion_rx.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => break,
            }
        }
        &self.lifecycle
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if self.in_flight != Some(completion.ticket) {
            tracing::debug!("Ignoring stale completion for request {}", completion.ticket);
            return false;
        }
        self.in_flight = None;

        self.lifecycle = match completion.outcome {
            Ok(result) => {
                tracing::info!(
                    "✅ Request {} succeeded: best model {} ({} rows)",
                    completion.ticket,
                    result.best_model,
                    result.comparison.len()
                );
                RequestLifecycle::Succeeded(result)
            }
            Err(e) => {
                log_failure(completion.ticket, &e);
                RequestLifecycle::Failed(e.user_friendly_message())
            }
        };
        true
    }

    pub fn lifecycle(&self) -> &RequestLifecycle {
        &self.lifecycle
    }

    pub fn is_pending(&self) -> bool {
        self.lifecycle.is_pending()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.lifecycle.result()
    }

    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }

    /// Number of requests dispatched over this orchestrator's lifetime.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn last_request(&self) -> Option<&PredictionRequest> {
        self.last_request.as_ref()
    }
}

fn log_failure(ticket: RequestTicket, error: &PredictError) {
    tracing::warn!(
        "❌ Request {} failed ({:?}): {}",
        ticket,
        error.kind(),
        error
    );
    tracing::debug!("💡 {}", error.recovery_suggestion());
}
