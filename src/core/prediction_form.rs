use crate::core::form::FormStateManager;
use crate::core::orchestrator::{RequestLifecycle, RequestOrchestrator, SubmitOutcome};
use crate::domain::model::{FieldName, FormState, PredictionResult};
use crate::domain::ports::PredictionService;
use crate::utils::error::Result;
use std::sync::Arc;

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct FormView<'a> {
    pub fields: &'a FormState,
    pub lifecycle: &'a RequestLifecycle,
}

impl FormView<'_> {
    /// Submission is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        !self.lifecycle.is_pending()
    }
}

/// One prediction form instance: its field values plus its request cycle.
pub struct PredictionForm {
    form: FormStateManager,
    orchestrator: RequestOrchestrator,
}

impl PredictionForm {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            form: FormStateManager::new(),
            orchestrator: RequestOrchestrator::new(service),
        }
    }

    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.form.set_field(name, value);
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.form.set_field_by_name(name, value)
    }

    pub fn field(&self, name: FieldName) -> &str {
        self.form.get(name)
    }

    pub fn snapshot(&self) -> FormState {
        self.form.snapshot()
    }

    pub fn revision(&self) -> u64 {
        self.form.revision()
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let snapshot = self.form.snapshot();
        self.orchestrator.submit(&snapshot)
    }

    pub fn poll(&mut self) -> bool {
        self.orchestrator.poll()
    }

    pub async fn settle(&mut self) -> &RequestLifecycle {
        self.orchestrator.settle().await
    }

    pub fn lifecycle(&self) -> &RequestLifecycle {
        self.orchestrator.lifecycle()
    }

    pub fn is_pending(&self) -> bool {
        self.orchestrator.is_pending()
    }

    pub fn error(&self) -> Option<&str> {
        self.orchestrator.error()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.orchestrator.result()
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator {
        &self.orchestrator
    }

    pub fn view(&self) -> FormView<'_> {
        FormView {
            fields: self.form.state(),
            lifecycle: self.orchestrator.lifecycle(),
        }
    }

    /// Tear the form down. A request still in flight runs to completion,
    /// but its outcome is discarded.
    pub fn unmount(self) {
        if self.orchestrator.is_pending() {
            tracing::debug!("Form unmounted while a prediction request is pending");
        }
    }
}
