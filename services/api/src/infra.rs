use chrono::{DateTime, Utc};
use impact_award::workflows::application::{
    FormState, SubmissionError, SubmissionGateway, SubmissionId, SubmissionReceipt,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Application handed over by a session, as retained by the in-memory gateway.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DeliveredApplication {
    pub(crate) submission_id: SubmissionId,
    pub(crate) received_at: DateTime<Utc>,
    pub(crate) application: FormState,
}

/// Acknowledges every finalized application and keeps a copy in memory.
#[derive(Default, Clone)]
pub(crate) struct AcknowledgingGateway {
    deliveries: Arc<Mutex<Vec<DeliveredApplication>>>,
}

impl SubmissionGateway for AcknowledgingGateway {
    fn deliver(&self, application: &FormState) -> Result<SubmissionReceipt, SubmissionError> {
        let receipt = SubmissionReceipt::issue();
        let mut guard = self
            .deliveries
            .lock()
            .map_err(|_| SubmissionError::Transport("delivery log unavailable".to_string()))?;
        guard.push(DeliveredApplication {
            submission_id: receipt.submission_id.clone(),
            received_at: receipt.received_at,
            application: application.clone(),
        });
        info!(
            submission_id = %receipt.submission_id,
            company = %application.company_name,
            "application acknowledged"
        );
        Ok(receipt)
    }
}

impl AcknowledgingGateway {
    pub(crate) fn deliveries(&self) -> Vec<DeliveredApplication> {
        self.deliveries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
