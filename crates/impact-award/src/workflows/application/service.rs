use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{FieldUpdate, FileField, FileHandle, FormState};
use super::session::{FormSession, SessionStatus, WordCount};
use super::steps::STEP_COUNT;
use super::submission::{SubmissionError, SubmissionGateway, SubmissionReceipt, SubmitOutcome};
use super::validation::ErrorMap;

pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Identifier for a hosted form session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("form-{id:06}"))
}

/// Open sessions plus a bounded archive of submitted ones. Only open sessions count toward
/// the capacity; the archive keeps the most recent submissions for repeat lookups.
#[derive(Default)]
struct SessionStore {
    open: HashMap<SessionId, FormSession>,
    submitted: HashMap<SessionId, FormSession>,
    submitted_order: VecDeque<SessionId>,
}

impl SessionStore {
    fn get_mut(&mut self, session_id: &SessionId) -> Option<&mut FormSession> {
        match self.open.get_mut(session_id) {
            Some(session) => Some(session),
            None => self.submitted.get_mut(session_id),
        }
    }

    /// Move a submitted session out of the open set, evicting the oldest archived entries
    /// beyond `retain`.
    fn archive(&mut self, session_id: &SessionId, retain: usize) {
        let Some(session) = self.open.remove(session_id) else {
            return;
        };
        while self.submitted_order.len() >= retain.max(1) {
            let Some(oldest) = self.submitted_order.pop_front() else {
                break;
            };
            self.submitted.remove(&oldest);
            debug!(session_id = %oldest, "submitted session evicted from archive");
        }
        self.submitted_order.push_back(session_id.clone());
        self.submitted.insert(session_id.clone(), session);
    }
}

/// Hosts independent form sessions and the gateway that receives finished applications.
pub struct ApplicationFormService<G> {
    store: Mutex<SessionStore>,
    gateway: Arc<G>,
    max_sessions: usize,
}

impl<G> ApplicationFormService<G>
where
    G: SubmissionGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_capacity(gateway, DEFAULT_MAX_SESSIONS)
    }

    /// `max_sessions` caps in-progress sessions and sizes the archive of submitted ones.
    pub fn with_capacity(gateway: Arc<G>, max_sessions: usize) -> Self {
        Self {
            store: Mutex::new(SessionStore::default()),
            gateway,
            max_sessions,
        }
    }

    /// Open a blank session at the first step.
    pub fn open(&self) -> Result<SessionView, ApplicationServiceError> {
        let mut store = self.lock()?;
        if store.open.len() >= self.max_sessions {
            warn!(max_sessions = self.max_sessions, "form session capacity reached");
            return Err(ApplicationServiceError::CapacityReached(self.max_sessions));
        }

        let session_id = next_session_id();
        let session = FormSession::new();
        let view = SessionView::from_session(session_id.clone(), &session);
        store.open.insert(session_id.clone(), session);
        info!(%session_id, "form session opened");
        Ok(view)
    }

    pub fn view(&self, session_id: &SessionId) -> Result<SessionView, ApplicationServiceError> {
        self.with_session(session_id, |_| ())
            .map(|((), view)| view)
    }

    pub fn update_field(
        &self,
        session_id: &SessionId,
        update: FieldUpdate,
    ) -> Result<SessionView, ApplicationServiceError> {
        self.with_open_session(session_id, |session| session.set_field(update))
            .map(|((), view)| view)
    }

    pub fn add_files(
        &self,
        session_id: &SessionId,
        field: FileField,
        files: Vec<FileHandle>,
    ) -> Result<SessionView, ApplicationServiceError> {
        self.with_open_session(session_id, |session| session.add_files(field, files))
            .map(|((), view)| view)
    }

    pub fn remove_file(
        &self,
        session_id: &SessionId,
        field: FileField,
        index: usize,
    ) -> Result<FileRemoval, ApplicationServiceError> {
        self.with_open_session(session_id, |session| session.remove_file(field, index))
            .map(|(removed, session)| FileRemoval { removed, session })
    }

    pub fn advance(&self, session_id: &SessionId) -> Result<Navigation, ApplicationServiceError> {
        self.with_open_session(session_id, FormSession::advance)
            .map(|(moved, session)| Navigation { moved, session })
    }

    pub fn back(&self, session_id: &SessionId) -> Result<Navigation, ApplicationServiceError> {
        self.with_open_session(session_id, FormSession::back)
            .map(|(moved, session)| Navigation { moved, session })
    }

    /// Submit the session's application. Repeat submits return the original receipt while
    /// the session is still archived. An accepted session stops counting toward capacity.
    pub fn submit(
        &self,
        session_id: &SessionId,
    ) -> Result<SubmissionResult, ApplicationServiceError> {
        let mut store = self.lock()?;
        let session = Self::find(&mut store, session_id)?;
        let outcome = session.submit(self.gateway.as_ref())?;
        let view = SessionView::from_session(session_id.clone(), session);

        if outcome.is_accepted() {
            store.archive(session_id, self.max_sessions);
        }
        Ok(SubmissionResult {
            outcome,
            session: view,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionStore>, ApplicationServiceError> {
        self.store
            .lock()
            .map_err(|_| ApplicationServiceError::StoreUnavailable)
    }

    fn find<'a>(
        store: &'a mut SessionStore,
        session_id: &SessionId,
    ) -> Result<&'a mut FormSession, ApplicationServiceError> {
        store.get_mut(session_id).ok_or_else(|| {
            warn!(%session_id, "unknown form session");
            ApplicationServiceError::SessionNotFound(session_id.clone())
        })
    }

    fn with_session<T>(
        &self,
        session_id: &SessionId,
        operation: impl FnOnce(&mut FormSession) -> T,
    ) -> Result<(T, SessionView), ApplicationServiceError> {
        let mut store = self.lock()?;
        let session = Self::find(&mut store, session_id)?;

        let result = operation(session);
        let view = SessionView::from_session(session_id.clone(), session);
        Ok((result, view))
    }

    fn with_open_session<T>(
        &self,
        session_id: &SessionId,
        operation: impl FnOnce(&mut FormSession) -> T,
    ) -> Result<(T, SessionView), ApplicationServiceError> {
        let (result, view) = self.with_session(session_id, |session| {
            if session.is_submitted() {
                None
            } else {
                Some(operation(session))
            }
        })?;

        match result {
            Some(result) => Ok((result, view)),
            None => Err(ApplicationServiceError::AlreadySubmitted(session_id.clone())),
        }
    }
}

/// Error raised by the form service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("form session '{0}' not found")]
    SessionNotFound(SessionId),
    #[error("form session '{0}' has already been submitted")]
    AlreadySubmitted(SessionId),
    #[error("form session capacity of {0} reached")]
    CapacityReached(usize),
    #[error("form session store unavailable")]
    StoreUnavailable,
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Snapshot of a session exposed to hosts.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub current_step: usize,
    pub step_title: &'static str,
    pub total_steps: usize,
    pub completed_steps: Vec<usize>,
    pub is_final_step: bool,
    pub form: FormState,
    pub errors: ErrorMap,
    pub word_counts: Vec<WordCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SubmissionReceipt>,
}

impl SessionView {
    pub fn from_session(session_id: SessionId, session: &FormSession) -> Self {
        Self {
            session_id,
            status: session.status(),
            current_step: session.current_step(),
            step_title: session.current_descriptor().title,
            total_steps: STEP_COUNT,
            completed_steps: session.completed_steps(),
            is_final_step: session.is_final_step(),
            form: session.state().clone(),
            errors: session.errors().clone(),
            word_counts: session.word_counts(),
            receipt: session.receipt().cloned(),
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.status == SessionStatus::Submitted
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub moved: bool,
    pub session: SessionView,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileRemoval {
    pub removed: Option<FileHandle>,
    pub session: SessionView,
}

#[derive(Debug, Clone)]
pub struct SubmissionResult {
    pub outcome: SubmitOutcome,
    pub session: SessionView,
}
