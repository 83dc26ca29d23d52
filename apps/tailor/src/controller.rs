//! JobFormController: the generate / regenerate flow.
//!
//! Per action: `Idle → Submitting → Idle`. A trigger while `Submitting` is
//! rejected. The current job id is owned here and only written after a
//! `/generate` response has fully resolved.

use std::cell::{Cell, RefCell};
use std::future::Future;

use tracing::{debug, error, info, warn};

use crate::errors::ClientError;
use crate::models::form::{FormInput, ResumeMode};
use crate::models::job::{JobId, JobResult};
use crate::render::{ResultRenderer, ResultView};
use crate::service::JobService;

pub const GENERATING_MESSAGE: &str = "Generating resume...";
pub const REGENERATING_MESSAGE: &str = "Regenerating resume...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another request is still in flight.
    Busy,
    /// Regenerate was triggered before any job existed.
    NoJob,
}

/// How an action settled. Failures have already been alerted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Rendered(JobId),
    Failed(String),
    Skipped(SkipReason),
}

pub struct JobFormController<S, R> {
    service: S,
    renderer: R,
    current_job_id: RefCell<Option<JobId>>,
    phase: Cell<Phase>,
    mode: Cell<ResumeMode>,
}

/// Restores the idle, interactive state when an action ends, however it ends.
struct SubmitGuard<'a, R: ResultRenderer> {
    phase: &'a Cell<Phase>,
    renderer: &'a R,
}

impl<R: ResultRenderer> Drop for SubmitGuard<'_, R> {
    fn drop(&mut self) {
        self.phase.set(Phase::Idle);
        self.renderer.set_loading(false, "");
    }
}

impl<S: JobService, R: ResultRenderer> JobFormController<S, R> {
    pub fn new(service: S, renderer: R) -> Self {
        Self {
            service,
            renderer,
            current_job_id: RefCell::new(None),
            phase: Cell::new(Phase::Idle),
            mode: Cell::new(ResumeMode::default()),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn mode(&self) -> ResumeMode {
        self.mode.get()
    }

    pub fn current_job_id(&self) -> Option<JobId> {
        self.current_job_id.borrow().clone()
    }

    /// Mode toggle: exactly one resume input block is visible afterwards.
    pub fn set_mode(&self, mode: ResumeMode) {
        self.mode.set(mode);
        self.renderer.show_mode(mode);
    }

    /// Submits a new job and, on success, remembers its id and renders it.
    pub async fn generate(&self, form: FormInput) -> ActionOutcome {
        self.generate_from(async { Ok(form) }).await
    }

    /// Like `generate`, but the form is read after entering `Submitting`,
    /// so slow input collection (a file read) runs with the controls
    /// disabled and a failed read takes the same alert path as a failed
    /// request.
    pub async fn generate_from<F>(&self, read_form: F) -> ActionOutcome
    where
        F: Future<Output = Result<FormInput, ClientError>>,
    {
        let Some(_guard) = self.begin(GENERATING_MESSAGE) else {
            return self.skip("generate", SkipReason::Busy);
        };

        let form = match read_form.await {
            Ok(form) => form,
            Err(e) => return self.fail("generate", e),
        };

        info!(
            "Submitting job (mode={}, company={:?})",
            form.mode(),
            form.company
        );

        match self.service.generate(&form).await {
            Ok(result) => {
                *self.current_job_id.borrow_mut() = Some(result.job_id.clone());
                self.render(&result)
            }
            Err(e) => self.fail("generate", e),
        }
    }

    /// Re-runs generation for the stored job. No-op before the first
    /// successful generate.
    pub async fn regenerate(&self) -> ActionOutcome {
        let Some(job_id) = self.current_job_id() else {
            return self.skip("regenerate", SkipReason::NoJob);
        };
        let Some(_guard) = self.begin(REGENERATING_MESSAGE) else {
            return self.skip("regenerate", SkipReason::Busy);
        };

        info!("Regenerating job {job_id}");

        match self.service.regenerate(&job_id).await {
            Ok(result) => {
                if result.job_id != job_id {
                    warn!(
                        "Regenerate for {job_id} answered with job {}; keeping {job_id}",
                        result.job_id
                    );
                }
                self.render(&result)
            }
            Err(e) => self.fail("regenerate", e),
        }
    }

    fn begin(&self, message: &str) -> Option<SubmitGuard<'_, R>> {
        if self.phase.get() == Phase::Submitting {
            return None;
        }
        self.phase.set(Phase::Submitting);
        self.renderer.set_loading(true, message);
        Some(SubmitGuard {
            phase: &self.phase,
            renderer: &self.renderer,
        })
    }

    fn render(&self, result: &JobResult) -> ActionOutcome {
        self.renderer.show_result(&ResultView::from_result(result));
        ActionOutcome::Rendered(result.job_id.clone())
    }

    fn fail(&self, action: &str, e: ClientError) -> ActionOutcome {
        if !e.is_request_failure() {
            error!("Unexpected error during {action}: {e}");
        }
        let message = e.user_message();
        self.renderer.alert(&message);
        ActionOutcome::Failed(message)
    }

    fn skip(&self, action: &str, reason: SkipReason) -> ActionOutcome {
        debug!("Skipping {action}: {reason:?}");
        ActionOutcome::Skipped(reason)
    }
}
