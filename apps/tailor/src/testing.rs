//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::errors::ClientError;
use crate::models::form::{FormInput, ResumeInput, ResumeMode};
use crate::models::job::{JobId, JobResult, Score};
use crate::render::{ResultRenderer, ResultView};
use crate::service::JobService;

/// One observable renderer call, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Mode(ResumeMode),
    Loading(bool, String),
    Result(ResultView),
    Alert(String),
}

/// In-memory renderer that records calls and mirrors the visible state.
#[derive(Default)]
pub struct RecordingRenderer {
    pub events: RefCell<Vec<RenderEvent>>,
    pub visible_result: RefCell<Option<ResultView>>,
    pub controls_enabled: RefCell<bool>,
    pub paste_visible: RefCell<bool>,
    pub upload_visible: RefCell<bool>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            controls_enabled: RefCell::new(true),
            paste_visible: RefCell::new(true),
            ..Default::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Alert(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ResultRenderer for RecordingRenderer {
    fn show_mode(&self, mode: ResumeMode) {
        *self.paste_visible.borrow_mut() = mode == ResumeMode::Paste;
        *self.upload_visible.borrow_mut() = mode == ResumeMode::Upload;
        self.events.borrow_mut().push(RenderEvent::Mode(mode));
    }

    fn set_loading(&self, loading: bool, message: &str) {
        *self.controls_enabled.borrow_mut() = !loading;
        self.events
            .borrow_mut()
            .push(RenderEvent::Loading(loading, message.to_string()));
    }

    fn show_result(&self, view: &ResultView) {
        *self.visible_result.borrow_mut() = Some(view.clone());
        self.events.borrow_mut().push(RenderEvent::Result(view.clone()));
    }

    fn alert(&self, message: &str) {
        self.events
            .borrow_mut()
            .push(RenderEvent::Alert(message.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Generate(FormInput),
    Regenerate(JobId),
}

/// Job service that answers from a queue and records every call.
/// With a gate set, each call waits for one `notify_one` before answering.
#[derive(Default)]
pub struct ScriptedService {
    pub responses: Mutex<VecDeque<Result<JobResult, ClientError>>>,
    pub calls: Mutex<Vec<Call>>,
    pub gate: Option<Arc<Notify>>,
}

impl ScriptedService {
    pub fn answering(responses: Vec<Result<JobResult, ClientError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, call: Call) -> Result<JobResult, ClientError> {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected job service call")
    }
}

#[async_trait]
impl JobService for ScriptedService {
    async fn generate(&self, form: &FormInput) -> Result<JobResult, ClientError> {
        self.answer(Call::Generate(form.clone())).await
    }

    async fn regenerate(&self, job_id: &JobId) -> Result<JobResult, ClientError> {
        self.answer(Call::Regenerate(job_id.clone())).await
    }
}

/// A complete backend response for `id`, with one file named after `version`.
pub fn job(id: &str, version: &str) -> JobResult {
    let file = format!("r_{version}.docx");
    JobResult {
        job_id: JobId::new(id),
        score: Some(Score::Number(87.0)),
        summary: "Good match".to_string(),
        version: version.to_string(),
        resume_source: "pasted".to_string(),
        download_url: format!("/download/{file}"),
        docx_file: file.clone(),
        all_versions: vec![file],
        new_resume_text: "...".to_string(),
        diff_html: "<span>...</span>".to_string(),
    }
}

pub fn paste_form() -> FormInput {
    FormInput {
        job_description: "Senior Rust engineer".to_string(),
        company: "Acme".to_string(),
        resume: ResumeInput::Paste("Jane Doe".to_string()),
    }
}
