//! Browser entry point: binds the page and wires its events to the controller.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use web_sys::{console, Document, Event, EventTarget, HtmlInputElement, HtmlTextAreaElement};

use crate::controller::JobFormController;
use crate::errors::ClientError;
use crate::logging::LineMakeWriter;
use crate::models::form::{FormInput, ResumeInput, ResumeMode, UploadedFile};
use crate::render::dom::{element, DomRenderer};
use crate::service::{Endpoints, HttpJobService};

type PageController = JobFormController<HttpJobService, DomRenderer>;

const MODE_RADIOS: &str = "input[name=\"resume_mode\"]";

/// Form inputs read at submit time.
struct FormFields {
    document: Document,
    jd: HtmlTextAreaElement,
    company: HtmlInputElement,
    resume: HtmlTextAreaElement,
    resume_file: HtmlInputElement,
}

impl FormFields {
    fn bind(document: &Document) -> Result<Self, ClientError> {
        Ok(Self {
            document: document.clone(),
            jd: element(document, "jd")?,
            company: element(document, "company")?,
            resume: element(document, "resume")?,
            resume_file: element(document, "resume-docx")?,
        })
    }

    fn checked_mode(&self) -> ResumeMode {
        self.document
            .query_selector(&format!("{MODE_RADIOS}:checked"))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| ResumeMode::parse(&input.value()))
            .unwrap_or_default()
    }

    async fn read(&self) -> Result<FormInput, ClientError> {
        let resume = match self.checked_mode() {
            ResumeMode::Paste => ResumeInput::Paste(self.resume.value()),
            ResumeMode::Upload => ResumeInput::Upload(
                self.read_file()
                    .await
                    .map_err(|e| ClientError::FormRead(format!("{e:?}")))?,
            ),
        };
        Ok(FormInput {
            job_description: self.jd.value(),
            company: self.company.value(),
            resume,
        })
    }

    async fn read_file(&self) -> Result<Option<UploadedFile>, JsValue> {
        let Some(file) = self.resume_file.files().and_then(|files| files.get(0)) else {
            return Ok(None);
        };
        let buffer = JsFuture::from(file.array_buffer()).await?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        let content_type = file.type_();
        Ok(Some(UploadedFile {
            file_name: file.name(),
            content_type: (!content_type.is_empty()).then_some(content_type),
            bytes: bytes.into(),
        }))
    }
}

fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn console_sink(level: Level, line: &str) {
    let line = JsValue::from_str(line);
    match level {
        Level::ERROR => console::error_1(&line),
        Level::WARN => console::warn_1(&line),
        Level::INFO => console::info_1(&line),
        _ => console::debug_1(&line),
    }
}

/// Routes `tracing` events to the browser console. No clock on wasm32, so
/// events carry no timestamp.
fn init_logging() {
    let filter = EnvFilter::new(concat!(env!("CARGO_PKG_NAME"), "=info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(LineMakeWriter::new(console_sink))
        .with_ansi(false)
        .without_time()
        .try_init();
    if installed.is_err() {
        console::warn_1(&JsValue::from_str("tracing subscriber already installed"));
    }
}

fn to_js(e: ClientError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    init_logging();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let endpoints = Endpoints::parse(&window.location().origin()?).map_err(to_js)?;
    let fields = Rc::new(FormFields::bind(&document).map_err(to_js)?);
    let form: web_sys::Element = element(&document, "generate-form").map_err(to_js)?;
    let redo_btn: web_sys::Element = element(&document, "redo-btn").map_err(to_js)?;
    let renderer = DomRenderer::bind(window, document.clone()).map_err(to_js)?;

    let service = HttpJobService::new(reqwest::Client::new(), endpoints);
    let controller: Rc<PageController> = Rc::new(JobFormController::new(service, renderer));
    info!("tailor v{} bound to the page", env!("CARGO_PKG_VERSION"));

    let radios = document.query_selector_all(MODE_RADIOS)?;
    for i in 0..radios.length() {
        let Some(radio) = radios.item(i) else { continue };
        let controller = controller.clone();
        let fields = fields.clone();
        listen(&radio, "change", move |_| {
            controller.set_mode(fields.checked_mode());
        })?;
    }

    {
        let controller = controller.clone();
        let fields = fields.clone();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            let controller = controller.clone();
            let fields = fields.clone();
            spawn_local(async move {
                controller.generate_from(fields.read()).await;
            });
        })?;
    }

    listen(&redo_btn, "click", move |_| {
        let controller = controller.clone();
        spawn_local(async move {
            controller.regenerate().await;
        });
    })?;

    Ok(())
}
