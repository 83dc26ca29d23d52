//! Job Service: the single point of entry for backend calls.
//!
//! `JobService` is the seam the controller talks to. `HttpJobService` is the
//! production backend: one multipart POST per generate, one empty POST per
//! regenerate. No retries.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::form::{FormInput, ResumeInput, UploadedFile};
use crate::models::job::{JobId, JobResult};

pub mod endpoints;

pub use endpoints::Endpoints;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The remote job backend. Implement this to drive the controller from
/// something other than HTTP.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait JobService {
    async fn generate(&self, form: &FormInput) -> Result<JobResult, ClientError>;

    async fn regenerate(&self, job_id: &JobId) -> Result<JobResult, ClientError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart field layout
// ────────────────────────────────────────────────────────────────────────────

pub const FIELD_JD: &str = "jd";
pub const FIELD_COMPANY: &str = "company";
pub const FIELD_RESUME_MODE: &str = "resume_mode";
pub const FIELD_BASE_RESUME: &str = "base_resume";
pub const FIELD_RESUME_FILE: &str = "resume_file";

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text(&'static str, String),
    File(&'static str, UploadedFile),
}

impl FormField {
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Text(name, _) | FormField::File(name, _) => name,
        }
    }
}

/// Lays out the `/generate` body in submission order.
///
/// Pasted text is trimmed. In upload mode with no file picked the
/// `resume_file` field is left out entirely.
pub fn generate_fields(form: &FormInput) -> Vec<FormField> {
    let mut fields = vec![
        FormField::Text(FIELD_JD, form.job_description.clone()),
        FormField::Text(FIELD_COMPANY, form.company.clone()),
        FormField::Text(FIELD_RESUME_MODE, form.mode().as_str().to_string()),
    ];

    match &form.resume {
        ResumeInput::Paste(text) => {
            fields.push(FormField::Text(FIELD_BASE_RESUME, text.trim().to_string()));
        }
        ResumeInput::Upload(Some(file)) => {
            fields.push(FormField::File(FIELD_RESUME_FILE, file.clone()));
        }
        ResumeInput::Upload(None) => {
            debug!("No resume file selected; submitting without {FIELD_RESUME_FILE}");
        }
    }

    fields
}

fn to_multipart(fields: Vec<FormField>) -> Result<multipart::Form, ClientError> {
    let mut form = multipart::Form::new();
    for field in fields {
        form = match field {
            FormField::Text(name, value) => form.text(name, value),
            FormField::File(name, file) => {
                let mut part = multipart::Part::bytes(file.bytes.to_vec()).file_name(file.file_name);
                if let Some(content_type) = file.content_type.as_deref() {
                    part = part.mime_str(content_type)?;
                }
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

// ────────────────────────────────────────────────────────────────────────────
// HttpJobService
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpJobService {
    client: Client,
    endpoints: Endpoints,
}

impl HttpJobService {
    pub fn new(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Builds the shared HTTP client with a per-request timeout.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_timeout(
        endpoints: Endpoints,
        timeout: std::time::Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, endpoints))
    }
}

/// Non-success → `RequestFailed` carrying the text body; success → `JobResult`.
async fn read_job_result(response: Response) -> Result<JobResult, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("Job service returned {}: {}", status, body);
        return Err(ClientError::RequestFailed {
            status: status.as_u16(),
            body,
        });
    }

    let result: JobResult = serde_json::from_str(&body)?;
    debug!(
        "Job service call succeeded: job_id={}, versions={}",
        result.job_id,
        result.all_versions.len()
    );
    Ok(result)
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl JobService for HttpJobService {
    async fn generate(&self, form: &FormInput) -> Result<JobResult, ClientError> {
        let body = to_multipart(generate_fields(form))?;
        let response = self
            .client
            .post(self.endpoints.generate())
            .multipart(body)
            .send()
            .await?;
        read_job_result(response).await
    }

    async fn regenerate(&self, job_id: &JobId) -> Result<JobResult, ClientError> {
        let response = self
            .client
            .post(self.endpoints.regenerate(job_id))
            .send()
            .await?;
        read_job_result(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::ResumeMode;

    fn form(resume: ResumeInput) -> FormInput {
        FormInput {
            job_description: "Senior Rust engineer".to_string(),
            company: "Acme".to_string(),
            resume,
        }
    }

    fn names(fields: &[FormField]) -> Vec<&'static str> {
        fields.iter().map(FormField::name).collect()
    }

    #[test]
    fn test_paste_mode_sends_trimmed_base_resume() {
        let fields = generate_fields(&form(ResumeInput::Paste("  Jane Doe\nRust  \n".to_string())));
        assert_eq!(
            names(&fields),
            vec![FIELD_JD, FIELD_COMPANY, FIELD_RESUME_MODE, FIELD_BASE_RESUME]
        );
        assert_eq!(
            fields[2],
            FormField::Text(FIELD_RESUME_MODE, ResumeMode::Paste.as_str().to_string())
        );
        assert_eq!(
            fields[3],
            FormField::Text(FIELD_BASE_RESUME, "Jane Doe\nRust".to_string())
        );
    }

    #[test]
    fn test_upload_mode_sends_file_part() {
        let file = UploadedFile {
            file_name: "resume.docx".to_string(),
            content_type: None,
            bytes: bytes::Bytes::from_static(b"PK\x03\x04"),
        };
        let fields = generate_fields(&form(ResumeInput::Upload(Some(file.clone()))));
        assert_eq!(
            names(&fields),
            vec![FIELD_JD, FIELD_COMPANY, FIELD_RESUME_MODE, FIELD_RESUME_FILE]
        );
        assert_eq!(fields[3], FormField::File(FIELD_RESUME_FILE, file));
    }

    #[test]
    fn test_upload_mode_without_file_omits_field() {
        let fields = generate_fields(&form(ResumeInput::Upload(None)));
        assert_eq!(names(&fields), vec![FIELD_JD, FIELD_COMPANY, FIELD_RESUME_MODE]);
        assert_eq!(
            fields[2],
            FormField::Text(FIELD_RESUME_MODE, "upload".to_string())
        );
    }

    #[test]
    fn test_job_description_is_not_trimmed() {
        let mut input = form(ResumeInput::Paste(String::new()));
        input.job_description = "  leading space\n".to_string();
        let fields = generate_fields(&input);
        assert_eq!(fields[0], FormField::Text(FIELD_JD, "  leading space\n".to_string()));
    }

    #[test]
    fn test_invalid_content_type_is_an_error() {
        let file = UploadedFile {
            file_name: "resume.docx".to_string(),
            content_type: Some("not a mime type".to_string()),
            bytes: bytes::Bytes::new(),
        };
        assert!(to_multipart(vec![FormField::File(FIELD_RESUME_FILE, file)]).is_err());
    }
}
