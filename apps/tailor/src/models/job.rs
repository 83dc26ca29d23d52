use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Opaque job identifier issued by the backend on `/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fit score as the backend sent it. The scorer is asked for a number but
/// its output is passed through unchecked, so strings and other JSON values
/// are kept for display instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
    Other(Value),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole scores print without a fractional part (`87`, not `87.0`).
            Score::Number(n) => write!(f, "{n}"),
            Score::Text(text) => f.write_str(text),
            Score::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Response body of `/generate` and `/regenerate/{job_id}`.
///
/// Only `job_id`, `download_url` and `docx_file` are guaranteed. The older
/// backend omits the version and diff fields entirely and may send a `null`
/// score, so everything else falls back to an empty value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobResult {
    pub job_id: JobId,
    #[serde(default)]
    pub score: Option<Score>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume_source: String,
    pub download_url: String,
    pub docx_file: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_versions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_resume_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub diff_html: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
