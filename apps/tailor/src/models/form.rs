use std::fmt;

use bytes::Bytes;

/// Which resume input block the form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumeMode {
    #[default]
    Paste,
    Upload,
}

impl ResumeMode {
    /// Value sent as the `resume_mode` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeMode::Paste => "paste",
            ResumeMode::Upload => "upload",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paste" => Some(ResumeMode::Paste),
            "upload" => Some(ResumeMode::Upload),
            _ => None,
        }
    }
}

impl fmt::Display for ResumeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resume document picked in upload mode.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Mode-dependent resume payload. The variant is the mode, so a form can
/// never carry both pasted text and a file.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeInput {
    Paste(String),
    /// `None` when nothing was selected in the file picker.
    Upload(Option<UploadedFile>),
}

impl ResumeInput {
    pub fn mode(&self) -> ResumeMode {
        match self {
            ResumeInput::Paste(_) => ResumeMode::Paste,
            ResumeInput::Upload(_) => ResumeMode::Upload,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub job_description: String,
    pub company: String,
    pub resume: ResumeInput,
}

impl FormInput {
    pub fn mode(&self) -> ResumeMode {
        self.resume.mode()
    }
}
