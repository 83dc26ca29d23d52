//! Command-line front end: argument parsing, input loading and the
//! interactive regenerate loop.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::controller::{ActionOutcome, JobFormController, SkipReason};
use crate::models::form::{FormInput, ResumeInput, ResumeMode, UploadedFile};
use crate::render::ResultRenderer;
use crate::service::JobService;

const PROMPT: &str = "[r]egenerate, [q]uit > ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Paste,
    Upload,
}

impl From<ModeArg> for ResumeMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Paste => ResumeMode::Paste,
            ModeArg::Upload => ResumeMode::Upload,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tailor", version, about = "Tailor a resume to a job description")]
pub struct Args {
    /// File containing the job description.
    #[arg(long, value_name = "FILE")]
    pub jd: PathBuf,

    #[arg(long, default_value = "")]
    pub company: String,

    /// Plain-text resume to paste.
    #[arg(long, value_name = "FILE", conflicts_with = "resume_file")]
    pub resume: Option<PathBuf>,

    /// Resume document to upload.
    #[arg(long, value_name = "FILE")]
    pub resume_file: Option<PathBuf>,

    /// Resume input mode when neither --resume nor --resume-file is given.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Backend origin; overrides TAILOR_BASE_URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Exit after the first generate instead of prompting.
    #[arg(long)]
    pub once: bool,
}

impl Args {
    pub fn resume_mode(&self) -> ResumeMode {
        if self.resume_file.is_some() {
            ResumeMode::Upload
        } else if self.resume.is_some() {
            ResumeMode::Paste
        } else {
            self.mode.map(ResumeMode::from).unwrap_or_default()
        }
    }
}

/// Reads every file the arguments point at into a `FormInput`.
pub fn load_form(args: &Args) -> Result<FormInput> {
    let job_description = read_text(&args.jd)?;

    let resume = match args.resume_mode() {
        ResumeMode::Paste => match &args.resume {
            Some(path) => ResumeInput::Paste(read_text(path)?),
            None => ResumeInput::Paste(String::new()),
        },
        ResumeMode::Upload => match &args.resume_file {
            Some(path) => ResumeInput::Upload(Some(read_upload(path)?)),
            None => ResumeInput::Upload(None),
        },
    };

    Ok(FormInput {
        job_description,
        company: args.company.clone(),
        resume,
    })
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn read_upload(path: &Path) -> Result<UploadedFile> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("'{}' has no file name", path.display()))?;

    Ok(UploadedFile {
        content_type: content_type_for(path).map(str::to_string),
        file_name,
        bytes: bytes.into(),
    })
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "docx" => Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        "pdf" => Some("application/pdf"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Regenerate,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "r" | "regenerate" | "redo" => Some(Command::Regenerate),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Reads commands until `quit` or end of input.
pub async fn run_session<S, R, I, O>(
    controller: &JobFormController<S, R>,
    input: I,
    mut output: O,
) -> Result<()>
where
    S: JobService,
    R: ResultRenderer,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Some(Command::Regenerate) => {
                if controller.regenerate().await == ActionOutcome::Skipped(SkipReason::NoJob) {
                    output
                        .write_all(b"Nothing to regenerate yet.\n")
                        .await?;
                }
            }
            Some(Command::Quit) => break,
            None if line.trim().is_empty() => {}
            None => {
                output
                    .write_all(format!("Unknown command: {}\n", line.trim()).as_bytes())
                    .await?;
            }
        }
    }

    info!("Session ended");
    Ok(())
}
