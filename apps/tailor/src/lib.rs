//! `tailor`: client for the resume-tailoring job service.
//!
//! `JobFormController` owns the generate / regenerate flow and talks to two
//! seams: a `JobService` (the backend, `HttpJobService` over HTTP) and a
//! `ResultRenderer` (the terminal on native targets, the page DOM on
//! `wasm32`).

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod controller;
pub mod errors;
pub mod logging;
pub mod models;
pub mod render;
pub mod service;
#[cfg(test)]
mod testing;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use controller::{ActionOutcome, JobFormController, Phase, SkipReason};
pub use errors::ClientError;
pub use models::form::{FormInput, ResumeInput, ResumeMode, UploadedFile};
pub use models::job::{JobId, JobResult, Score};
pub use render::{ResultRenderer, ResultView};
pub use service::{Endpoints, HttpJobService, JobService};
