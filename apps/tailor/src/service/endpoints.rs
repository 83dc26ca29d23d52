use url::Url;

use crate::errors::ClientError;
use crate::models::job::JobId;

/// Route table for the job backend, resolved against one base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: Url) -> Result<Self, ClientError> {
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> Result<Self, ClientError> {
        Self::new(Url::parse(base)?)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// POST /generate
    pub fn generate(&self) -> Url {
        self.with_segments(&["generate"])
    }

    /// POST /regenerate/{job_id}
    pub fn regenerate(&self, job_id: &JobId) -> Url {
        self.with_segments(&["regenerate", job_id.as_str()])
    }

    /// Resolves a link from a job response. Root-relative links such as
    /// `/download/r_v1.docx` land under the base path, like the other routes.
    pub fn resolve(&self, link: &str) -> Result<Url, ClientError> {
        match link.strip_prefix('/') {
            Some(path) if !path.starts_with('/') => Ok(self.base_dir().join(path)?),
            _ => Ok(self.base.join(link)?),
        }
    }

    /// The base with a trailing slash, so relative joins append to its path.
    fn base_dir(&self) -> Url {
        let mut dir = self.base.clone();
        if !dir.path().ends_with('/') {
            let path = format!("{}/", dir.path());
            dir.set_path(&path);
        }
        dir
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Page-relative link for one generated file, as served by GET /download/{filename}.
pub fn download_path(file_name: &str) -> String {
    format!("/download/{file_name}")
}
