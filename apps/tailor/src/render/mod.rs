//! Result rendering: projection from `JobResult` to the visible result
//! region, and the presentation seam the controller drives.

use crate::models::form::ResumeMode;
use crate::models::job::JobResult;
use crate::service::endpoints::download_path;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

/// Presentation layer driven by `JobFormController`.
///
/// Methods take `&self`: the controller is single-threaded and a renderer is
/// expected to hold its own interior mutability.
pub trait ResultRenderer {
    /// Shows the paste block or the upload block, hiding the other.
    fn show_mode(&self, mode: ResumeMode);

    /// `true` disables generate + regenerate and shows `message`;
    /// `false` re-enables both and hides the indicator.
    fn set_loading(&self, loading: bool, message: &str);

    /// Replaces the whole result region with `view` and makes it visible.
    fn show_result(&self, view: &ResultView);

    /// Blocking, user-facing error notice.
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub label: String,
    /// Opens in a new browsing context.
    pub new_tab: bool,
}

/// Everything the result region displays, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub score: String,
    pub summary: String,
    pub version: String,
    pub resume_source: String,
    pub download: Link,
    pub versions: Vec<Link>,
    pub new_resume_text: String,
    /// Inserted as markup, not escaped.
    pub diff_html: String,
}

impl ResultView {
    pub fn from_result(result: &JobResult) -> Self {
        Self {
            score: result
                .score
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            summary: result.summary.clone(),
            version: result.version.clone(),
            resume_source: result.resume_source.clone(),
            download: Link {
                href: result.download_url.clone(),
                label: format!("Download {}", result.docx_file),
                new_tab: false,
            },
            versions: result
                .all_versions
                .iter()
                .map(|file_name| Link {
                    href: download_path(file_name),
                    label: file_name.clone(),
                    new_tab: true,
                })
                .collect(),
            new_resume_text: result.new_resume_text.clone(),
            diff_html: result.diff_html.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{JobId, Score};

    fn sample() -> JobResult {
        JobResult {
            job_id: JobId::new("J1"),
            score: Some(Score::Number(87.0)),
            summary: "Good match".to_string(),
            version: "v1".to_string(),
            resume_source: "pasted".to_string(),
            download_url: "/download/r_v1.docx".to_string(),
            docx_file: "r_v1.docx".to_string(),
            all_versions: vec!["r_v1.docx".to_string()],
            new_resume_text: "...".to_string(),
            diff_html: "<span>...</span>".to_string(),
        }
    }

    #[test]
    fn test_projection_of_full_result() {
        let view = ResultView::from_result(&sample());
        assert_eq!(view.score, "87");
        assert_eq!(view.summary, "Good match");
        assert_eq!(view.download.href, "/download/r_v1.docx");
        assert_eq!(view.download.label, "Download r_v1.docx");
        assert_eq!(view.versions.len(), 1);
        assert_eq!(view.versions[0].href, "/download/r_v1.docx");
        assert_eq!(view.versions[0].label, "r_v1.docx");
        assert!(view.versions[0].new_tab);
        assert_eq!(view.diff_html, "<span>...</span>");
    }

    #[test]
    fn test_versions_keep_backend_order() {
        let mut result = sample();
        result.all_versions = vec![
            "r_v2.docx".to_string(),
            "r_v1.docx".to_string(),
            "r_v3.docx".to_string(),
        ];
        let labels: Vec<_> = ResultView::from_result(&result)
            .versions
            .into_iter()
            .map(|l| l.label)
            .collect();
        assert_eq!(labels, vec!["r_v2.docx", "r_v1.docx", "r_v3.docx"]);
    }

    #[test]
    fn test_fractional_and_missing_scores() {
        let mut result = sample();
        result.score = Some(Score::Number(72.5));
        assert_eq!(ResultView::from_result(&result).score, "72.5");
        result.score = Some(Score::Text("8".to_string()));
        assert_eq!(ResultView::from_result(&result).score, "8");
        result.score = None;
        assert_eq!(ResultView::from_result(&result).score, "");
    }

    #[test]
    fn test_projection_is_deterministic() {
        let result = sample();
        assert_eq!(ResultView::from_result(&result), ResultView::from_result(&result));
    }
}
