//! Browser renderer bound to the page's element ids.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlAnchorElement, HtmlButtonElement, HtmlElement, Window};

use crate::errors::ClientError;
use crate::models::form::ResumeMode;
use crate::render::{Link, ResultRenderer, ResultView};

/// Looks up a required element and casts it; absence is fatal at startup.
pub fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, ClientError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| ClientError::MissingElement(id.to_string()))
}

fn set_visible(el: &HtmlElement, visible: bool) {
    let display = if visible { "block" } else { "none" };
    if let Err(e) = el.style().set_property("display", display) {
        web_sys::console::error_1(&e);
    }
}

pub struct DomRenderer {
    window: Window,
    document: Document,
    paste_block: HtmlElement,
    upload_block: HtmlElement,
    generate_btn: HtmlButtonElement,
    redo_btn: HtmlButtonElement,
    loading: HtmlElement,
    loading_text: HtmlElement,
    result: HtmlElement,
    score: HtmlElement,
    summary: HtmlElement,
    version: HtmlElement,
    resume_source: HtmlElement,
    download_link: HtmlAnchorElement,
    versions_list: HtmlElement,
    new_resume_text: HtmlElement,
    diff_view: HtmlElement,
}

impl DomRenderer {
    pub fn bind(window: Window, document: Document) -> Result<Self, ClientError> {
        Ok(Self {
            paste_block: element(&document, "paste-block")?,
            upload_block: element(&document, "upload-block")?,
            generate_btn: element(&document, "generate-btn")?,
            redo_btn: element(&document, "redo-btn")?,
            loading: element(&document, "loading")?,
            loading_text: element(&document, "loading-text")?,
            result: element(&document, "result")?,
            score: element(&document, "score")?,
            summary: element(&document, "summary")?,
            version: element(&document, "version")?,
            resume_source: element(&document, "resume-source")?,
            download_link: element(&document, "download-link")?,
            versions_list: element(&document, "versions-list")?,
            new_resume_text: element(&document, "new-resume-text")?,
            diff_view: element(&document, "diff-view")?,
            window,
            document,
        })
    }

    fn version_item(&self, link: &Link) -> Result<web_sys::Element, JsValue> {
        let li = self.document.create_element("li")?;
        let a: HtmlAnchorElement = self.document.create_element("a")?.dyn_into()?;
        a.set_href(&link.href);
        a.set_text_content(Some(&link.label));
        if link.new_tab {
            a.set_target("_blank");
        }
        li.append_child(&a)?;
        Ok(li)
    }
}

impl ResultRenderer for DomRenderer {
    fn show_mode(&self, mode: ResumeMode) {
        set_visible(&self.paste_block, mode == ResumeMode::Paste);
        set_visible(&self.upload_block, mode == ResumeMode::Upload);
    }

    fn set_loading(&self, loading: bool, message: &str) {
        self.generate_btn.set_disabled(loading);
        self.redo_btn.set_disabled(loading);
        if loading {
            self.loading_text.set_text_content(Some(message));
        }
        set_visible(&self.loading, loading);
    }

    fn show_result(&self, view: &ResultView) {
        self.score.set_text_content(Some(&view.score));
        self.summary.set_text_content(Some(&view.summary));
        self.version.set_text_content(Some(&view.version));
        self.resume_source.set_text_content(Some(&view.resume_source));
        self.download_link.set_href(&view.download.href);
        self.download_link.set_text_content(Some(&view.download.label));

        self.versions_list.set_inner_html("");
        for link in &view.versions {
            let appended = self
                .version_item(link)
                .and_then(|li| self.versions_list.append_child(&li));
            if let Err(e) = appended {
                web_sys::console::error_1(&e);
            }
        }

        self.new_resume_text.set_text_content(Some(&view.new_resume_text));
        self.diff_view.set_inner_html(&view.diff_html);

        set_visible(&self.result, true);
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            web_sys::console::error_1(&e);
        }
    }
}
