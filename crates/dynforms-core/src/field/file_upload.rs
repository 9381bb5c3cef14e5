//! File upload field

use super::input::{InputField, InputState};
use super::RenderContext;
use crate::events::{FieldEvent, Hooks};
use crate::html::Tag;
use crate::value_objects::PostedFile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpload {
    pub input: InputState,
    /// Comma delimited list of accepted extensions, e.g. `.pdf,.docx`
    pub valid_extensions: Option<String>,
    pub invalid_extension_error: String,
    #[serde(skip)]
    posted_file: Option<PostedFile>,
    #[serde(skip)]
    posted_hooks: Hooks,
}

impl Default for FileUpload {
    fn default() -> Self {
        Self {
            input: InputState::default(),
            valid_extensions: None,
            invalid_extension_error: "Invalid File Type".into(),
            posted_file: None,
            posted_hooks: Hooks::default(),
        }
    }
}

impl FileUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_valid_extensions(mut self, extensions: impl Into<String>) -> Self {
        self.valid_extensions = Some(extensions.into());
        self
    }

    pub fn posted_file(&self) -> Option<&PostedFile> {
        self.posted_file.as_ref()
    }

    pub fn set_posted_file(&mut self, file: Option<PostedFile>) {
        self.posted_file = file;
    }

    /// A file is attached and has a name
    pub fn file_was_posted(&self) -> bool {
        self.posted_file
            .as_ref()
            .is_some_and(|f| !f.file_name.is_empty())
    }

    /// Observe files posted to this field
    pub fn on_posted<F>(&mut self, hook: F)
    where
        F: Fn(&FieldEvent) + Send + Sync + 'static,
    {
        self.posted_hooks.register(hook);
    }

    pub(crate) fn fire_posted(&self, key: &str) {
        if let Some(file) = self.posted_file.as_ref().filter(|_| self.file_was_posted()) {
            self.posted_hooks.fire(&FieldEvent::FilePosted {
                key: key.to_string(),
                file_name: file.file_name.clone(),
            });
        }
    }

    fn extension_allowed(&self, file: &PostedFile) -> bool {
        let Some(valid) = self.valid_extensions.as_deref().filter(|v| !v.is_empty()) else {
            return true;
        };
        let Some(ext) = file.extension() else {
            return false;
        };
        valid
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .any(|v| v.eq_ignore_ascii_case(&ext))
    }

    pub(crate) fn render(&self, template: &str, ctx: &RenderContext<'_>) -> String {
        let input = Tag::new("input")
            .attr("id", ctx.html_id)
            .attr("name", ctx.html_id)
            .attr("type", "file")
            .merge(&self.input.input_attributes)
            .self_closing();
        self.input.render(template, ctx, &input, true)
    }
}

impl InputField for FileUpload {
    fn input(&self) -> &InputState {
        &self.input
    }

    fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    fn response(&self) -> String {
        self.posted_file
            .as_ref()
            .map(|f| f.file_name.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Option<String> {
        if !self.file_was_posted() {
            return self.input.required.then(|| self.input.required_message.clone());
        }
        match &self.posted_file {
            Some(file) if !self.extension_allowed(file) => Some(self.invalid_extension_error.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_required_without_file() {
        let mut upload = FileUpload::new();
        upload.input.required = true;
        assert!(!upload.validate("cv"));

        upload.set_posted_file(Some(PostedFile::new("")));
        assert!(!upload.validate("cv"));

        upload.set_posted_file(Some(PostedFile::new("cv.pdf")));
        assert!(upload.validate("cv"));
        assert_eq!(upload.response(), "cv.pdf");
    }

    #[test]
    fn test_extension_filter_case_insensitive() {
        let mut upload = FileUpload::new().with_valid_extensions(".pdf, .DOCX");
        upload.set_posted_file(Some(PostedFile::new("Resume.Docx")));
        assert!(upload.validate("cv"));

        upload.set_posted_file(Some(PostedFile::new("resume.exe")));
        assert!(!upload.validate("cv"));
        assert_eq!(upload.input.error.as_deref(), Some("Invalid File Type"));

        upload.set_posted_file(Some(PostedFile::new("noext")));
        assert!(!upload.validate("cv"));
    }

    #[test]
    fn test_optional_without_file_skips_extension_check() {
        let mut upload = FileUpload::new().with_valid_extensions(".pdf");
        assert!(upload.validate("cv"));
        assert_eq!(upload.response(), "");
    }

    #[test]
    fn test_posted_hook_only_fires_with_file() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut upload = FileUpload::new();
        let sink = fired.clone();
        upload.on_posted(move |e| sink.lock().unwrap().push(e.clone()));

        upload.fire_posted("cv");
        assert!(fired.lock().unwrap().is_empty());

        upload.set_posted_file(Some(PostedFile::new("cv.pdf")));
        upload.fire_posted("cv");
        assert_eq!(
            *fired.lock().unwrap(),
            vec![FieldEvent::FilePosted { key: "cv".into(), file_name: "cv.pdf".into() }]
        );
    }
}
