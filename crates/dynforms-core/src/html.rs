//! Element builder and markup formatting

use crate::{FormError, Result};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;

/// HTML element builder
///
/// Attribute values and inner text are escaped; inner html is not.
/// Attributes render in name order so output is deterministic.
#[derive(Debug, Clone)]
pub struct Tag {
    name: &'static str,
    attributes: BTreeMap<String, String>,
    inner: String,
}

impl Tag {
    /// Create element
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: BTreeMap::new(),
            inner: String::new(),
        }
    }

    /// Set attribute, replacing any previous value
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Set attribute when `condition` holds
    pub fn attr_if(self, condition: bool, name: &str, value: impl Into<String>) -> Self {
        if condition {
            self.attr(name, value)
        } else {
            self
        }
    }

    /// Merge attributes without overriding ones already set
    pub fn merge(mut self, attributes: &BTreeMap<String, String>) -> Self {
        for (name, value) in attributes {
            self.attributes
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Append a css class
    pub fn class(mut self, class: &str) -> Self {
        if class.is_empty() {
            return self;
        }
        self.attributes
            .entry("class".to_string())
            .and_modify(|c| {
                c.push(' ');
                c.push_str(class);
            })
            .or_insert_with(|| class.to_string());
        self
    }

    /// Set escaped inner text
    pub fn text(mut self, text: &str) -> Self {
        self.inner = html_escape::encode_text(text).into_owned();
        self
    }

    /// Set raw inner html
    pub fn inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner = html.into();
        self
    }

    fn open(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push('"');
        }
    }

    /// `<name attrs>`
    pub fn start_tag(&self) -> String {
        let mut out = String::new();
        self.open(&mut out);
        out.push('>');
        out
    }

    /// `</name>`
    pub fn end_tag(&self) -> String {
        format!("</{}>", self.name)
    }

    /// `<name attrs />`
    pub fn self_closing(&self) -> String {
        let mut out = String::new();
        self.open(&mut out);
        out.push_str(" />");
        out
    }

    /// Start tag, inner content, end tag
    pub fn render(&self) -> String {
        let mut out = self.start_tag();
        out.push_str(&self.inner);
        out.push_str(&self.end_tag());
        out
    }
}

/// Re-indent well formed markup
///
/// Fails when the markup is not well formed XML: mismatched or unclosed
/// elements, stray end tags, broken syntax.
pub fn format_markup(markup: &str) -> Result<String> {
    let mut reader = Reader::from_str(markup);
    reader.trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            FormError::MalformedMarkup(format!("at position {}: {}", reader.buffer_position(), e))
        })?;
        match &event {
            Event::Eof => break,
            Event::Start(_) => depth += 1,
            Event::End(end) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    FormError::MalformedMarkup(format!(
                        "unexpected end tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
            }
            _ => {}
        }
        writer
            .write_event(event)
            .map_err(|e| FormError::MalformedMarkup(e.to_string()))?;
    }

    if depth != 0 {
        return Err(FormError::MalformedMarkup(format!(
            "{} unclosed element(s)",
            depth
        )));
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| FormError::MalformedMarkup(e.to_string()))
}
