//! Placeholder tokens and template substitution
//!
//! Every renderable entity starts from a template string containing some of
//! the eight placeholder tokens below. Tokens carry a UUID suffix so that
//! legitimate template or user content never matches one by accident.
//!
//! Substitution is a single left-to-right pass over the template: each token
//! is replaced by its fragment, tokens without a fragment become empty, and
//! inserted fragments are never scanned again.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::fmt;
use std::sync::OnceLock;

const FIELDS: &str = "{Fields:5f0c2a64-7d1e-4b93-a8c6-0e4f1b2d9a17}";
const INPUT: &str = "{Input:b83e19d2-4c6a-4f05-9e71-2d8a6c3f5b40}";
const PROMPT: &str = "{Prompt:1a7d4e90-c2b5-48f3-b6e8-93f0a5d21c6e}";
const ERROR: &str = "{Error:e4c92b17-08f6-4d3a-a1b9-7c5e2f60d834}";
const LITERAL: &str = "{Literal:7206fd3b-9a4e-4c18-85d2-b1e3c0a9f657}";
const SERIALIZED_FORM: &str = "{SerializedForm:c95a0e28-6b3f-4e71-9d04-58a2f7b1e3c9}";
const DATA_SCRIPT: &str = "{DataScript:3de8b4a1-f507-42c6-b9a3-e16c4d0f8275}";
const FIELD_WRAPPER_ID: &str = "{FieldWrapperId:92b6f1c8-3e0d-4a57-8c2f-d4a7e95b0163}";

const TOKENS: [&str; 8] = [
    FIELDS,
    INPUT,
    PROMPT,
    ERROR,
    LITERAL,
    SERIALIZED_FORM,
    DATA_SCRIPT,
    FIELD_WRAPPER_ID,
];

/// Placeholder token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PlaceHolder {
    /// Rendered markup of all displayed fields. Form templates only.
    Fields = 0,
    /// An input field's input elements
    Input = 1,
    /// An input field's prompt label
    Prompt = 2,
    /// An input field's error label
    Error = 3,
    /// A literal field's markup
    Literal = 4,
    /// The form snapshot as a hidden input. Form templates only.
    SerializedForm = 5,
    /// The client data script block. Form templates only.
    DataScript = 6,
    /// Id of the element wrapping a field
    FieldWrapperId = 7,
}

impl PlaceHolder {
    /// All placeholders
    pub const ALL: [PlaceHolder; 8] = [
        PlaceHolder::Fields,
        PlaceHolder::Input,
        PlaceHolder::Prompt,
        PlaceHolder::Error,
        PlaceHolder::Literal,
        PlaceHolder::SerializedForm,
        PlaceHolder::DataScript,
        PlaceHolder::FieldWrapperId,
    ];

    /// Literal token text
    pub const fn token(self) -> &'static str {
        TOKENS[self as usize]
    }
}

impl fmt::Display for PlaceHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

fn matcher() -> &'static AhoCorasick {
    static MATCHER: OnceLock<AhoCorasick> = OnceLock::new();
    MATCHER.get_or_init(|| {
        AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostFirst)
            .build(TOKENS)
            .expect("Failed to build placeholder matcher")
    })
}

/// Set of fragments to substitute into a template
#[derive(Debug, Clone)]
pub struct Substitution<'a> {
    fragments: [&'a str; 8],
}

impl<'a> Substitution<'a> {
    /// Every placeholder resolves to the empty string
    pub fn new() -> Self {
        Self { fragments: [""; 8] }
    }

    /// Resolve `placeholder` to `fragment`
    pub fn with(mut self, placeholder: PlaceHolder, fragment: &'a str) -> Self {
        self.fragments[placeholder as usize] = fragment;
        self
    }

    /// Apply to `template` in one pass
    pub fn apply(&self, template: &str) -> String {
        matcher().replace_all(template, &self.fragments)
    }
}

impl Default for Substitution<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove every placeholder token from `html`
pub fn strip_all(html: &str) -> String {
    Substitution::new().apply(html)
}

/// Whether `text` contains any placeholder token
pub fn contains_placeholder(text: &str) -> bool {
    matcher().is_match(text)
}
