//! Field events
//!
//! Hooks are plain registrations fired synchronously once the field's state
//! has settled. They are not part of a form snapshot; re-register them after
//! deserializing.

use std::fmt;
use std::sync::Arc;

/// Something that happened to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// An input field was validated
    Validated { key: String, is_valid: bool },
    /// A file upload field received a file during rebinding
    FilePosted { key: String, file_name: String },
}

impl FieldEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Validated { .. } => "field.validated",
            Self::FilePosted { .. } => "field.file_posted",
        }
    }

    /// Key of the field the event is about
    pub fn key(&self) -> &str {
        match self {
            Self::Validated { key, .. } | Self::FilePosted { key, .. } => key,
        }
    }
}

/// Event observer
pub type Hook = Arc<dyn Fn(&FieldEvent) + Send + Sync>;

/// Registered observers of one field
#[derive(Clone, Default)]
pub struct Hooks(Vec<Hook>);

impl Hooks {
    pub fn register<F>(&mut self, hook: F)
    where
        F: Fn(&FieldEvent) + Send + Sync + 'static,
    {
        self.0.push(Arc::new(hook));
    }

    pub fn fire(&self, event: &FieldEvent) {
        for hook in &self.0 {
            hook(event);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hooks({})", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_hooks_fire_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = Hooks::default();
        for tag in ["first", "second"] {
            let seen = seen.clone();
            hooks.register(move |e: &FieldEvent| {
                seen.lock().unwrap().push(format!("{}:{}", tag, e.key()));
            });
        }

        hooks.fire(&FieldEvent::Validated { key: "name".into(), is_valid: true });
        assert_eq!(*seen.lock().unwrap(), vec!["first:name", "second:name"]);
        assert_eq!(hooks.len(), 2);
    }

    #[test]
    fn test_event_type() {
        let e = FieldEvent::FilePosted { key: "cv".into(), file_name: "cv.pdf".into() };
        assert_eq!(e.event_type(), "field.file_posted");
        assert_eq!(e.key(), "cv");
    }
}
