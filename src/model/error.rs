//! Structured domain errors accumulated in the request context.

use std::error::Error;
use std::sync::Arc;

/// A domain/business error reported back to the caller.
///
/// `code`, `group` and `message` are independently optional: a blank string
/// means "absent" and is dropped on the wire. `cause` is kept for local
/// diagnostics only and never leaves the process.
#[derive(Debug, Clone, Default)]
pub struct StructuredError {
    pub code: String,
    pub group: String,
    pub message: String,
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl StructuredError {
    pub fn new(
        code: impl Into<String>,
        group: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            group: group.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Invalid value in a request field, e.g. `validation("classShortName", ...)`.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::new(format!("validation-{}", kebab(field)), "validation", message)
    }

    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::new("not-found", "request", format!("Stream {id} not found"))
    }

    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, "internal", message)
    }

    pub fn with_cause(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// True when no field carries data; such an error is never valid output.
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty() && self.group.trim().is_empty() && self.message.trim().is_empty()
    }
}

/// Equality ignores the local-only cause.
impl PartialEq for StructuredError {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code && self.group == other.group && self.message == other.message
    }
}

impl Eq for StructuredError {}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}] {}", self.group, self.code, self.message)
    }
}

// "classShortName" -> "class-short-name"
fn kebab(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
