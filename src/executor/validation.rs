//! Input checks run before the repository is touched. Every rule is evaluated
//! so the caller gets all field errors at once.

use crate::context::StreamRequest;
use crate::model::{Stream, StructuredError};

/// Longest accepted search string, in characters.
pub const MAX_SEARCH_STRING: usize = 256;

pub fn validate(request: &StreamRequest) -> Vec<StructuredError> {
    let mut errors = Vec::new();
    if let Some(stream) = request.stream() {
        if request.command().takes_id() {
            check_id(stream, &mut errors);
        }
        if matches!(request, StreamRequest::Create(_) | StreamRequest::Update(_)) {
            check_fields(stream, &mut errors);
        }
    }
    match request {
        StreamRequest::Search(filter) => {
            if filter.search_string.chars().count() > MAX_SEARCH_STRING {
                errors.push(StructuredError::validation(
                    "searchString",
                    format!("Search string must be at most {MAX_SEARCH_STRING} characters"),
                ));
            }
        }
        StreamRequest::Accessible(requester) => {
            if requester.is_none() {
                errors.push(StructuredError::validation(
                    "externalSystemId",
                    "External system id must not be empty",
                ));
            }
        }
        _ => {}
    }
    errors
}

fn check_id(stream: &Stream, errors: &mut Vec<StructuredError>) {
    if stream.id.is_none() {
        errors.push(StructuredError::validation("id", "Stream id must not be empty"));
    }
}

fn check_fields(stream: &Stream, errors: &mut Vec<StructuredError>) {
    let required = [
        ("classShortName", &stream.class_short_name, "Class short name"),
        ("methodShortName", &stream.method_short_name, "Method short name"),
        ("description", &stream.description, "Description"),
    ];
    for (field, value, label) in required {
        if value.trim().is_empty() {
            errors.push(StructuredError::validation(
                field,
                format!("{label} must not be empty"),
            ));
        }
    }
}
