//! Validation gate: rejects raw requests snippet generation cannot work with.

use super::parse::{Pair, RawRequest};

/// One violated constraint, addressed by a JSON-ish field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub constraint: &'static str,
}

/// A raw request that failed validation. `entry` is the HAR entry index when
/// the request came from a log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid request{}{}", entry_suffix(.entry), violation_list(.violations))]
pub struct ValidationError {
    pub entry: Option<usize>,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn at_entry(mut self, index: usize) -> Self {
        self.entry = Some(index);
        self
    }
}

fn entry_suffix(entry: &Option<usize>) -> String {
    entry.map(|i| format!(" (entry {})", i)).unwrap_or_default()
}

fn violation_list(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return String::new();
    }
    let items: Vec<String> = violations
        .iter()
        .map(|v| format!("{} {}", v.path, v.constraint))
        .collect();
    format!(": {}", items.join("; "))
}

/// Checks a request after defaults injection. Returns every violation found,
/// not just the first.
pub fn validate_request(request: &RawRequest) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    let mut push = |path: String, constraint: &'static str| {
        violations.push(Violation { path, constraint })
    };

    if request.method.is_empty() {
        push("method".into(), "is required");
    } else if !request.method.bytes().all(is_token_byte) {
        push("method".into(), "must be an HTTP token");
    }
    if request.url.trim().is_empty() {
        push("url".into(), "is required");
    }
    if request.http_version.is_empty() {
        push("httpVersion".into(), "is required");
    }

    for (field, pairs) in [
        ("headers", &request.headers),
        ("cookies", &request.cookies),
        ("queryString", &request.query_string),
    ] {
        for i in unnamed(pairs) {
            push(format!("{}[{}].name", field, i), "is required");
        }
    }

    if request.post_data.mime_type.is_empty() {
        push("postData.mimeType".into(), "is required");
    }
    if let Some(params) = &request.post_data.params {
        for (i, p) in params.iter().enumerate() {
            if p.name.is_empty() {
                push(format!("postData.params[{}].name", i), "is required");
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            entry: None,
            violations,
        })
    }
}

fn unnamed(pairs: &[Pair]) -> impl Iterator<Item = usize> + '_ {
    pairs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.name.is_empty())
        .map(|(i, _)| i)
}

/// RFC 9110 `tchar`.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::RawParam;

    #[test]
    fn valid_request_passes() {
        let req = RawRequest::new("GET", "http://x.com/");
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn missing_method_and_url_reported_together() {
        let req = RawRequest::default().with_defaults();
        let err = validate_request(&req).unwrap_err();
        let paths: Vec<_> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["method", "url"]);
    }

    #[test]
    fn method_must_be_token() {
        let req = RawRequest::new("GE T", "http://x.com/");
        let err = validate_request(&req).unwrap_err();
        assert_eq!(err.violations[0].constraint, "must be an HTTP token");
    }

    #[test]
    fn empty_names_are_addressed_by_index() {
        let mut req = RawRequest::new("POST", "http://x.com/");
        req.headers = vec![Pair::new("Accept", "*/*"), Pair::new("", "x")];
        req.post_data.params = Some(vec![RawParam::value("", "1")]);
        let err = validate_request(&req).unwrap_err();
        let paths: Vec<_> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["headers[1].name", "postData.params[0].name"]);
    }

    #[test]
    fn display_lists_entry_and_violations() {
        let req = RawRequest::new("", "");
        let err = validate_request(&req).unwrap_err().at_entry(2);
        assert_eq!(
            err.to_string(),
            "invalid request (entry 2): method is required; url is required"
        );
    }

    #[test]
    fn display_without_entry_and_as_snippet_error() {
        let mut req = RawRequest::new("GET", "http://x.com/");
        req.post_data.mime_type.clear();
        let err = validate_request(&req).unwrap_err();
        assert_eq!(err.to_string(), "invalid request: postData.mimeType is required");
        let wrapped = crate::error::SnippetError::from(err);
        assert_eq!(
            wrapped.to_string(),
            "invalid request: postData.mimeType is required"
        );
    }
}
