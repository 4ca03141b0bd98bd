//! Relative URL rewriting against a webhook (or proxy) base URL.

use super::SanitizeError;
use reqwest::Url;
use serde_json::Value;

/// Absolute means both a scheme and a host are present
pub fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

/// Join two paths, dropping empty and `.` segments and resolving `..`
fn join_path(base: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Rewrites relative URLs; without a base every URL is left unchanged
#[derive(Debug, Clone)]
pub struct UrlRewriter {
    base: Option<Url>,
}

impl UrlRewriter {
    pub fn new(base_url: &str) -> Result<Self, SanitizeError> {
        if base_url.is_empty() {
            return Ok(Self { base: None });
        }
        let base = Url::parse(base_url).map_err(|e| SanitizeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { base: Some(base) })
    }

    /// Join a relative URL onto the base URL's path; absolute URLs are kept
    pub fn resolve(&self, value: &str) -> String {
        self.append(value).unwrap_or_else(|| value.to_string())
    }

    /// `None` when there is no base or `value` is already absolute
    fn append(&self, value: &str) -> Option<String> {
        let base = self.base.as_ref()?;
        if is_absolute_url(value) {
            return None;
        }
        let (path, query) = match value.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (value, None),
        };
        let mut url = base.clone();
        url.set_path(&join_path(base.path(), path));
        url.set_query(query);
        url.set_fragment(None);
        Some(url.into())
    }

    /// Rewrite `key` in a link object, or in every object of a (nested) array
    pub fn rewrite_json(&self, value: &mut Value, key: &str) {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.rewrite_json(item, key);
                }
            }
            Value::Object(object) => {
                let rewritten = object
                    .get(key)
                    .and_then(Value::as_str)
                    .and_then(|url| self.append(url));
                if let Some(rewritten) = rewritten {
                    object.insert(key.to_string(), Value::String(rewritten));
                }
            }
            _ => {}
        }
    }

    pub fn rewrite_json_field(&self, value: &mut Option<Value>, key: &str) {
        if let Some(value) = value {
            self.rewrite_json(value, key);
        }
    }
}
