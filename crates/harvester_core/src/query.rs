use std::fmt;

use crate::Domain;

pub const DEFAULT_PAGE_SIZE: u32 = 5000;

/// Opaque continuation token handed out by the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeKey(String);

impl ResumeKey {
    /// Empty tokens mean "no more pages" and are rejected.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResumeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One request against the CDX index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdxQuery {
    pub domain: Domain,
    pub page_size: u32,
    pub collapse: bool,
    pub resume_key: Option<ResumeKey>,
}

impl CdxQuery {
    pub fn new(domain: Domain, page_size: u32, collapse: bool, resume_key: Option<ResumeKey>) -> Self {
        Self {
            domain,
            page_size,
            collapse,
            resume_key,
        }
    }

    /// Query string parameters in the order they are sent.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("url", self.domain.url_pattern()),
            ("output", "json".to_string()),
            ("fl", "original".to_string()),
            ("limit", self.page_size.to_string()),
            ("showResumeKey", "true".to_string()),
        ];
        if self.collapse {
            params.push(("collapse", "original".to_string()));
        }
        if let Some(key) = &self.resume_key {
            params.push(("resumeKey", key.as_str().to_string()));
        }
        params
    }
}
