//! CDX JSON framing.
//!
//! A page is an array of arrays: a header row, data rows holding one URL each,
//! then optionally an empty sentinel row followed by a single-field resume key row.

use crate::ResumeKey;

/// One undecoded row of the JSON response.
pub type RawRow = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Header(Vec<String>),
    Data(String),
    Sentinel,
    ResumeKey(Option<ResumeKey>),
    /// Anything after the resume key row.
    Ignored,
}

/// Tag every row of a page by its position relative to the header and sentinel.
pub fn classify_rows(raw: Vec<RawRow>) -> Vec<Row> {
    let mut rows = Vec::with_capacity(raw.len());
    let mut iter = raw.into_iter();
    if let Some(header) = iter.next() {
        rows.push(Row::Header(header));
    }

    let mut after_sentinel = false;
    let mut key_seen = false;
    for fields in iter {
        let row = if key_seen {
            Row::Ignored
        } else if after_sentinel {
            key_seen = true;
            Row::ResumeKey(fields.into_iter().next().and_then(ResumeKey::new))
        } else {
            match fields.into_iter().next() {
                Some(url) => Row::Data(url),
                None => {
                    after_sentinel = true;
                    Row::Sentinel
                }
            }
        };
        rows.push(row);
    }
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub records: Vec<String>,
    pub resume_key: Option<ResumeKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Header only, or nothing at all.
    Exhausted,
    Batch(Page),
}

impl Page {
    pub fn from_rows(raw: Vec<RawRow>) -> PageOutcome {
        if raw.len() <= 1 {
            return PageOutcome::Exhausted;
        }

        let mut records = Vec::with_capacity(raw.len() - 1);
        let mut resume_key = None;
        for row in classify_rows(raw) {
            match row {
                Row::Data(url) => records.push(url),
                Row::ResumeKey(key) => resume_key = key,
                Row::Header(_) | Row::Sentinel | Row::Ignored => {}
            }
        }

        // A page without a sentinel is treated as the last one.
        PageOutcome::Batch(Page {
            records,
            resume_key,
        })
    }
}
