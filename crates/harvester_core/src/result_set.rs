use std::collections::BTreeSet;

/// Unique URLs gathered over one run. Iteration is always ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    urls: BTreeSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set-union with `urls`; returns how many were not already present.
    pub fn merge<I, S>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.urls.len();
        self.urls.extend(urls.into_iter().map(Into::into));
        self.urls.len() - before
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn iter_sorted(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ResultSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        set.merge(iter);
        set
    }
}
