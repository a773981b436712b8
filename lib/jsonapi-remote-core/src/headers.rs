//! Response header extraction.
//!
//! Callers list the header names they care about; [`extract`] keeps only
//! those, comparing names with ASCII case folding.
//!
//! Names keep the casing the transport reports. Over the network that is
//! always lowercase: hyper's `HeaderMap` normalizes names, so a server's
//! `ETag` comes back as `etag`. Look values up with [`ExtractedHeaders::get`],
//! which ignores case, rather than comparing pair names directly.

/// Ordered `(name, value)` pairs kept from a response.
///
/// Names from responses read over hyper are lowercase; use
/// [`get`](Self::get) for lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExtractedHeaders(Vec<(String, String)>);

impl ExtractedHeaders {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// First value for `name`, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over the pairs in response order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing was kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the pairs.
    #[must_use]
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    /// Consume into the pairs.
    #[must_use]
    pub fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}

impl From<Vec<(String, String)>> for ExtractedHeaders {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FromIterator<(String, String)> for ExtractedHeaders {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ExtractedHeaders {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Keep the response headers whose name is in `names`.
///
/// Order and casing follow the response; absent names are skipped. Response
/// headers read by hyper have lowercase names, whatever the server sent.
///
/// # Example
///
/// ```
/// use jsonapi_remote_core::extract;
///
/// let response = vec![
///     ("X-Total".to_string(), "5".to_string()),
///     ("X-Other".to_string(), "y".to_string()),
/// ];
/// let kept = extract(&response, &["x-total".to_string()]);
/// assert_eq!(kept.as_slice(), &[("X-Total".to_string(), "5".to_string())]);
/// ```
#[must_use]
pub fn extract(response_headers: &[(String, String)], names: &[String]) -> ExtractedHeaders {
    if names.is_empty() {
        return ExtractedHeaders::new();
    }

    let names: Vec<String> = names.iter().map(|name| name.to_ascii_lowercase()).collect();
    response_headers
        .iter()
        .filter(|(name, _)| names.contains(&name.to_ascii_lowercase()))
        .cloned()
        .collect()
}
