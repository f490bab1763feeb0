//! Per-resource cache entries.

use chrono::{DateTime, Utc};

/// The last-known state of one polled resource.
///
/// An entry is only ever updated wholesale: a successful fetch replaces the
/// value and timestamp together, a failed fetch records the error and leaves
/// the previous value untouched. Views can therefore always render stale
/// data next to an unavailable indicator.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    value: Option<T>,
    fetched_at: Option<DateTime<Utc>>,
    in_flight: bool,
    error: Option<String>,
}

impl<T> Default for CacheEntry<T> {
    fn default() -> Self {
        Self {
            value: None,
            fetched_at: None,
            in_flight: false,
            error: None,
        }
    }
}

impl<T> CacheEntry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successful value, possibly stale.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// When the current value was fetched.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// The last fetch error, if the most recent fetch failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Loading means "fetching with nothing cached yet": the spinner case.
    /// A refresh of existing data keeps showing the data instead.
    pub fn is_loading(&self) -> bool {
        self.in_flight && self.value.is_none()
    }

    /// Whether the most recent fetch failed.
    pub fn is_unavailable(&self) -> bool {
        self.error.is_some()
    }

    /// Age of the cached value.
    pub fn age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.fetched_at.map(|at| now - at)
    }

    /// A fetch for this resource has started.
    pub fn mark_fetching(&mut self) {
        self.in_flight = true;
    }

    /// A fetch succeeded: replace value and timestamp, clear the error.
    pub fn resolve(&mut self, value: T) {
        self.value = Some(value);
        self.fetched_at = Some(Utc::now());
        self.error = None;
        self.in_flight = false;
    }

    /// A fetch failed: record the error, keep the previous value.
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolve_replaces_value_and_clears_error() {
        let mut entry = CacheEntry::new();
        entry.mark_fetching();
        entry.reject("agent down");
        assert!(entry.is_unavailable());

        entry.mark_fetching();
        entry.resolve(42);

        assert_eq!(entry.value(), Some(&42));
        assert!(entry.fetched_at().is_some());
        assert!(!entry.is_unavailable());
        assert!(!entry.is_in_flight());
    }

    #[test]
    fn reject_keeps_previous_value() {
        let mut entry = CacheEntry::new();
        entry.mark_fetching();
        entry.resolve("payload");
        let fetched_at = entry.fetched_at();

        entry.mark_fetching();
        entry.reject("connection refused");

        assert_eq!(entry.value(), Some(&"payload"));
        assert_eq!(entry.fetched_at(), fetched_at);
        assert_eq!(entry.error(), Some("connection refused"));
    }

    #[test]
    fn loading_only_before_first_value() {
        let mut entry = CacheEntry::new();
        entry.mark_fetching();
        assert!(entry.is_loading());

        entry.resolve(1);
        entry.mark_fetching();
        assert!(entry.is_in_flight());
        assert!(!entry.is_loading());
    }
}
