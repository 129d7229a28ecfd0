//! Location and history abstraction.
//!
//! [`Location`] stands in for the browser's address bar and history.
//! Programmatic updates (`push_path`, `set_hash`) never fire events; only a
//! host-driven change such as [`MemoryLocation::back`] produces a snapshot
//! for the host to dispatch as
//! [`NavigationEvent::LocationChanged`](crate::NavigationEvent::LocationChanged).

/// Current location as seen by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationSnapshot {
    /// Hostname, used to pick the routing mode in `auto` mode.
    pub hostname: String,
    /// Path including the leading slash, e.g. `/docs-platform/ko/setup`.
    pub path: String,
    /// Fragment including the `#`, or empty.
    pub hash: String,
}

impl LocationSnapshot {
    /// Split an href such as `/docs-platform/ko/setup`, `#/setup/x` or
    /// `/index.html?x=1#/setup/x` into path and fragment. The query is dropped.
    #[must_use]
    pub fn from_href(hostname: &str, href: &str) -> Self {
        let (before_hash, hash) = match href.find('#') {
            Some(pos) => (&href[..pos], &href[pos..]),
            None => (href, ""),
        };
        let path = before_hash.split('?').next().unwrap_or_default();
        let path = if path.is_empty() {
            "/".to_owned()
        } else if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        };
        Self {
            hostname: hostname.to_owned(),
            path,
            hash: hash.to_owned(),
        }
    }

    /// Path and fragment joined back together.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}", self.path, self.hash)
    }
}

/// Location rewrite produced by a route codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationUpdate {
    /// Push a new history entry with this path and no fragment.
    PushPath(String),
    /// Replace the fragment (empty clears it).
    SetHash(String),
}

/// Address bar and history.
pub trait Location: Send {
    /// Current location.
    fn snapshot(&self) -> LocationSnapshot;

    /// Push a history entry for `path`. Fires no event.
    fn push_path(&mut self, path: &str);

    /// Set the fragment, creating a history entry when it changes. Fires no event.
    fn set_hash(&mut self, hash: &str);
}

/// In-memory history stack.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    entries: Vec<LocationSnapshot>,
    index: usize,
}

impl MemoryLocation {
    /// Start at `href` on `hostname`.
    #[must_use]
    pub fn new(hostname: &str, href: &str) -> Self {
        Self {
            entries: vec![LocationSnapshot::from_href(hostname, href)],
            index: 0,
        }
    }

    /// Number of history entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the current entry.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Step back one entry. Returns the new location, or `None` at the start.
    pub fn back(&mut self) -> Option<LocationSnapshot> {
        self.index = self.index.checked_sub(1)?;
        Some(self.current().clone())
    }

    /// Step forward one entry. Returns the new location, or `None` at the end.
    pub fn forward(&mut self) -> Option<LocationSnapshot> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current().clone())
    }

    /// Follow a link or typed address. Returns the new location to dispatch.
    pub fn visit(&mut self, href: &str) -> LocationSnapshot {
        let hostname = self.current().hostname.clone();
        let next = LocationSnapshot::from_href(&hostname, href);
        self.push(next.clone());
        next
    }

    fn current(&self) -> &LocationSnapshot {
        &self.entries[self.index]
    }

    fn push(&mut self, entry: LocationSnapshot) {
        self.entries.truncate(self.index + 1);
        self.entries.push(entry);
        self.index = self.entries.len() - 1;
    }
}

impl Location for MemoryLocation {
    fn snapshot(&self) -> LocationSnapshot {
        self.current().clone()
    }

    fn push_path(&mut self, path: &str) {
        let entry = LocationSnapshot {
            hostname: self.current().hostname.clone(),
            path: path.to_owned(),
            hash: String::new(),
        };
        self.push(entry);
    }

    fn set_hash(&mut self, hash: &str) {
        if self.current().hash == hash {
            return;
        }
        let entry = LocationSnapshot {
            hash: hash.to_owned(),
            ..self.current().clone()
        };
        self.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_href() {
        let snapshot = LocationSnapshot::from_href("localhost", "/index.html?t=1#/setup/x");

        assert_eq!(
            snapshot,
            LocationSnapshot {
                hostname: "localhost".to_owned(),
                path: "/index.html".to_owned(),
                hash: "#/setup/x".to_owned(),
            }
        );
        assert_eq!(snapshot.href(), "/index.html#/setup/x");
    }

    #[test]
    fn test_from_href_fragment_only() {
        let snapshot = LocationSnapshot::from_href("localhost", "#/setup/x");

        assert_eq!(snapshot.path, "/");
        assert_eq!(snapshot.hash, "#/setup/x");
    }

    #[test]
    fn test_from_href_relative_path() {
        assert_eq!(
            LocationSnapshot::from_href("h", "docs-platform/ko").path,
            "/docs-platform/ko"
        );
    }

    #[test]
    fn test_push_and_back_forward() {
        let mut location = MemoryLocation::new("example.github.io", "/docs-platform/ko");

        location.push_path("/docs-platform/ko/a");
        location.push_path("/docs-platform/ko/b");

        assert_eq!(location.len(), 3);
        assert_eq!(location.back().unwrap().path, "/docs-platform/ko/a");
        assert_eq!(location.back().unwrap().path, "/docs-platform/ko");
        assert_eq!(location.back(), None);
        assert_eq!(location.forward().unwrap().path, "/docs-platform/ko/a");
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut location = MemoryLocation::new("h", "/");
        location.push_path("/a");
        location.push_path("/b");
        location.back();

        location.push_path("/c");

        assert_eq!(location.len(), 3);
        assert_eq!(location.forward(), None);
        assert_eq!(location.snapshot().path, "/c");
    }

    #[test]
    fn test_set_hash_same_value_is_noop() {
        let mut location = MemoryLocation::new("localhost", "/#/a");

        location.set_hash("#/a");
        assert_eq!(location.len(), 1);

        location.set_hash("#/b");
        assert_eq!(location.len(), 2);
        assert_eq!(location.snapshot().path, "/");
        assert_eq!(location.snapshot().hash, "#/b");
    }

    #[test]
    fn test_visit_keeps_hostname() {
        let mut location = MemoryLocation::new("localhost", "/");

        let snapshot = location.visit("#/setup/x");

        assert_eq!(snapshot.hostname, "localhost");
        assert_eq!(location.snapshot(), snapshot);
    }
}
