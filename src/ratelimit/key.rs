//! Counter key generation and handling.

/// A key that uniquely identifies one client's counter in one window.
///
/// The key is structural rather than a delimited string, so identifiers
/// containing arbitrary characters can never collide with another
/// (identifier, window) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey {
    /// The client identifier this counter belongs to
    pub identifier: String,
    /// Index of the fixed window this counter covers
    pub window_index: u64,
}

impl CounterKey {
    /// Create a new counter key.
    pub fn new(identifier: &str, window_index: u64) -> Self {
        Self {
            identifier: identifier.to_string(),
            window_index,
        }
    }
}

impl std::fmt::Display for CounterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.identifier, self.window_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_key_equality() {
        assert_eq!(CounterKey::new("client", 42), CounterKey::new("client", 42));
        assert_ne!(CounterKey::new("client", 42), CounterKey::new("client", 43));
        assert_ne!(CounterKey::new("client", 42), CounterKey::new("other", 42));
    }

    #[test]
    fn test_delimiter_in_identifier_does_not_collide() {
        // A string encoding would conflate "a:1" + window 2 with "a" + window 12
        assert_ne!(CounterKey::new("a:1", 2), CounterKey::new("a", 12));
    }

    #[test]
    fn test_display() {
        assert_eq!(CounterKey::new("10.0.0.1", 7).to_string(), "10.0.0.1:7");
    }
}
