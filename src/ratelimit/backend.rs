//! Admission backend trait for abstracting limiter implementations.

use super::clock::Clock;
use super::limiter::{AdmissionLimiter, AdmissionResult};

/// Trait for admission control implementations.
///
/// The calling layer holds its limiter behind this trait so tests and
/// multiple deployments can inject independent instances instead of sharing
/// a process-wide singleton.
pub trait AdmissionBackend: Send + Sync {
    /// Decide admission for the given client and record the attempt.
    fn check_limit(&self, identifier: Option<&str>) -> AdmissionResult;
}

impl<C: Clock> AdmissionBackend for AdmissionLimiter<C> {
    fn check_limit(&self, identifier: Option<&str>) -> AdmissionResult {
        AdmissionLimiter::check_limit(self, identifier)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::RateLimitingConfig;

    #[test]
    fn test_limiter_usable_as_trait_object() {
        let backend: Arc<dyn AdmissionBackend> =
            Arc::new(AdmissionLimiter::new(RateLimitingConfig::default()));

        let result = backend.check_limit(Some("client"));
        assert!(result.allowed);
        assert_eq!(result.minute_remaining, 19);
    }
}
