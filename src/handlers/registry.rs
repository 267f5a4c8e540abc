use std::fmt;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

use super::status::StatusEnvelopeHandler;
use super::tiered::TieredEnvelopeHandler;
use super::traits::FormatHandler;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("global handler registry already installed ({0} handlers)")]
    AlreadyInstalled(usize),
}

/// Ordered, append-only collection of format handlers.
///
/// Registration order is search order: for a given path, earlier handlers
/// get the first chance to claim the payload.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn FormatHandler>>,
}

impl HandlerRegistry {
    /// Empty registry; pass-through searches will always end in no-match
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn FormatHandler>) -> &mut Self {
        tracing::debug!(handler = handler.name(), position = self.handlers.len(), "Handler registered");
        self.handlers.push(handler);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn FormatHandler>> {
        self.handlers.iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Create a registry with the built-in envelopes
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(Arc::new(TieredEnvelopeHandler::new()))
            .register(Arc::new(StatusEnvelopeHandler::new()));
        registry
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

static GLOBAL: OnceLock<HandlerRegistry> = OnceLock::new();

/// Install the process-wide registry. Must happen before the first call to
/// [`global`]; afterwards the registry is read-only.
pub fn install(registry: HandlerRegistry) -> Result<(), RegistryError> {
    let count = registry.len();
    GLOBAL
        .set(registry)
        .map_err(|_| RegistryError::AlreadyInstalled(GLOBAL.get().map_or(count, |r| r.len())))?;
    tracing::info!(handlers = count, "Global handler registry installed");
    Ok(())
}

/// Process-wide registry, falling back to [`HandlerRegistry::with_defaults`]
/// when nothing was installed.
pub fn global() -> &'static HandlerRegistry {
    GLOBAL.get_or_init(HandlerRegistry::with_defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerOutcome;
    use crate::normalize::NormalizedResult;
    use serde_json::Value;

    struct Never;

    impl FormatHandler for Never {
        fn name(&self) -> &'static str {
            "never"
        }

        fn try_handle(&self, _: &Value, _: &str, _: &mut NormalizedResult) -> HandlerOutcome {
            HandlerOutcome::Declined
        }
    }

    #[test]
    fn test_defaults_order() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![TieredEnvelopeHandler::NAME, StatusEnvelopeHandler::NAME]
        );
    }

    #[test]
    fn test_register_appends() {
        let mut registry = HandlerRegistry::with_defaults();
        registry.register(Arc::new(Never));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names().last(), Some(&"never"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(format!("{:?}", registry), "HandlerRegistry { handlers: [] }");
    }

    #[test]
    fn test_install_after_global_fails() {
        let registry = global();
        assert!(!registry.is_empty());
        assert!(matches!(
            install(HandlerRegistry::new()),
            Err(RegistryError::AlreadyInstalled(_))
        ));
    }
}
