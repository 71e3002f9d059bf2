use std::error::Error;

use crate::registry::{Config, Registry};

/// Constructs components of some kind from their configuration.
pub trait Factory: Send + Sync {
    type Item: ?Sized;

    /// Returns type as a string that is used mainly for concrete component identification.
    fn ty() -> &'static str where Self: Sized;

    /// Constructs a new component by configuring it with the given config.
    ///
    /// Nested components are constructed through the registry.
    fn from(&self, cfg: &Config, registry: &Registry) -> Result<Box<Self::Item>, Box<dyn Error>>;
}
