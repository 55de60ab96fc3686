//! Handler registry
//!
//! Provides [`HandlerRegistry`] for table-driven dispatch from a category to
//! the handler that applies it.

use std::collections::BTreeMap;

use crate::category::Category;
use crate::handler::CategoryHandler;
use crate::handlers::{
    CoolingEfficiencyHandler, HeatingEfficiencyHandler, InfiltrationHandler, InsulationHandler,
    InsulationTarget, SetpointHandler, UsageHandler, UsageTarget, WaterHeaterEfficiencyHandler,
    WindowHandler, WindowProperty,
};

/// Map from category to handler
///
/// Iteration follows category order, which is dispatch order.
pub struct HandlerRegistry {
    handlers: BTreeMap<Category, Box<dyn CategoryHandler>>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("categories", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Create registry with a handler for every catalogued category
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SetpointHandler::heating());
        registry.register(SetpointHandler::cooling());
        registry.register(InfiltrationHandler);
        registry.register(HeatingEfficiencyHandler);
        registry.register(CoolingEfficiencyHandler);
        for target in [
            InsulationTarget::Roofs,
            InsulationTarget::Ceilings,
            InsulationTarget::AboveGroundWalls,
            InsulationTarget::BelowGroundWalls,
            InsulationTarget::Slabs,
            InsulationTarget::Floors,
        ] {
            registry.register(InsulationHandler::new(target));
        }
        registry.register(WaterHeaterEfficiencyHandler);
        registry.register(WindowHandler::new(WindowProperty::UFactor));
        registry.register(WindowHandler::new(WindowProperty::Shgc));
        for target in [
            UsageTarget::WaterFixtures,
            UsageTarget::Appliances,
            UsageTarget::Lighting,
            UsageTarget::PlugLoads,
            UsageTarget::FuelLoads,
            UsageTarget::PoolsAndSpas,
        ] {
            registry.register(UsageHandler::new(target));
        }
        registry
    }

    /// Register a handler, replacing any handler for the same category
    pub fn register(&mut self, handler: impl CategoryHandler + 'static) {
        self.handlers.insert(handler.category(), Box::new(handler));
    }

    /// Get the handler for a category
    #[inline]
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&dyn CategoryHandler> {
        self.handlers.get(&category).map(|handler| handler.as_ref())
    }

    /// Check if a category has a handler
    #[inline]
    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.handlers.contains_key(&category)
    }

    /// Remove the handler for a category
    #[inline]
    pub fn remove(&mut self, category: Category) -> bool {
        self.handlers.remove(&category).is_some()
    }

    /// Registered categories, in dispatch order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.handlers.keys().copied()
    }

    /// Get number of registered handlers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_catalogue() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(registry.len(), Category::ALL.len());
        assert!(registry.categories().eq(Category::ALL));
    }

    #[test]
    fn handlers_report_their_own_category() {
        let registry = HandlerRegistry::with_defaults();
        for category in Category::ALL {
            assert_eq!(registry.get(category).unwrap().category(), category);
        }
    }

    #[test]
    fn register_replaces_and_remove_drops() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.is_empty());

        registry.register(InfiltrationHandler);
        registry.register(InfiltrationHandler);
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(Category::AirLeakagePctChange));
        assert!(!registry.contains(Category::AirLeakagePctChange));
    }
}
