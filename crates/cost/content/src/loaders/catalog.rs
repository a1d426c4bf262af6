//! Built strategies for every route of a document.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use cost_core::{CostStrategy, StrategyConfig, Vec3};

use crate::document::TeleportConfig;
use crate::loaders::{ConfigLoader, LoadResult};

#[derive(Clone, Debug)]
struct Route {
    enabled: bool,
    strategy: Option<CostStrategy>,
}

/// Strategy lookup by route name.
///
/// Routes missing from the document are enabled and use the global strategy.
#[derive(Clone, Debug)]
pub struct StrategyCatalog {
    spawn_point: Vec3,
    global: CostStrategy,
    routes: BTreeMap<String, Route>,
}

impl StrategyCatalog {
    /// Builds every strategy in `config`.
    pub fn build(config: &TeleportConfig) -> LoadResult<Self> {
        let global = build_strategy(&config.global.cost_strategy).context("global cost strategy")?;

        let mut routes = BTreeMap::new();
        for (name, route) in &config.routes {
            let strategy = route
                .cost_strategy
                .as_ref()
                .map(build_strategy)
                .transpose()
                .with_context(|| format!("cost strategy of route `{name}`"))?;
            routes.insert(
                name.clone(),
                Route {
                    enabled: route.enabled,
                    strategy,
                },
            );
        }

        tracing::debug!(routes = routes.len(), "built strategy catalog");
        Ok(Self {
            spawn_point: config.global.spawn_point,
            global,
            routes,
        })
    }

    /// Loads and builds the document at `path`, falling back to the built-in one.
    pub fn load(path: &Path) -> LoadResult<Self> {
        Self::build(&ConfigLoader::load_or_default(path)?)
    }

    pub fn builtin() -> LoadResult<Self> {
        Self::build(&ConfigLoader::builtin()?)
    }

    pub fn spawn_point(&self) -> Vec3 {
        self.spawn_point
    }

    pub fn global(&self) -> &CostStrategy {
        &self.global
    }

    pub fn is_enabled(&self, route: &str) -> bool {
        self.routes.get(route).is_none_or(|route| route.enabled)
    }

    /// The route's own strategy, or the global one.
    pub fn strategy(&self, route: &str) -> &CostStrategy {
        self.routes
            .get(route)
            .and_then(|route| route.strategy.as_ref())
            .unwrap_or(&self.global)
    }
}

fn build_strategy(config: &StrategyConfig) -> LoadResult<CostStrategy> {
    Ok(CostStrategy::build(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::routes;

    #[test]
    fn test_builtin_catalog() {
        let catalog = StrategyCatalog::builtin().unwrap();
        assert_eq!(catalog.spawn_point(), Vec3::new(0.0, 64.0, 0.0));
        assert!(catalog.is_enabled(routes::TO_PLAYER));
        assert!(catalog.is_enabled("teleport-somewhere-else"));
        assert_eq!(catalog.strategy(routes::TO_HOME), catalog.global());
    }
}
