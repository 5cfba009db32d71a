//! Name-to-constructor table for the agent family.

use crate::problem::distance_to_goal;

use super::{
    CompressedDfsAgent, ConstrainedDfsAgent, IdealizedDfsAgent, RandomAgent, SearchAgent,
};

/// Constructor for a named agent. The seed feeds the agent's own rng where
/// it has one; deterministic agents ignore it.
pub type AgentFactory = fn(u64) -> Box<dyn SearchAgent>;

/// Explicit name-to-factory table.
///
/// Built by the caller at startup and passed where needed; there is no
/// global registry. Lookups are linear, which is fine at this size.
pub struct AgentRegistry {
    factories: Vec<(&'static str, AgentFactory)>,
}

impl AgentRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        AgentRegistry {
            factories: Vec::new(),
        }
    }

    /// The standard agent family, heuristic variants wired to
    /// [`distance_to_goal`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("random", |seed| Box::new(RandomAgent::seeded(seed)));
        registry.register("idealized", |_| Box::new(IdealizedDfsAgent::new()));
        registry.register("idealized-heuristic", |_| {
            Box::new(IdealizedDfsAgent::with_evaluator(distance_to_goal))
        });
        registry.register("constrained", |seed| {
            Box::new(ConstrainedDfsAgent::seeded(seed))
        });
        registry.register("compressed", |seed| {
            Box::new(CompressedDfsAgent::seeded(seed))
        });
        registry.register("compressed-heuristic", |_| {
            Box::new(CompressedDfsAgent::with_evaluator(distance_to_goal))
        });
        registry
    }

    /// Register `factory` under `name`. Duplicates are allowed; lookup
    /// returns the first match.
    pub fn register(&mut self, name: &'static str, factory: AgentFactory) {
        self.factories.push((name, factory));
    }

    /// Build the named agent, or `None` for an unknown name.
    pub fn build(&self, name: &str, seed: u64) -> Option<Box<dyn SearchAgent>> {
        self.factories
            .iter()
            .find(|(registered, _)| *registered == name)
            .map(|(_, factory)| factory(seed))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.iter().map(|(name, _)| *name).collect()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
