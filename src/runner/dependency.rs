//! Dependency graph for step execution ordering.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, StaircaseError};
use crate::steps::{Flight, StepDirectory};

/// The on_pass/on_fail edges of a suite, in registration order.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Map of step name to its direct dependencies, in declaration order.
    dependencies: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build the graph from a directory whose wildcards are already resolved.
    pub fn from_directory(directory: &StepDirectory) -> Self {
        let dependencies = directory
            .iter()
            .map(|entry| (entry.name.clone(), entry.condition.dependencies().to_vec()))
            .collect();
        Self { dependencies }
    }

    /// Get the direct dependencies of a step.
    pub fn dependencies_of(&self, step: &str) -> Option<&[String]> {
        self.dependencies.get(step).map(Vec::as_slice)
    }

    /// Get the number of steps in the graph.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Returns steps in topological order (dependencies before dependents).
    ///
    /// Depth-first: each step first emits its dependencies, then itself.
    /// Independent steps keep registration order. A step reached again while
    /// it is still on the DFS path closes a cycle, which is reported as the
    /// path from that step back to itself.
    pub fn topological_order(&self) -> Result<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Unvisited,
            Visiting,
            Visited,
        }

        fn visit<'a>(
            node: &'a str,
            graph: &'a DependencyGraph,
            state: &mut IndexMap<&'a str, State>,
            path: &mut Vec<&'a str>,
            order: &mut Vec<String>,
        ) -> Result<()> {
            match state.get(node).copied() {
                Some(State::Visited) => return Ok(()),
                Some(State::Visiting) => {
                    let start = path.iter().position(|s| *s == node).unwrap_or(0);
                    let mut cycle: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
                    cycle.push(node.to_string());
                    return Err(StaircaseError::DependencyCycle { cycle });
                }
                Some(State::Unvisited) => {}
                None => {
                    return Err(StaircaseError::StepNotFound {
                        name: node.to_string(),
                    })
                }
            }

            state.insert(node, State::Visiting);
            path.push(node);

            if let Some(deps) = graph.dependencies.get(node) {
                for dep in deps {
                    visit(dep, graph, state, path, order)?;
                }
            }

            path.pop();
            state.insert(node, State::Visited);
            order.push(node.to_string());
            Ok(())
        }

        let mut state: IndexMap<&str, State> = self
            .dependencies
            .keys()
            .map(|s| (s.as_str(), State::Unvisited))
            .collect();
        let mut path = Vec::new();
        let mut order = Vec::with_capacity(self.dependencies.len());

        for step in self.dependencies.keys() {
            visit(step, self, &mut state, &mut path, &mut order)?;
        }

        Ok(order)
    }
}

/// The resolved execution order, partitioned into flights.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan {
    pub setup: Vec<String>,
    /// Task and Test steps, interleaved in their overall relative order.
    pub main: Vec<String>,
    pub teardown: Vec<String>,
}

impl ExecutionPlan {
    /// Order the directory and split the order by flight.
    pub fn resolve(directory: &StepDirectory) -> Result<Self> {
        let order = DependencyGraph::from_directory(directory).topological_order()?;

        let mut plan = Self::default();
        for name in order {
            match directory.get(&name)?.phase.flight() {
                Flight::Setup => plan.setup.push(name),
                Flight::Main => plan.main.push(name),
                Flight::Teardown => plan.teardown.push(name),
            }
        }
        Ok(plan)
    }

    /// Steps of one flight, in execution order.
    pub fn flight(&self, flight: Flight) -> &[String] {
        match flight {
            Flight::Setup => &self.setup,
            Flight::Main => &self.main,
            Flight::Teardown => &self.teardown,
        }
    }

    /// Setup, then main, then teardown. Position `n` is the `n`th item (1-based).
    pub fn ordered(&self) -> Vec<String> {
        self.setup
            .iter()
            .chain(&self.main)
            .chain(&self.teardown)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.setup.len() + self.main.len() + self.teardown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
