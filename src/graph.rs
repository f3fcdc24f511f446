//! Shape dependency graph
//!
//! Named references between shapes form a directed graph. The registry
//! uses it at finalize time to reject unresolved references and to report
//! recursive shape groups (SCCs) — cycles are legal, they are how the
//! self-referential validation-error shape exists at all.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

use crate::shape::TypeExpr;

/// Dependency graph over named shapes
pub struct ShapeGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
    defined: HashSet<String>,
}

impl ShapeGraph {
    /// Build the graph from named shape definitions.
    ///
    /// References to names that are not in the definition set still get a
    /// node, so unresolved references stay visible.
    pub fn build<'a>(shapes: impl Iterator<Item = (&'a str, &'a TypeExpr)> + Clone) -> Self {
        let mut graph = DiGraph::new();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();
        let mut defined = HashSet::new();

        let mut node = |graph: &mut DiGraph<String, ()>,
                        index: &mut HashMap<String, NodeIndex>,
                        name: &str| {
            *index
                .entry(name.to_string())
                .or_insert_with(|| graph.add_node(name.to_string()))
        };

        for (name, _) in shapes.clone() {
            node(&mut graph, &mut index, name);
            defined.insert(name.to_string());
        }

        for (name, expr) in shapes {
            let from = index[name];
            let mut refs = Vec::new();
            expr.collect_refs(&mut refs);
            for target in refs {
                let to = node(&mut graph, &mut index, &target);
                graph.update_edge(from, to, ());
            }
        }

        Self {
            graph,
            index,
            defined,
        }
    }

    /// References to names that were never defined: `(from, reference)`
    pub fn unresolved(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for (name, &idx) in &self.index {
            if self.defined.contains(name) {
                continue;
            }
            for source in self.graph.neighbors_directed(idx, Direction::Incoming) {
                missing.push((self.graph[source].clone(), name.clone()));
            }
        }
        missing.sort();
        missing
    }

    /// Shapes this shape refers to
    pub fn dependencies(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Shapes referring to this shape
    pub fn dependents(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Groups of mutually recursive shapes (including self-recursion)
    pub fn recursive_groups(&self) -> Vec<Vec<String>> {
        let mut groups = Vec::new();
        for scc in tarjan_scc(&self.graph) {
            let is_cycle = scc.len() > 1
                || scc
                    .first()
                    .is_some_and(|&idx| self.graph.find_edge(idx, idx).is_some());
            if is_cycle {
                let mut names: Vec<String> =
                    scc.iter().map(|&idx| self.graph[idx].clone()).collect();
                names.sort();
                groups.push(names);
            }
        }
        groups.sort();
        groups
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Field, TypeExpr};

    fn shapes() -> Vec<(String, TypeExpr)> {
        vec![
            (
                "Location".to_string(),
                TypeExpr::object(vec![Field::required(
                    "coordinate",
                    TypeExpr::reference("Coordinate"),
                )]),
            ),
            ("Coordinate".to_string(), TypeExpr::object(vec![])),
            (
                "ValidationError".to_string(),
                TypeExpr::object(vec![Field::optional(
                    "nestedErrors",
                    TypeExpr::array(TypeExpr::reference("ValidationError")),
                )]),
            ),
        ]
    }

    fn graph_of(defs: &[(String, TypeExpr)]) -> ShapeGraph {
        ShapeGraph::build(defs.iter().map(|(n, e)| (n.as_str(), e)))
    }

    #[test]
    fn test_dependencies_and_dependents() {
        let defs = shapes();
        let graph = graph_of(&defs);
        assert_eq!(graph.dependencies("Location"), vec!["Coordinate"]);
        assert_eq!(graph.dependents("Coordinate"), vec!["Location"]);
    }

    #[test]
    fn test_self_recursion_is_a_group() {
        let defs = shapes();
        let graph = graph_of(&defs);
        assert_eq!(
            graph.recursive_groups(),
            vec![vec!["ValidationError".to_string()]]
        );
    }

    #[test]
    fn test_unresolved_reference_detected() {
        let defs = vec![(
            "Device".to_string(),
            TypeExpr::object(vec![Field::required(
                "status",
                TypeExpr::reference("DeviceStatus"),
            )]),
        )];
        let graph = graph_of(&defs);
        assert_eq!(
            graph.unresolved(),
            vec![("Device".to_string(), "DeviceStatus".to_string())]
        );
    }
}
