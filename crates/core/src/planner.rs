//! Task graph planning for the debug pipeline
//!
//! Tasks declare two kinds of predecessors: hard dependencies ("depends on",
//! must complete first, participate in cycle detection) and soft orderings
//! ("must run after", ordering hints that never fail the build). Planning
//! validates the hard edges eagerly and produces a total order; a soft edge
//! that would close a cycle with the edges already present is dropped and
//! reported, not fatal.

use std::collections::HashMap;

use petgraph::algo::{is_cyclic_directed, kosaraju_scc, toposort};
use petgraph::prelude::*;

use crate::types::{SpigletError, SpigletResult};

/// One task definition: an identifier plus its declared predecessors
#[derive(Debug, Clone, Default)]
pub struct TaskSpec {
    pub id: String,
    pub depends_on: Vec<String>,
    pub must_run_after: Vec<String>,
}

impl TaskSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            depends_on: Vec::new(),
            must_run_after: Vec::new(),
        }
    }

    pub fn depends_on(mut self, predecessor: impl Into<String>) -> Self {
        self.depends_on.push(predecessor.into());
        self
    }

    pub fn must_run_after(mut self, predecessor: impl Into<String>) -> Self {
        self.must_run_after.push(predecessor.into());
        self
    }
}

/// A computed execution order plus any soft edges dropped to obtain it
#[derive(Debug, Clone)]
pub struct TaskPlan {
    pub order: Vec<String>,
    /// (predecessor, successor) pairs whose soft ordering conflicted with
    /// the rest of the graph
    pub dropped_soft_edges: Vec<(String, String)>,
}

/// Validated task graph; immutable once built
#[derive(Debug)]
pub struct TaskGraph {
    graph: DiGraph<String, ()>,
    soft_edges: Vec<(NodeIndex, NodeIndex)>,
}

impl TaskGraph {
    /// Build and validate a graph from task specs.
    ///
    /// Fails eagerly on duplicate identifiers, unknown hard predecessors,
    /// and hard-dependency cycles. Soft edges naming unknown tasks are
    /// ignored; soft conflicts are resolved later, at planning time.
    pub fn new(specs: &[TaskSpec]) -> SpigletResult<Self> {
        let mut graph = DiGraph::<String, ()>::new();
        let mut indices: HashMap<String, NodeIndex> = HashMap::new();

        for spec in specs {
            if indices.contains_key(&spec.id) {
                return Err(SpigletError::Task(format!(
                    "Duplicate task '{}' in graph",
                    spec.id
                )));
            }
            let index = graph.add_node(spec.id.clone());
            indices.insert(spec.id.clone(), index);
        }

        for spec in specs {
            let task = indices[&spec.id];
            for predecessor in &spec.depends_on {
                let Some(&pred) = indices.get(predecessor) else {
                    return Err(SpigletError::Task(format!(
                        "Task '{}' depends on '{}' which was not found",
                        spec.id, predecessor
                    )));
                };
                graph.add_edge(pred, task, ());
            }
        }

        // Soft edges never gate execution, so they stay out of cycle detection
        let mut soft_edges = Vec::new();
        for spec in specs {
            let task = indices[&spec.id];
            for predecessor in &spec.must_run_after {
                if let Some(&pred) = indices.get(predecessor) {
                    soft_edges.push((pred, task));
                }
            }
        }

        if let Some(cycle) = find_cycle(&graph) {
            return Err(SpigletError::CyclicDependency { cycle });
        }

        Ok(Self { graph, soft_edges })
    }

    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Compute a total order satisfying every hard edge and as many soft
    /// edges as the hard order admits
    pub fn plan(&self) -> SpigletResult<TaskPlan> {
        let mut working = self.graph.clone();
        let mut dropped_soft_edges = Vec::new();

        for &(pred, task) in &self.soft_edges {
            let edge = working.add_edge(pred, task, ());
            if is_cyclic_directed(&working) {
                working.remove_edge(edge);
                dropped_soft_edges.push((working[pred].clone(), working[task].clone()));
            }
        }

        let order = toposort(&working, None)
            .map_err(|e| {
                SpigletError::Task(format!(
                    "Planner produced a cyclic graph at '{}'",
                    working[e.node_id()]
                ))
            })?
            .into_iter()
            .map(|index| working[index].clone())
            .collect();

        Ok(TaskPlan {
            order,
            dropped_soft_edges,
        })
    }
}

/// Extract the smallest offending hard-dependency cycle, sorted by name
fn find_cycle(graph: &DiGraph<String, ()>) -> Option<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();

    cycles.sort();
    cycles.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[String], id: &str) -> usize {
        order
            .iter()
            .position(|task| task == id)
            .unwrap_or_else(|| panic!("task '{}' missing from order {:?}", id, order))
    }

    #[test]
    fn test_hard_edges_respected() {
        let graph = TaskGraph::new(&[
            TaskSpec::new("download"),
            TaskSpec::new("build"),
            TaskSpec::new("prepare").depends_on("build"),
            TaskSpec::new("run").depends_on("prepare"),
            TaskSpec::new("debug")
                .depends_on("prepare")
                .depends_on("download")
                .depends_on("run"),
        ])
        .unwrap();

        let plan = graph.plan().unwrap();
        assert_eq!(plan.order.len(), 5);
        assert!(position(&plan.order, "build") < position(&plan.order, "prepare"));
        assert!(position(&plan.order, "prepare") < position(&plan.order, "run"));
        assert!(position(&plan.order, "run") < position(&plan.order, "debug"));
        assert!(position(&plan.order, "download") < position(&plan.order, "debug"));
        assert!(plan.dropped_soft_edges.is_empty());
    }

    #[test]
    fn test_soft_edge_orders_tasks() {
        let graph = TaskGraph::new(&[
            TaskSpec::new("download"),
            TaskSpec::new("build"),
            TaskSpec::new("prepare").depends_on("build"),
            TaskSpec::new("run").depends_on("prepare").must_run_after("download"),
            TaskSpec::new("debug")
                .depends_on("prepare")
                .depends_on("download")
                .depends_on("run"),
        ])
        .unwrap();

        let plan = graph.plan().unwrap();
        assert!(position(&plan.order, "download") < position(&plan.order, "run"));
        assert!(plan.dropped_soft_edges.is_empty());
    }

    #[test]
    fn test_hard_cycle_fails() {
        let err = TaskGraph::new(&[
            TaskSpec::new("a").depends_on("b"),
            TaskSpec::new("b").depends_on("a"),
        ])
        .unwrap_err();

        match err {
            SpigletError::CyclicDependency { cycle } => {
                assert_eq!(cycle, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("Expected CyclicDependency, got {:?}", other),
        }
    }

    #[test]
    fn test_self_dependency_fails() {
        let err = TaskGraph::new(&[TaskSpec::new("a").depends_on("a")]).unwrap_err();
        assert!(matches!(err, SpigletError::CyclicDependency { .. }));
    }

    #[test]
    fn test_conflicting_soft_edge_dropped() {
        // Hard: a -> b; soft wants b before a. The soft edge loses.
        let graph = TaskGraph::new(&[
            TaskSpec::new("a").must_run_after("b"),
            TaskSpec::new("b").depends_on("a"),
        ])
        .unwrap();

        let plan = graph.plan().unwrap();
        assert!(position(&plan.order, "a") < position(&plan.order, "b"));
        assert_eq!(
            plan.dropped_soft_edges,
            vec![("b".to_string(), "a".to_string())]
        );
    }

    #[test]
    fn test_soft_cycle_among_soft_edges() {
        // Two soft edges that contradict each other: one survives, one drops
        let graph = TaskGraph::new(&[
            TaskSpec::new("a").must_run_after("b"),
            TaskSpec::new("b").must_run_after("a"),
        ])
        .unwrap();

        let plan = graph.plan().unwrap();
        assert_eq!(plan.order.len(), 2);
        assert_eq!(plan.dropped_soft_edges.len(), 1);
    }

    #[test]
    fn test_unknown_hard_dependency_fails() {
        let err = TaskGraph::new(&[TaskSpec::new("a").depends_on("ghost")]).unwrap_err();
        assert!(matches!(err, SpigletError::Task(_)));
    }

    #[test]
    fn test_unknown_soft_dependency_ignored() {
        let graph = TaskGraph::new(&[TaskSpec::new("a").must_run_after("ghost")]).unwrap();
        let plan = graph.plan().unwrap();
        assert_eq!(plan.order, vec!["a".to_string()]);
    }

    #[test]
    fn test_duplicate_task_fails() {
        let err = TaskGraph::new(&[TaskSpec::new("a"), TaskSpec::new("a")]).unwrap_err();
        assert!(matches!(err, SpigletError::Task(_)));
    }
}
