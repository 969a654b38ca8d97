//! Dependency graph over `source` and `dependsOn` edges
//!
//! Presentation layers draw these edges and the validator uses them to
//! look for cycles. References to ids that do not exist are skipped here;
//! reporting them is the validator's concern.

use crate::ast::PipelineDocument;
use crate::error::{CoreError, Result};
use std::collections::{HashMap, VecDeque};

/// A directed edge from an upstream step to the step that consumes it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub upstream: String,
    pub downstream: String,
}

impl PipelineDocument {
    /// All edges whose endpoints both exist, in document order
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for step in &self.steps {
            for upstream in step.upstream() {
                if self.contains_step(upstream) {
                    edges.push(Edge {
                        upstream: upstream.to_string(),
                        downstream: step.id.clone(),
                    });
                }
            }
        }
        edges
    }

    /// Ids of the steps feeding `id`, `source` first
    pub fn upstream_of(&self, id: &str) -> Vec<&str> {
        match self.step(id) {
            Some(step) => step
                .upstream()
                .filter(|upstream| self.contains_step(upstream))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Ids of the steps that consume `id`, in document order
    pub fn downstream_of(&self, id: &str) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|step| step.upstream().any(|upstream| upstream == id))
            .map(|step| step.id.as_str())
            .collect()
    }

    /// Topological order of the unique step ids.
    ///
    /// Steps that do not depend on each other keep their document order.
    /// Fails with [`CoreError::Cycle`] naming the steps that sit on a cycle.
    pub fn execution_order(&self) -> Result<Vec<&str>> {
        let graph = Graph::build(self);
        let mut in_degree = graph.in_degrees();

        // Seed with every ready node; the queue stays ordered by document position
        let mut ready: VecDeque<usize> = (0..graph.nodes.len())
            .filter(|&node| in_degree[node] == 0)
            .collect();
        let mut order = Vec::with_capacity(graph.nodes.len());

        while let Some(node) = ready.pop_front() {
            order.push(graph.nodes[node]);
            for &next in &graph.outgoing[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    insert_sorted(&mut ready, next);
                }
            }
        }

        if order.len() == graph.nodes.len() {
            Ok(order)
        } else {
            let members = graph.cycle_members(&in_degree);
            log::debug!("execution order blocked by cycle: {:?}", members);
            Err(CoreError::Cycle(members))
        }
    }
}

fn insert_sorted(queue: &mut VecDeque<usize>, node: usize) {
    let at = queue.partition_point(|&queued| queued < node);
    queue.insert(at, node);
}

/// Adjacency lists keyed by first-occurrence index of each id
struct Graph<'a> {
    nodes: Vec<&'a str>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl<'a> Graph<'a> {
    fn build(doc: &'a PipelineDocument) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut nodes = Vec::new();
        for id in doc.step_ids() {
            if !index.contains_key(id) {
                index.insert(id, nodes.len());
                nodes.push(id);
            }
        }

        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];
        for step in &doc.steps {
            let to = index[step.id.as_str()];
            for upstream in step.upstream() {
                if let Some(&from) = index.get(upstream) {
                    outgoing[from].push(to);
                    incoming[to].push(from);
                }
            }
        }

        Self {
            nodes,
            outgoing,
            incoming,
        }
    }

    fn in_degrees(&self) -> Vec<usize> {
        self.incoming.iter().map(Vec::len).collect()
    }

    /// Nodes left over by Kahn's pass, minus those merely downstream of a
    /// cycle: peel off remaining nodes with no remaining successors.
    fn cycle_members(&self, in_degree: &[usize]) -> Vec<String> {
        let mut remaining: Vec<bool> = in_degree.iter().map(|&degree| degree > 0).collect();
        let mut out_degree: Vec<usize> = (0..self.nodes.len())
            .map(|node| {
                self.outgoing[node]
                    .iter()
                    .filter(|&&next| remaining[next])
                    .count()
            })
            .collect();

        let mut sinks: VecDeque<usize> = (0..self.nodes.len())
            .filter(|&node| remaining[node] && out_degree[node] == 0)
            .collect();
        while let Some(node) = sinks.pop_front() {
            remaining[node] = false;
            for &prev in &self.incoming[node] {
                if remaining[prev] {
                    out_degree[prev] -= 1;
                    if out_degree[prev] == 0 {
                        sinks.push_back(prev);
                    }
                }
            }
        }

        (0..self.nodes.len())
            .filter(|&node| remaining[node])
            .map(|node| self.nodes[node].to_string())
            .collect()
    }
}
