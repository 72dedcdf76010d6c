//! The committed, queryable graph store.
//!
//! Holds the vertex table and edge table. Mutated exclusively through
//! [`merge`](GraphStore::merge), which only transaction commit invokes;
//! staged-but-uncommitted mutations are invisible to every accessor here.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::engine::transaction::{AppliedOp, StagedEdge, StagedVertex};
use crate::model::{Edge, Vertex, VertexId};

/// Committed vertices and edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStore {
    vertices: BTreeMap<VertexId, Vertex>,
    edges: Vec<Edge>,
}

impl GraphStore {
    /// Number of committed vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of committed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Looks up a committed vertex by id.
    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// All committed edges, in commit/staging order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Committed vertices of the given type, in id order.
    pub fn vertices_of_type<'a>(&'a self, vertex_type: &'a str) -> impl Iterator<Item = &'a Vertex> {
        self.vertices
            .values()
            .filter(move |v| v.vertex_type == vertex_type)
    }

    /// Committed edges carrying the given label, in commit order.
    pub fn edges_with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |e| e.label == label)
    }

    /// Ids of all vertices adjacent to `id`, outgoing and incoming,
    /// deduplicated and in id order.
    pub fn neighbors(&self, id: &str) -> Vec<VertexId> {
        let mut found = BTreeSet::new();
        for edge in &self.edges {
            if edge.from == id {
                found.insert(edge.to.clone());
            }
            if edge.to == id {
                found.insert(edge.from.clone());
            }
        }
        found.into_iter().collect()
    }

    /// Merges a transaction's staged buffers into the committed tables.
    ///
    /// Invoked only by commit. Returns one [`AppliedOp`] per merged
    /// mutation, vertices first, then edges in staging order.
    pub(crate) fn merge(
        &mut self,
        staged_vertices: BTreeMap<VertexId, StagedVertex>,
        staged_edges: Vec<StagedEdge>,
    ) -> Vec<AppliedOp> {
        let mut applied = Vec::with_capacity(staged_vertices.len() + staged_edges.len());

        for (id, staged) in staged_vertices {
            applied.push(AppliedOp::VertexAdded {
                id: id.clone(),
                vertex_type: staged.vertex_type.clone(),
            });
            self.vertices.insert(
                id.clone(),
                Vertex {
                    id,
                    vertex_type: staged.vertex_type,
                    properties: staged.properties,
                },
            );
        }

        for staged in staged_edges {
            applied.push(AppliedOp::EdgeAdded {
                from: staged.from.clone(),
                to: staged.to.clone(),
                label: staged.label.clone(),
            });
            self.edges
                .push(Edge::new(staged.from, staged.to, staged.label));
        }

        applied
    }
}
