use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// A space→child edge, timestamped with when the child was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceEdge {
    pub from: String,
    pub to: String,
    pub added_at: Option<i64>,
}

impl SpaceEdge {
    pub fn new(from: &str, to: &str, added_at: Option<i64>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            added_at,
        }
    }
}

/// Acyclic graph of spaces.
///
/// Edges are inserted oldest-first (untimestamped last) and any edge that
/// would close a cycle is dropped, so the older relationship always wins.
#[derive(Debug, Default)]
pub struct SpaceGraph {
    dag: BTreeMap<String, BTreeSet<String>>,
    nested: HashSet<String>,
}

impl SpaceGraph {
    pub fn build(edges: impl IntoIterator<Item = SpaceEdge>) -> Self {
        let mut sorted: Vec<SpaceEdge> = edges.into_iter().collect();
        // Stable sort keeps insertion order among equal timestamps.
        sorted.sort_by(|a, b| match (a.added_at, b.added_at) {
            (Some(ta), Some(tb)) => ta.cmp(&tb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let mut graph = Self::default();
        for edge in sorted {
            if edge.from == edge.to || graph.is_reachable(&edge.to, &edge.from) {
                tracing::debug!("dropping cyclic space edge {} -> {}", edge.from, edge.to);
                continue;
            }
            graph
                .dag
                .entry(edge.from)
                .or_default()
                .insert(edge.to.clone());
            graph.nested.insert(edge.to);
        }
        graph
    }

    /// Spaces that are a valid child of some other space.
    pub fn nested_ids(&self) -> &HashSet<String> {
        &self.nested
    }

    pub fn is_nested(&self, space_id: &str) -> bool {
        self.nested.contains(space_id)
    }

    pub fn is_valid_child(&self, parent: &str, child: &str) -> bool {
        self.dag
            .get(parent)
            .is_some_and(|children| children.contains(child))
    }

    fn is_reachable(&self, from: &str, to: &str) -> bool {
        let mut queue = VecDeque::from([from]);
        let mut visited = HashSet::new();
        while let Some(node) = queue.pop_front() {
            if node == to {
                return true;
            }
            if !visited.insert(node) {
                continue;
            }
            if let Some(children) = self.dag.get(node) {
                queue.extend(children.iter().map(String::as_str));
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_older_edge_wins_a_cycle() {
        let graph = SpaceGraph::build([
            SpaceEdge::new("b", "a", Some(20)),
            SpaceEdge::new("a", "b", Some(10)),
        ]);
        assert!(graph.is_valid_child("a", "b"));
        assert!(!graph.is_valid_child("b", "a"));
        assert!(graph.is_nested("b"));
        assert!(!graph.is_nested("a"));
    }

    #[test]
    fn test_untimestamped_edges_lose() {
        let graph = SpaceGraph::build([
            SpaceEdge::new("c", "a", None),
            SpaceEdge::new("a", "b", Some(1)),
            SpaceEdge::new("b", "c", Some(2)),
        ]);
        assert!(graph.is_valid_child("a", "b"));
        assert!(graph.is_valid_child("b", "c"));
        assert!(!graph.is_valid_child("c", "a"));
    }

    #[test]
    fn test_diamond_is_kept() {
        let graph = SpaceGraph::build([
            SpaceEdge::new("root", "left", Some(1)),
            SpaceEdge::new("root", "right", Some(2)),
            SpaceEdge::new("left", "leaf", Some(3)),
            SpaceEdge::new("right", "leaf", Some(4)),
        ]);
        assert!(graph.is_valid_child("left", "leaf"));
        assert!(graph.is_valid_child("right", "leaf"));
        assert_eq!(graph.nested_ids().len(), 3);
    }

    #[test]
    fn test_self_loop_dropped() {
        let graph = SpaceGraph::build([SpaceEdge::new("a", "a", Some(1))]);
        assert!(!graph.is_valid_child("a", "a"));
        assert!(graph.nested_ids().is_empty());
    }
}
