use std::collections::HashSet;
use std::hash::Hash;
use std::mem;

/// Iterate over the nodes of a graph one distance layer at a time.
///
/// The first item produced is every node at distance 1 from `start`, the
/// second every node at distance 2, and so on, until no new nodes can be
/// reached. Each node appears in exactly one layer: the one for the length of
/// its shortest path from `start`. `start` itself is never produced.
///
/// All edges are assumed to have equal cost.
///
/// The graph itself is determined by the `neighbors` function. Given any node,
/// `neighbors` must return an iterator over all its immediate neighbor nodes.
/// Within a layer, nodes appear in the order they were discovered, which
/// depends only on the order in which `neighbors` produces them; callers that
/// need a particular order among equally distant nodes should impose it
/// themselves.
pub fn layers<N, F, I>(start: N, neighbors: F) -> Layers<N, F>
where
    N: Clone + Eq + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    let mut visited = HashSet::new();
    visited.insert(start.clone());

    Layers {
        visited,
        frontier: vec![start],
        neighbors,
    }
}

pub struct Layers<N, F> {
    visited: HashSet<N>,
    frontier: Vec<N>,
    neighbors: F,
}

impl<N, F, I> Iterator for Layers<N, F>
where
    N: Clone + Eq + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    type Item = Vec<N>;

    fn next(&mut self) -> Option<Vec<N>> {
        let frontier = mem::replace(&mut self.frontier, Vec::new());
        let mut layer = Vec::new();
        for node in &frontier {
            for neighbor in (self.neighbors)(node) {
                if self.visited.insert(neighbor.clone()) {
                    layer.push(neighbor);
                }
            }
        }
        if layer.is_empty() {
            return None;
        }
        self.frontier = layer.clone();
        Some(layer)
    }
}
