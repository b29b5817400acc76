//! Witness path reconstruction.

use crate::model::*;

/// Rebuilds paths from predecessor chains in a label arena.
///
/// Read-only: the same label can be rebuilt any number of times.
#[derive(Debug, Clone, Copy)]
pub struct PathReconstructor<'a> {
    arena: &'a LabelArena,
}

impl<'a> PathReconstructor<'a> {
    pub fn new(arena: &'a LabelArena) -> Self {
        Self { arena }
    }

    /// Follow predecessors of `id` back to the zero label and return the
    /// route source-first. O(path length).
    pub fn rebuild(&self, id: LabelId) -> Path {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let resources = self.arena.get(id).map(|l| l.resources).unwrap_or_default();

        let mut cursor = self.arena.get(id);
        while let Some(label) = cursor {
            nodes.push(label.node);
            if let Some(edge) = label.via {
                edges.push(edge);
            }
            cursor = label.predecessor.and_then(|p| self.arena.get(p));
        }

        nodes.reverse();
        edges.reverse();
        Path { nodes, edges, resources }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_chain() {
        let mut arena = LabelArena::new();
        let e01 = Edge::new(NodeId(0), NodeId(1), ResourceVector::new(1, 2));
        let e12 = Edge::new(NodeId(1), NodeId(2), ResourceVector::new(3, 4));

        let root = arena.push(Label::root(NodeId(0)));
        let l1 = arena.push(Label {
            node: NodeId(1),
            resources: ResourceVector::new(1, 2),
            predecessor: Some(root),
            via: Some(e01),
        });
        let l2 = arena.push(Label {
            node: NodeId(2),
            resources: ResourceVector::new(4, 6),
            predecessor: Some(l1),
            via: Some(e12),
        });

        let reconstructor = PathReconstructor::new(&arena);
        let path = reconstructor.rebuild(l2);
        assert_eq!(path.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(path.edges, vec![e01, e12]);
        assert_eq!(path.resources, ResourceVector::new(4, 6));
        assert_eq!(path.start(), Some(NodeId(0)));
        assert_eq!(path.end(), Some(NodeId(2)));

        // Rebuilding is repeatable.
        assert_eq!(reconstructor.rebuild(l2), path);
    }

    #[test]
    fn test_rebuild_root() {
        let mut arena = LabelArena::new();
        let root = arena.push(Label::root(NodeId(7)));
        let path = PathReconstructor::new(&arena).rebuild(root);
        assert_eq!(path, Path::single(NodeId(7)));
        assert!(path.is_empty());
    }
}
