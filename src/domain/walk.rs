use crate::domain::node::Node;

/// Pre-order iterator over a [`Node`] tree, yielding `(depth, node)`.
///
/// Children are visited in slot order; absent slots are skipped.
pub struct Preorder<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // Reversed so that the left-most child is popped first
        let children: Vec<&Node> = node.children().collect();
        self.stack
            .extend(children.into_iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

impl Node {
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(0, self)],
        }
    }

    /// Number of nodes in the tree, root included.
    pub fn size(&self) -> usize {
        self.preorder().count()
    }

    /// Length of the longest downward path; a lone node has height 0.
    pub fn height(&self) -> usize {
        self.preorder().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    pub fn leaf_count(&self) -> usize {
        self.preorder().filter(|(_, node)| node.is_leaf()).count()
    }

    /// First node in pre-order matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&Node) -> bool) -> Option<&Node> {
        self.preorder()
            .map(|(_, node)| node)
            .find(|node| predicate(node))
    }
}
