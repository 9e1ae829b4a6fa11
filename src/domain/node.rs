use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Named positions for the first four child slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Left,
    Right,
    Third,
    Fourth,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Left, Slot::Right, Slot::Third, Slot::Fourth];

    pub fn index(self) -> usize {
        match self {
            Slot::Left => 0,
            Slot::Right => 1,
            Slot::Third => 2,
            Slot::Fourth => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Left => "left",
            Slot::Right => "right",
            Slot::Third => "third",
            Slot::Fourth => "fourth",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a slot position: the slot name for the first four,
/// `#<index>` beyond that.
pub fn slot_label(index: usize) -> String {
    match Slot::from_index(index) {
        Some(slot) => slot.as_str().to_string(),
        None => format!("#{}", index),
    }
}

/// Labeled tree vertex that exclusively owns its children.
///
/// Children live in an ordered sequence of slots. A slot is either populated
/// or absent; every position past the stored sequence is absent, and trailing
/// absent slots are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_slots"
    )]
    children: Vec<Option<Node>>,
}

fn deserialize_slots<'de, D>(deserializer: D) -> Result<Vec<Option<Node>>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut slots = Vec::<Option<Node>>::deserialize(deserializer)?;
    while matches!(slots.last(), Some(None)) {
        slots.pop();
    }
    Ok(slots)
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn unary(name: impl Into<String>, left: impl Into<Option<Node>>) -> Self {
        Self::with_children(name, [left.into()])
    }

    pub fn binary(
        name: impl Into<String>,
        left: impl Into<Option<Node>>,
        right: impl Into<Option<Node>>,
    ) -> Self {
        Self::with_children(name, [left.into(), right.into()])
    }

    pub fn ternary(
        name: impl Into<String>,
        left: impl Into<Option<Node>>,
        right: impl Into<Option<Node>>,
        third: impl Into<Option<Node>>,
    ) -> Self {
        Self::with_children(name, [left.into(), right.into(), third.into()])
    }

    pub fn quaternary(
        name: impl Into<String>,
        left: impl Into<Option<Node>>,
        right: impl Into<Option<Node>>,
        third: impl Into<Option<Node>>,
        fourth: impl Into<Option<Node>>,
    ) -> Self {
        Self::with_children(
            name,
            [left.into(), right.into(), third.into(), fourth.into()],
        )
    }

    /// Build a node from any sequence of slots, in order.
    pub fn with_children(
        name: impl Into<String>,
        slots: impl IntoIterator<Item = Option<Node>>,
    ) -> Self {
        let mut node = Self {
            name: name.into(),
            children: slots.into_iter().collect(),
        };
        node.trim();
        node
    }

    /// Build a node whose slots are all populated.
    pub fn branch(name: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Self {
        Self::with_children(name, children.into_iter().map(Some))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index).and_then(Option::as_ref)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index).and_then(Option::as_mut)
    }

    pub fn slot(&self, slot: Slot) -> Option<&Node> {
        self.child(slot.index())
    }

    pub fn left(&self) -> Option<&Node> {
        self.slot(Slot::Left)
    }

    pub fn right(&self) -> Option<&Node> {
        self.slot(Slot::Right)
    }

    pub fn third(&self) -> Option<&Node> {
        self.slot(Slot::Third)
    }

    pub fn fourth(&self) -> Option<&Node> {
        self.slot(Slot::Fourth)
    }

    /// Store `child` at `index`, returning what was there before.
    ///
    /// Writing past the end pads with absent slots; writing `None` at the end
    /// shrinks the sequence back to its last populated slot.
    pub fn set_child(&mut self, index: usize, child: impl Into<Option<Node>>) -> Option<Node> {
        let child = child.into();
        if index >= self.children.len() {
            if child.is_none() {
                return None;
            }
            self.children.resize_with(index + 1, || None);
        }
        let previous = std::mem::replace(&mut self.children[index], child);
        self.trim();
        previous
    }

    pub fn take_child(&mut self, index: usize) -> Option<Node> {
        self.set_child(index, None)
    }

    /// Append `child` after the last stored slot and return its index.
    pub fn push_child(&mut self, child: Node) -> usize {
        self.children.push(Some(child));
        self.children.len() - 1
    }

    /// Stored slots in order, absent ones included.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Node>> {
        self.children.iter().map(Option::as_ref)
    }

    /// Populated children in slot order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flatten()
    }

    pub fn arity(&self) -> usize {
        self.children.len()
    }

    pub fn degree(&self) -> usize {
        self.children().count()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn trim(&mut self) {
        while matches!(self.children.last(), Some(None)) {
            self.children.pop();
        }
    }
}

// Deep chains would overflow the stack with the derived recursive drop.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Node> = self.children.drain(..).flatten().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..).flatten());
        }
    }
}
