//! Arena-backed configuration item trees.
//!
//! Editors shuffle nested item structures around constantly. The tree keeps
//! a flat arena with parent/children index lists and an id lookup map, so
//! structural edits never chase a recursive object graph.

use ahash::AHashMap;

/// Anything storable in an [`ItemTree`]: items carry a stable string id.
pub trait TreeItem {
    fn id(&self) -> &str;
}

/// The nested rendition of a tree, used at the serialization boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedItem<T> {
    pub item: T,
    pub children: Vec<NestedItem<T>>,
}

impl<T> NestedItem<T> {
    pub fn leaf(item: T) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }
}

struct Node<T> {
    item: T,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// A flat arena of items with an id index.
///
/// Removed slots become tombstones; the id index is the authority on what
/// is alive.
pub struct ItemTree<T> {
    nodes: Vec<Option<Node<T>>>,
    roots: Vec<usize>,
    index: AHashMap<String, usize>,
}

impl<T> Default for ItemTree<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            index: AHashMap::new(),
        }
    }
}

impl<T: TreeItem> ItemTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from its nested rendition. Items with a duplicate id
    /// are dropped.
    pub fn from_nested(nested: Vec<NestedItem<T>>) -> Self {
        let mut tree = Self::new();
        for root in nested {
            tree.insert_nested(None, root);
        }
        tree
    }

    fn insert_nested(&mut self, parent: Option<usize>, nested: NestedItem<T>) {
        let id = nested.item.id().to_string();
        if self.index.contains_key(&id) {
            return;
        }
        let slot = self.insert_node(parent, nested.item);
        for child in nested.children {
            self.insert_nested(Some(slot), child);
        }
    }

    fn insert_node(&mut self, parent: Option<usize>, item: T) -> usize {
        let slot = self.nodes.len();
        self.index.insert(item.id().to_string(), slot);
        self.nodes.push(Some(Node {
            item,
            parent,
            children: Vec::new(),
        }));
        match parent {
            Some(p) => {
                if let Some(Some(node)) = self.nodes.get_mut(p) {
                    node.children.push(slot);
                }
            }
            None => self.roots.push(slot),
        }
        slot
    }

    /// Adds an item under `parent_id`, or at the root when the parent is
    /// absent or unknown. Returns `false` when the id is already taken.
    pub fn add(&mut self, parent_id: Option<&str>, item: T) -> bool {
        if self.index.contains_key(item.id()) {
            return false;
        }
        let parent = parent_id.and_then(|id| self.index.get(id).copied());
        self.insert_node(parent, item);
        true
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        let slot = *self.index.get(id)?;
        self.nodes[slot].as_ref().map(|n| &n.item)
    }

    /// Applies an edit to the item with the given id.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut T)) -> bool {
        let Some(&slot) = self.index.get(id) else {
            return false;
        };
        match self.nodes[slot].as_mut() {
            Some(node) => {
                f(&mut node.item);
                true
            }
            None => false,
        }
    }

    /// Removes an item and every descendant.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(&slot) = self.index.get(id) else {
            return false;
        };

        let parent = self.nodes[slot].as_ref().and_then(|n| n.parent);
        match parent {
            Some(p) => {
                if let Some(Some(node)) = self.nodes.get_mut(p) {
                    node.children.retain(|&c| c != slot);
                }
            }
            None => self.roots.retain(|&r| r != slot),
        }

        let mut pending = vec![slot];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes[current].take() {
                self.index.remove(node.item.id());
                pending.extend(node.children);
            }
        }
        true
    }

    /// Re-parents an item, inserting it at `position` among its new
    /// siblings. Moving an item under itself or one of its descendants is
    /// rejected, as is an unknown target parent.
    pub fn move_to(&mut self, id: &str, new_parent: Option<&str>, position: usize) -> bool {
        let Some(&slot) = self.index.get(id) else {
            return false;
        };
        let target = match new_parent {
            Some(pid) => match self.index.get(pid) {
                Some(&p) => Some(p),
                None => return false,
            },
            None => None,
        };
        if let Some(target) = target {
            if target == slot || self.is_descendant(target, slot) {
                return false;
            }
        }

        let old_parent = self.nodes[slot].as_ref().and_then(|n| n.parent);
        match old_parent {
            Some(p) => {
                if let Some(Some(node)) = self.nodes.get_mut(p) {
                    node.children.retain(|&c| c != slot);
                }
            }
            None => self.roots.retain(|&r| r != slot),
        }

        if let Some(node) = self.nodes[slot].as_mut() {
            node.parent = target;
        }
        let siblings = match target {
            Some(p) => match self.nodes[p].as_mut() {
                Some(node) => &mut node.children,
                None => return false,
            },
            None => &mut self.roots,
        };
        siblings.insert(position.min(siblings.len()), slot);
        true
    }

    fn is_descendant(&self, candidate: usize, ancestor: usize) -> bool {
        let mut current = self.nodes[candidate].as_ref().and_then(|n| n.parent);
        while let Some(slot) = current {
            if slot == ancestor {
                return true;
            }
            current = self.nodes[slot].as_ref().and_then(|n| n.parent);
        }
        false
    }

    /// Depth-first traversal in document order.
    pub fn flatten(&self) -> Vec<&T> {
        let mut result = Vec::with_capacity(self.index.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(slot) = stack.pop() {
            if let Some(node) = self.nodes[slot].as_ref() {
                result.push(&node.item);
                stack.extend(node.children.iter().rev());
            }
        }
        result
    }

    pub fn children_of(&self, id: &str) -> Vec<&T> {
        let Some(&slot) = self.index.get(id) else {
            return Vec::new();
        };
        match self.nodes[slot].as_ref() {
            Some(node) => node
                .children
                .iter()
                .filter_map(|&c| self.nodes[c].as_ref().map(|n| &n.item))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<T: TreeItem + Clone> ItemTree<T> {
    /// Rebuilds the nested rendition.
    pub fn to_nested(&self) -> Vec<NestedItem<T>> {
        self.roots
            .iter()
            .filter_map(|&slot| self.build_nested(slot))
            .collect()
    }

    fn build_nested(&self, slot: usize) -> Option<NestedItem<T>> {
        let node = self.nodes[slot].as_ref()?;
        Some(NestedItem {
            item: node.item.clone(),
            children: node
                .children
                .iter()
                .filter_map(|&c| self.build_nested(c))
                .collect(),
        })
    }
}
