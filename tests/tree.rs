//! Tests for the arena-backed configuration item tree.
mod common;
use keisei::tree::{ItemTree, NestedItem, TreeItem};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    id: String,
    label: String,
}

impl Entry {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

impl TreeItem for Entry {
    fn id(&self) -> &str {
        &self.id
    }
}

fn sample_tree() -> ItemTree<Entry> {
    // root
    // |- branch
    // |  |- leaf-a
    // |  |- leaf-b
    // |- aside
    let mut tree = ItemTree::new();
    assert!(tree.add(None, Entry::new("root", "Root")));
    assert!(tree.add(Some("root"), Entry::new("branch", "Branch")));
    assert!(tree.add(Some("branch"), Entry::new("leaf-a", "Leaf A")));
    assert!(tree.add(Some("branch"), Entry::new("leaf-b", "Leaf B")));
    assert!(tree.add(Some("root"), Entry::new("aside", "Aside")));
    tree
}

#[test]
fn test_add_and_lookup() {
    let tree = sample_tree();

    assert_eq!(tree.len(), 5);
    assert!(!tree.is_empty());
    assert_eq!(tree.get("leaf-a").expect("present").label, "Leaf A");
    assert!(tree.get("unknown").is_none());
}

#[test]
fn test_duplicate_id_is_rejected() {
    let mut tree = sample_tree();
    assert!(!tree.add(None, Entry::new("root", "Impostor")));
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.get("root").expect("present").label, "Root");
}

#[test]
fn test_unknown_parent_lands_at_the_root() {
    let mut tree = sample_tree();
    assert!(tree.add(Some("no-such-parent"), Entry::new("stray", "Stray")));

    let order: Vec<_> = tree.flatten().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order.last(), Some(&"stray"));
}

#[test]
fn test_flatten_is_document_order() {
    let tree = sample_tree();
    let order: Vec<_> = tree.flatten().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["root", "branch", "leaf-a", "leaf-b", "aside"]);
}

#[test]
fn test_children_of() {
    let tree = sample_tree();
    let children: Vec<_> = tree
        .children_of("branch")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(children, vec!["leaf-a", "leaf-b"]);
    assert!(tree.children_of("leaf-a").is_empty());
    assert!(tree.children_of("unknown").is_empty());
}

#[test]
fn test_update_edits_in_place() {
    let mut tree = sample_tree();
    assert!(tree.update("leaf-a", |e| e.label = "Renamed".to_string()));
    assert_eq!(tree.get("leaf-a").expect("present").label, "Renamed");
    assert!(!tree.update("unknown", |e| e.label.clear()));
}

#[test]
fn test_remove_cascades_to_descendants() {
    let mut tree = sample_tree();
    assert!(tree.remove("branch"));

    assert_eq!(tree.len(), 2);
    assert!(tree.get("branch").is_none());
    assert!(tree.get("leaf-a").is_none());
    assert!(tree.get("leaf-b").is_none());

    let order: Vec<_> = tree.flatten().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["root", "aside"]);

    assert!(!tree.remove("branch"));
}

#[test]
fn test_removed_ids_can_be_reused() {
    let mut tree = sample_tree();
    assert!(tree.remove("leaf-a"));
    assert!(tree.add(Some("aside"), Entry::new("leaf-a", "Reborn")));
    assert_eq!(tree.get("leaf-a").expect("present").label, "Reborn");
}

#[test]
fn test_move_between_parents() {
    let mut tree = sample_tree();
    assert!(tree.move_to("leaf-b", Some("aside"), 0));

    let children: Vec<_> = tree
        .children_of("aside")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(children, vec!["leaf-b"]);

    let children: Vec<_> = tree
        .children_of("branch")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(children, vec!["leaf-a"]);
}

#[test]
fn test_move_position_is_clamped() {
    let mut tree = sample_tree();
    assert!(tree.move_to("aside", Some("branch"), 99));

    let children: Vec<_> = tree
        .children_of("branch")
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(children, vec!["leaf-a", "leaf-b", "aside"]);
}

#[test]
fn test_move_rejects_cycles_and_unknown_targets() {
    let mut tree = sample_tree();

    // Under itself.
    assert!(!tree.move_to("branch", Some("branch"), 0));
    // Under its own descendant.
    assert!(!tree.move_to("branch", Some("leaf-a"), 0));
    // Unknown target parent.
    assert!(!tree.move_to("branch", Some("nowhere"), 0));
    // Unknown item.
    assert!(!tree.move_to("nowhere", None, 0));

    let order: Vec<_> = tree.flatten().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["root", "branch", "leaf-a", "leaf-b", "aside"]);
}

#[test]
fn test_move_to_root() {
    let mut tree = sample_tree();
    assert!(tree.move_to("branch", None, 0));

    let order: Vec<_> = tree.flatten().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["branch", "leaf-a", "leaf-b", "root", "aside"]);
}

#[test]
fn test_nested_round_trip() {
    let nested = vec![NestedItem {
        item: Entry::new("root", "Root"),
        children: vec![
            NestedItem {
                item: Entry::new("branch", "Branch"),
                children: vec![NestedItem::leaf(Entry::new("leaf-a", "Leaf A"))],
            },
            NestedItem::leaf(Entry::new("aside", "Aside")),
        ],
    }];

    let tree = ItemTree::from_nested(nested.clone());
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.to_nested(), nested);
}

#[test]
fn test_from_nested_drops_duplicate_ids() {
    let nested = vec![
        NestedItem::leaf(Entry::new("a", "First")),
        NestedItem::leaf(Entry::new("a", "Second")),
    ];

    let tree = ItemTree::from_nested(nested);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get("a").expect("present").label, "First");
}
