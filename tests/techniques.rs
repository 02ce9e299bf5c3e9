use matwork::techniques::{NodeKind, TechniqueNode, TechniqueTreeData};

fn node(id: &str, status: Option<&str>, children: Vec<TechniqueNode>) -> TechniqueNode {
    TechniqueNode {
        id: id.to_string(),
        title: id.to_string(),
        status: status.map(str::to_string),
        children,
        ..Default::default()
    }
}

#[test]
fn test_count_empty_tree() {
    let data = TechniqueTreeData::default();
    assert_eq!(data.technique_count(), 0);
}

#[test]
fn test_count_structural_nodes_do_not_count() {
    // Categories and subcategories carry no status
    let data = TechniqueTreeData {
        version: 1,
        tree: vec![node("guard", None, vec![node("closed-guard", None, vec![])])],
    };
    assert_eq!(data.technique_count(), 0);
}

#[test]
fn test_count_single_technique() {
    let data = TechniqueTreeData {
        version: 1,
        tree: vec![node(
            "guard",
            None,
            vec![node("closed-guard", None, vec![node("armbar", Some("active"), vec![])])],
        )],
    };
    assert_eq!(data.technique_count(), 1);
}

#[test]
fn test_count_status_node_with_children_counts_itself_and_children() {
    // A technique can have technique children; both levels count
    let parent = node(
        "armbar",
        Some("active"),
        vec![
            node("armbar-from-mount", Some("active"), vec![]),
            node("armbar-setups", None, vec![node("deep", Some("drilling"), vec![])]),
        ],
    );
    assert_eq!(parent.technique_count(), 3);
}

#[test]
fn test_count_deep_tree() {
    // Depth 4 nesting, statuses scattered across levels
    let leaf = node("d4", Some("active"), vec![]);
    let d3 = node("d3", Some("active"), vec![leaf]);
    let d2 = node("d2", None, vec![d3]);
    let d1 = node("d1", None, vec![d2]);
    let data = TechniqueTreeData {
        version: 1,
        tree: vec![node("d0", None, vec![d1])],
    };
    assert_eq!(data.technique_count(), 2);
}

#[test]
fn test_node_kind_by_depth() {
    assert_eq!(NodeKind::classify(0, true, false), NodeKind::Category);
    assert_eq!(NodeKind::classify(0, false, true), NodeKind::Category);
    assert_eq!(NodeKind::classify(1, true, false), NodeKind::Subcategory);
    assert_eq!(NodeKind::classify(3, true, false), NodeKind::Leaf);
}

#[test]
fn test_node_kind_depth_two() {
    // Children and no status make a grouping heading
    assert_eq!(NodeKind::classify(2, true, false), NodeKind::Group);
    // A status-bearing node stays a leaf even with children
    assert_eq!(NodeKind::classify(2, true, true), NodeKind::Leaf);
    assert_eq!(NodeKind::classify(2, false, false), NodeKind::Leaf);
    assert_eq!(NodeKind::classify(2, false, true), NodeKind::Leaf);
}

#[test]
fn test_subcategories_lookup() {
    let data = TechniqueTreeData {
        version: 1,
        tree: vec![
            node("guard", None, vec![node("closed-guard", None, vec![]), node("open-guard", None, vec![])]),
            node("mount", None, vec![]),
        ],
    };
    assert_eq!(data.subcategories("guard").len(), 2);
    assert!(data.subcategories("mount").is_empty());
    assert!(data.subcategories("unknown").is_empty());
    assert_eq!(data.category("mount").unwrap().title, "mount");
}

#[test]
fn test_sparse_payload_deserialization() {
    // Nodes in server payloads often omit the collections entirely
    let payload = r#"
    {
        "version": 3,
        "tree": [
            {
                "id": "guard",
                "title": "Guard",
                "children": [
                    {
                        "id": "armbar",
                        "title": "Armbar",
                        "status": "active",
                        "notes": "From closed guard",
                        "resources": [
                            {"url": "https://example.org/armbar", "seed_title": "Armbar study"}
                        ]
                    }
                ]
            }
        ]
    }"#;

    let data: TechniqueTreeData = serde_json::from_str(payload).unwrap();
    assert_eq!(data.version, 3);
    assert_eq!(data.technique_count(), 1);

    let armbar = &data.tree[0].children[0];
    assert_eq!(armbar.status.as_deref(), Some("active"));
    assert!(armbar.media.is_empty());
    assert!(armbar.children.is_empty());
    assert_eq!(armbar.resources[0].seed_title.as_deref(), Some("Armbar study"));
    assert!(armbar.resources[0].source.is_none());
}
