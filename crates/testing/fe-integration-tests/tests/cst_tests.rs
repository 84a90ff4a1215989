//! Printing and releasing concrete syntax trees

use expect_test::expect;
use fe_integration_tests::{node, token};
use fe_syntax::{CstNode, SemanticAction, TermKind, delete_cst, print_cst, release_with};

fn scenario_tree() -> CstNode {
    CstNode::new(TermKind::NonTerminal, "", "root")
        .with_child(CstNode::new(TermKind::Terminal, "", "child1"))
        .with_child(
            CstNode::new(TermKind::NonTerminal, "", "child2")
                .with_child(CstNode::new(TermKind::Terminal, "", "grandchild")),
        )
}

#[test]
fn test_print_is_preorder_with_depth_indent() {
    let tree = scenario_tree();
    let mut out = String::new();
    print_cst(&tree, 0, &mut out).unwrap();

    expect![[r#"
        -root
         -child1
         -child2
          -grandchild
    "#]]
    .assert_eq(&out);

    let depths: Vec<_> = tree.preorder().map(|(depth, _)| depth).collect();
    assert_eq!(depths, [0, 1, 1, 2]);
}

#[test]
fn test_release_frees_children_in_order_before_parent() {
    let mut order = Vec::new();
    let released = release_with(scenario_tree(), |node| order.push(node.symbol().to_string()));

    assert_eq!(released, 4);
    assert_eq!(order, ["child1", "grandchild", "child2", "root"]);
}

#[test]
fn test_print_then_delete_touch_every_node_once() {
    let mut sparse = CstNode::new(TermKind::NonTerminal, "", "list");
    for (family_pos, text) in [(0, "a"), (3, ""), (7, "c"), (8, "")] {
        let mut item = CstNode::new(TermKind::Terminal, text, "item");
        item.set_family_pos(family_pos);
        sparse.push_child(item);
    }
    let tree = node("program", [sparse, token("identifier", "", 2, 1)]);

    let printed = tree.dump();
    assert_eq!(printed.lines().count(), tree.node_count());
    assert_eq!(printed.matches("-item").count(), 4);

    let mut visits = 0;
    let released = release_with(tree, |_| visits += 1);
    assert_eq!(released, 7);
    assert_eq!(visits, 7);
}

#[test]
fn test_delete_of_nothing_is_a_no_op() {
    assert_eq!(delete_cst(None), 0);
    assert_eq!(delete_cst(Some(scenario_tree())), 4);
}

#[test]
fn test_declaration_tree_dump() {
    let mut function = node(
        "function_definition",
        [
            token("type_specifier", "int", 1, 1),
            token("identifier", "main", 1, 5),
            node("parameter_list", []),
            node(
                "compound_statement",
                [node(
                    "declaration",
                    [token("type_specifier", "int", 2, 5), token("identifier", "x", 2, 9)],
                )],
            ),
        ],
    );
    function.set_action(SemanticAction::Named("define_function".to_string()));
    let unit = node("translation_unit", [function]);

    expect![[r#"
        -translation_unit
         -function_definition
          -type_specifier 'int'
          -identifier 'main'
          -parameter_list
          -compound_statement
           -declaration
            -type_specifier 'int'
            -identifier 'x'
    "#]]
    .assert_eq(&unit.to_string());

    let function = &unit.children()[0];
    assert_eq!(function.action().to_string(), "define_function");
    assert_eq!(function.children()[3].family_pos(), 3);
    assert_eq!(
        function.children()[1].location().map(|location| location.to_string()),
        Some("1:5".to_string())
    );
}
