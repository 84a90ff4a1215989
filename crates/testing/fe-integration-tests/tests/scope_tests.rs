//! Scope and declaration behavior across the decl model

use fe_arena::Arena;
use fe_decl::{
    AsNamedDecl, Decl, DeclContext, DeclError, EnumDecl, ExprIdInner, FunctionDecl, GlobalContext,
    IndexedItem, ScopeError, ShadowPolicy, TranslationUnitDecl, VarDecl,
};
use fe_integration_tests::TypeFixture;

#[test]
fn test_global_redeclaration_keeps_first_type() {
    let types = TypeFixture::new();
    let mut globals = GlobalContext::new();

    assert_eq!(globals.add_symbol("x", types.int), Ok(()));
    assert!(matches!(
        globals.add_symbol("x", types.float),
        Err(ScopeError::DuplicateDeclaration { .. })
    ));
    assert_eq!(globals.check_symbol("x"), Some(types.int));
}

#[test]
fn test_function_scope_lookup_crosses_nested_tables() {
    let types = TypeFixture::new();
    let mut function = FunctionDecl::new("main", types.int);
    let scope = function.scope_mut();

    scope.push_symbol_table();
    assert_eq!(scope.add_symbol("y", types.int), Ok(()));
    scope.push_symbol_table();
    assert_eq!(scope.lookup_symbol("y"), Some(types.int));
    assert!(scope.pop_current_symbol_table().is_ok());
    assert_eq!(scope.lookup_symbol("y"), Some(types.int));
}

#[test]
fn test_enumerator_access_and_update() {
    let mut exprs = Arena::new();
    let expr0 = exprs.alloc(ExprIdInner);
    let expr1 = exprs.alloc(ExprIdInner);

    let mut letters = EnumDecl::new("letters");
    letters.add_enumerator("A", None);
    letters.add_enumerator("B", Some(expr1));

    let first = letters.enumerator(0).unwrap();
    assert_eq!((first.name.as_str(), first.value), ("A", None));

    letters.set_enumerator_expr(0, expr0).unwrap();
    let first = letters.enumerator(0).unwrap();
    assert_eq!((first.name.as_str(), first.value), ("A", Some(expr0)));

    assert_eq!(
        letters.enumerator(2),
        Err(DeclError::IndexOutOfRange {
            what: IndexedItem::Enumerator,
            index: 2,
            len: 2,
        })
    );
}

#[test]
fn test_inner_redeclaration_rejected_under_default_policy() {
    let types = TypeFixture::new();
    let mut scope = DeclContext::new();
    assert_eq!(scope.policy(), ShadowPolicy::RejectIfVisible);

    scope.push_symbol_table();
    assert_eq!(scope.add_symbol("n", types.int), Ok(()));
    scope.push_symbol_table();
    assert!(scope.add_symbol("n", types.character).is_err());
    assert_eq!(scope.lookup_symbol("n"), Some(types.int));

    scope.set_policy(ShadowPolicy::RejectInCurrentScope);
    assert_eq!(scope.add_symbol("n", types.character), Ok(()));
    assert_eq!(scope.lookup_symbol("n"), Some(types.character));
}

#[test]
fn test_translation_unit_owns_globals_and_functions() {
    let types = TypeFixture::new();
    let mut unit = TranslationUnitDecl::new();
    let context = unit.context_mut();
    context.add_decl(VarDecl::new("counter", types.int));
    context.add_decl(FunctionDecl::new("tick", types.void));
    assert_eq!(context.add_symbol("counter", types.int), Ok(()));

    let decl = Decl::from(unit);
    assert!(decl.is_scope());
    assert_eq!(decl.name(), None);
    let globals = decl.global_context().unwrap();
    let names: Vec<_> = globals.decls().iter().filter_map(Decl::name).collect();
    assert_eq!(names, ["counter", "tick"]);
    assert!(globals.decl(1).unwrap().is_scope());

    let mut renamed = VarDecl::new("old", types.float);
    renamed.set_name("new");
    assert_eq!(renamed.name(), "new");
}
