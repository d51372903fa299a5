//! End-to-end visibility behavior of restricted imports.
//!
//! Checks that a construct's restricted import of a module is usable from
//! the construct's own body and invisible everywhere else: derived
//! constructs, nested constructs, and siblings under multiple inheritance.

use nameres::base::DeclId;
use nameres::sema::{
    DeclKind, ImportVisibility, LookupResult, Resolver, ScopeTree, resolve_import,
};

/// Declarations of one populated module: `value`, `func`, `Helper`.
struct ModuleDecls {
    value: DeclId,
    func: DeclId,
    helper: DeclId,
}

/// Build a module with a value, a function, and a type, like the `A` and
/// `B` namespaces of the scenario under test.
fn populated_module(tree: &mut ScopeTree, name: &str) -> ModuleDecls {
    let scope = tree.add_module(tree.root(), name).unwrap();
    ModuleDecls {
        value: tree.declare(scope, "value", DeclKind::Value).unwrap(),
        func: tree.declare(scope, "func", DeclKind::Function).unwrap(),
        helper: tree.declare(scope, "Helper", DeclKind::Type).unwrap(),
    }
}

#[test]
fn import_visible_in_own_method_body() {
    let mut tree = ScopeTree::new();
    let a = populated_module(&mut tree, "A");

    let construct = tree.add_construct(tree.root(), "TestClassPrivate", &[]).unwrap();
    resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();
    let body = tree.add_block(construct);

    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(body, "value"), LookupResult::Found(a.value));
    assert_eq!(resolver.lookup(body, "func"), LookupResult::Found(a.func));
    assert_eq!(
        resolver.lookup_type(body, "Helper"),
        LookupResult::Found(a.helper)
    );
}

#[test]
fn import_visible_at_construct_scope_itself() {
    let mut tree = ScopeTree::new();
    let a = populated_module(&mut tree, "A");

    let construct = tree.add_construct(tree.root(), "X", &[]).unwrap();
    resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();

    // Reference point directly at construct scope, not inside a body
    let resolver = Resolver::new(&tree);
    assert_eq!(
        resolver.lookup(construct, "value"),
        LookupResult::Found(a.value)
    );
}

#[test]
fn derived_does_not_see_base_import() {
    let mut tree = ScopeTree::new();
    populated_module(&mut tree, "A");

    let base = tree.add_construct(tree.root(), "TestClassPrivate", &[]).unwrap();
    resolve_import(&mut tree, base, "A", ImportVisibility::Restricted).unwrap();

    let derived = tree
        .add_construct(tree.root(), "DerivedAccessTest", &[base])
        .unwrap();
    let body = tree.add_block(derived);

    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(body, "value"), LookupResult::NotFound);
    assert_eq!(resolver.lookup(body, "func"), LookupResult::NotFound);
    assert_eq!(resolver.lookup_type(body, "Helper"), LookupResult::NotFound);
}

#[test]
fn derived_own_import_shadows_base_import_entirely() {
    let mut tree = ScopeTree::new();
    populated_module(&mut tree, "A");
    let b = populated_module(&mut tree, "B");

    let base = tree.add_construct(tree.root(), "TestClassPrivate", &[]).unwrap();
    resolve_import(&mut tree, base, "A", ImportVisibility::Restricted).unwrap();

    let derived = tree
        .add_construct(tree.root(), "DerivedFromPrivate", &[base])
        .unwrap();
    resolve_import(&mut tree, derived, "B", ImportVisibility::Restricted).unwrap();
    let body = tree.add_block(derived);

    // Resolution reflects the derived construct's own import, never A's.
    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(body, "value"), LookupResult::Found(b.value));
    assert_eq!(resolver.lookup(body, "func"), LookupResult::Found(b.func));
    assert_eq!(
        resolver.lookup_type(body, "Helper"),
        LookupResult::Found(b.helper)
    );
}

#[test]
fn multiple_inheritance_sees_neither_sibling_import() {
    let mut tree = ScopeTree::new();
    let a = populated_module(&mut tree, "A");
    let b = populated_module(&mut tree, "B");

    let base1 = tree.add_construct(tree.root(), "Base1", &[]).unwrap();
    resolve_import(&mut tree, base1, "A", ImportVisibility::Restricted).unwrap();
    let base2 = tree.add_construct(tree.root(), "Base2", &[]).unwrap();
    resolve_import(&mut tree, base2, "B", ImportVisibility::Restricted).unwrap();

    let multi = tree
        .add_construct(tree.root(), "MultiDerived", &[base1, base2])
        .unwrap();
    let body = tree.add_block(multi);

    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(body, "value"), LookupResult::NotFound);
    assert_eq!(resolver.lookup(body, "func"), LookupResult::NotFound);

    // Each base still sees its own import from its own scope.
    assert_eq!(resolver.lookup(base1, "value"), LookupResult::Found(a.value));
    assert_eq!(resolver.lookup(base2, "value"), LookupResult::Found(b.value));
}

#[test]
fn nested_construct_does_not_see_outer_import() {
    let mut tree = ScopeTree::new();
    let a = populated_module(&mut tree, "A");

    let outer = tree.add_construct(tree.root(), "Outer", &[]).unwrap();
    resolve_import(&mut tree, outer, "A", ImportVisibility::Restricted).unwrap();

    let inner = tree.add_construct(outer, "Inner", &[]).unwrap();
    let inner_body = tree.add_block(inner);
    let outer_body = tree.add_block(outer);

    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(inner_body, "value"), LookupResult::NotFound);
    assert_eq!(
        resolver.lookup(outer_body, "value"),
        LookupResult::Found(a.value)
    );
}

#[test]
fn own_member_shadows_import() {
    let mut tree = ScopeTree::new();
    populated_module(&mut tree, "A");

    let construct = tree.add_construct(tree.root(), "X", &[]).unwrap();
    resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();
    let member = tree.declare(construct, "value", DeclKind::Value).unwrap();
    let body = tree.add_block(construct);

    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(body, "value"), LookupResult::Found(member));
}

#[test]
fn import_shadows_inherited_member() {
    let mut tree = ScopeTree::new();
    let a = populated_module(&mut tree, "A");

    let base = tree.add_construct(tree.root(), "Base", &[]).unwrap();
    tree.declare(base, "value", DeclKind::Value).unwrap();

    let derived = tree.add_construct(tree.root(), "Derived", &[base]).unwrap();
    resolve_import(&mut tree, derived, "A", ImportVisibility::Restricted).unwrap();
    let body = tree.add_block(derived);

    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(body, "value"), LookupResult::Found(a.value));
}

#[test]
fn inherited_ordinary_members_still_resolve() {
    let mut tree = ScopeTree::new();
    populated_module(&mut tree, "A");

    let base = tree.add_construct(tree.root(), "Base", &[]).unwrap();
    resolve_import(&mut tree, base, "A", ImportVisibility::Restricted).unwrap();
    let member = tree.declare(base, "ordinary", DeclKind::Value).unwrap();

    let derived = tree.add_construct(tree.root(), "Derived", &[base]).unwrap();
    let body = tree.add_block(derived);

    // The import is hidden from the derived construct, the ordinary
    // member is not.
    let resolver = Resolver::new(&tree);
    assert_eq!(
        resolver.lookup(body, "ordinary"),
        LookupResult::Found(member)
    );
    assert_eq!(resolver.lookup(body, "value"), LookupResult::NotFound);
}

#[test]
fn same_member_in_two_bases_is_ambiguous() {
    let mut tree = ScopeTree::new();

    let base1 = tree.add_construct(tree.root(), "Base1", &[]).unwrap();
    let m1 = tree.declare(base1, "shared", DeclKind::Value).unwrap();
    let base2 = tree.add_construct(tree.root(), "Base2", &[]).unwrap();
    let m2 = tree.declare(base2, "shared", DeclKind::Value).unwrap();

    let multi = tree
        .add_construct(tree.root(), "MultiDerived", &[base1, base2])
        .unwrap();
    let body = tree.add_block(multi);

    let resolver = Resolver::new(&tree);
    match resolver.lookup(body, "shared") {
        LookupResult::Ambiguous(candidates) => {
            assert!(candidates.contains(&m1));
            assert!(candidates.contains(&m2));
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[test]
fn two_imports_supplying_same_name_are_ambiguous() {
    let mut tree = ScopeTree::new();
    let a = populated_module(&mut tree, "A");
    let b = populated_module(&mut tree, "B");

    let construct = tree.add_construct(tree.root(), "X", &[]).unwrap();
    resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();
    resolve_import(&mut tree, construct, "B", ImportVisibility::Restricted).unwrap();
    let body = tree.add_block(construct);

    let resolver = Resolver::new(&tree);
    match resolver.lookup(body, "value") {
        LookupResult::Ambiguous(candidates) => {
            assert_eq!(candidates, vec![a.value, b.value]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[test]
fn reattaching_same_directive_is_idempotent() {
    let mut tree = ScopeTree::new();
    let a = populated_module(&mut tree, "A");

    let construct = tree.add_construct(tree.root(), "X", &[]).unwrap();
    resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();
    resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();
    let body = tree.add_block(construct);

    // Edge bookkeeping may differ, lookup outcomes may not.
    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(body, "value"), LookupResult::Found(a.value));
    assert_eq!(resolver.lookup(body, "func"), LookupResult::Found(a.func));
}

#[test]
fn module_scope_reference_does_not_use_construct_imports() {
    let mut tree = ScopeTree::new();
    populated_module(&mut tree, "A");

    let construct = tree.add_construct(tree.root(), "X", &[]).unwrap();
    resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();

    // A reference written at module scope, outside any construct
    let resolver = Resolver::new(&tree);
    assert_eq!(
        resolver.lookup(tree.root(), "value"),
        LookupResult::NotFound
    );
}

#[test]
fn overloaded_functions_bind_through_import() {
    let mut tree = ScopeTree::new();
    let module = tree.add_module(tree.root(), "A").unwrap();
    let f1 = tree.declare(module, "func", DeclKind::Function).unwrap();
    tree.declare(module, "func", DeclKind::Function).unwrap();

    let construct = tree.add_construct(tree.root(), "X", &[]).unwrap();
    resolve_import(&mut tree, construct, "A", ImportVisibility::Restricted).unwrap();
    let body = tree.add_block(construct);

    // The overload set binds as a unit, represented by its lead declaration.
    let resolver = Resolver::new(&tree);
    assert_eq!(resolver.lookup(body, "func"), LookupResult::Found(f1));
}
