use super::*;
use crate::symbols::SymbolAllocator;
use jfir_common::Name;

fn key(owner: &str, name: &str) -> TypeParameterKey {
    TypeParameterKey::new(owner, name)
}

#[test]
fn test_get_returns_registered_symbol() {
    let allocator = SymbolAllocator::new();
    let stack = TypeParameterStack::new();
    let t = allocator.type_parameter_symbol(Name::new("T"));
    stack.add_parameter(&key("p/A", "T"), t.clone());
    assert_eq!(stack.get(&key("p/A", "T")), Ok(t));
}

#[test]
fn test_get_unknown_parameter_fails_with_its_name() {
    let stack = TypeParameterStack::new();
    let error = stack.get(&key("p/A", "U")).unwrap_err();
    assert_eq!(
        error,
        InteropError::UnknownTypeParameter {
            parameter: "U@p/A".to_string()
        }
    );
}

#[test]
fn test_same_name_different_owner_is_distinct() {
    let allocator = SymbolAllocator::new();
    let stack = TypeParameterStack::new();
    stack.add_parameter(&key("p/A", "T"), allocator.type_parameter_symbol(Name::new("T")));
    assert!(stack.get(&key("p/B", "T")).is_err());
}

#[test]
fn test_add_parameter_last_write_wins() {
    let allocator = SymbolAllocator::new();
    let stack = TypeParameterStack::new();
    let first = allocator.type_parameter_symbol(Name::new("T"));
    let second = allocator.type_parameter_symbol(Name::new("T"));
    stack.add_parameter(&key("p/A", "T"), first);
    stack.add_parameter(&key("p/A", "T"), second.clone());
    assert_eq!(stack.get(&key("p/A", "T")), Ok(second));
    assert_eq!(stack.len(), 1);
}

#[test]
fn test_add_stack_keeps_existing_entries() {
    let allocator = SymbolAllocator::new();
    let outer = TypeParameterStack::new();
    let inner = TypeParameterStack::new();
    let outer_t = allocator.type_parameter_symbol(Name::new("T"));
    let outer_u = allocator.type_parameter_symbol(Name::new("U"));
    let inner_t = allocator.type_parameter_symbol(Name::new("T"));
    outer.add_parameter(&key("p/Outer", "T"), outer_t);
    outer.add_parameter(&key("p/Outer", "U"), outer_u.clone());
    inner.add_parameter(&key("p/Outer", "T"), inner_t.clone());

    inner.add_stack(&outer);
    assert_eq!(inner.get(&key("p/Outer", "T")), Ok(inner_t));
    assert_eq!(inner.get(&key("p/Outer", "U")), Ok(outer_u));

    let replacement = allocator.type_parameter_symbol(Name::new("T"));
    inner.add_parameter(&key("p/Outer", "T"), replacement.clone());
    assert_eq!(inner.get(&key("p/Outer", "T")), Ok(replacement));
}

#[test]
fn test_every_registered_parameter_resolves_transitively() {
    let allocator = SymbolAllocator::new();
    let grand = TypeParameterStack::new();
    let parent = TypeParameterStack::new();
    let child = TypeParameterStack::new();
    let mut expected = Vec::new();
    for (stack, owner) in [(&grand, "p/G"), (&parent, "p/G.P"), (&child, "p/G.P.C")] {
        for name in ["A", "B"] {
            let symbol = allocator.type_parameter_symbol(Name::new(name));
            stack.add_parameter(&key(owner, name), symbol.clone());
            expected.push((key(owner, name), symbol));
        }
    }
    parent.add_stack(&grand);
    child.add_stack(&parent);

    for (parameter, symbol) in &expected {
        assert_eq!(child.get(parameter).as_ref(), Ok(symbol));
    }
    assert_eq!(child.iter().count(), expected.len());
    assert!(child.get(&key("p/Other", "A")).is_err());
}

#[test]
fn test_snapshot_is_independent() {
    let allocator = SymbolAllocator::new();
    let stack = TypeParameterStack::new();
    stack.add_parameter(&key("p/A", "T"), allocator.type_parameter_symbol(Name::new("T")));
    let copy = stack.snapshot();
    copy.add_parameter(&key("p/A", "U"), allocator.type_parameter_symbol(Name::new("U")));
    assert!(copy.contains(&key("p/A", "T")));
    assert!(!stack.contains(&key("p/A", "U")));
}

#[test]
fn test_add_stack_to_itself_is_noop() {
    let allocator = SymbolAllocator::new();
    let stack = TypeParameterStack::new();
    stack.add_parameter(&key("p/A", "T"), allocator.type_parameter_symbol(Name::new("T")));
    stack.add_stack(&stack);
    assert_eq!(stack.len(), 1);
}
