use super::*;
use crate::class_map::standard;
use crate::test_support::TestLookup;
use jfir_common::ClassId;

#[test]
fn test_unbounded_parameter_erases_to_nullable_any() {
    let mut lookup = TestLookup::new();
    let symbols = lookup.add_class("p/Box", &["T"]);
    assert_eq!(erase_upper_bound(&symbols[0], &lookup), ConeType::nullable_any());
}

#[test]
fn test_generic_bound_erases_to_star_projection() {
    let mut lookup = TestLookup::new();
    let symbols = lookup.add_class("p/Sorted", &["T"]);
    let comparable = ClassId::from_string(standard::COMPARABLE);
    lookup.set_bounds(
        &symbols[0],
        vec![ConeType::class(
            comparable.clone(),
            vec![TypeProjection::invariant(ConeType::type_parameter(symbols[0].clone(), false))],
            false,
        )],
    );
    assert_eq!(
        erase_upper_bound(&symbols[0], &lookup),
        ConeType::class(comparable, vec![TypeProjection::Star], false)
    );
}

#[test]
fn test_parameter_bound_chain_is_followed() {
    let mut lookup = TestLookup::new();
    let symbols = lookup.add_class("p/Pair", &["A", "B"]);
    lookup.set_bounds(&symbols[0], vec![ConeType::type_parameter(symbols[1].clone(), false)]);
    lookup.set_bounds(&symbols[1], vec![ConeType::string()]);
    assert_eq!(erase_upper_bound(&symbols[0], &lookup), ConeType::string());
}

#[test]
fn test_bound_cycle_falls_back_to_nullable_any() {
    let mut lookup = TestLookup::new();
    let symbols = lookup.add_class("p/Pair", &["A", "B"]);
    lookup.set_bounds(&symbols[0], vec![ConeType::type_parameter(symbols[1].clone(), false)]);
    lookup.set_bounds(&symbols[1], vec![ConeType::type_parameter(symbols[0].clone(), false)]);
    assert_eq!(erase_upper_bound(&symbols[0], &lookup), ConeType::nullable_any());
}
