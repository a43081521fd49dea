use super::*;
use crate::class_map::standard;
use crate::symbols::SymbolAllocator;
use jfir_common::{ClassId, Name};

fn list_of(argument: TypeProjection) -> ConeType {
    ConeType::class(ClassId::from_string(standard::LIST), vec![argument], false)
}

#[test]
fn test_substitutes_nested_arguments() {
    let allocator = SymbolAllocator::new();
    let t = allocator.type_parameter_symbol(Name::new("T"));
    let substitutor = Substitutor::new([t.clone()], &[TypeProjection::invariant(ConeType::string())]);
    let ty = list_of(TypeProjection::invariant(ConeType::type_parameter(t, false)));
    assert_eq!(
        substitutor.substitute(&ty),
        list_of(TypeProjection::invariant(ConeType::string()))
    );
}

#[test]
fn test_nullable_parameter_keeps_its_question_mark() {
    let allocator = SymbolAllocator::new();
    let t = allocator.type_parameter_symbol(Name::new("T"));
    let substitutor = Substitutor::new([t.clone()], &[TypeProjection::invariant(ConeType::string())]);
    assert_eq!(
        substitutor.substitute(&ConeType::type_parameter(t, true)),
        ConeType::string().with_nullability(true)
    );
}

#[test]
fn test_conflicting_projections_become_star() {
    let allocator = SymbolAllocator::new();
    let t = allocator.type_parameter_symbol(Name::new("T"));
    let substitutor = Substitutor::new([t.clone()], &[TypeProjection::contravariant(ConeType::string())]);
    let out_t = TypeProjection::out(ConeType::type_parameter(t.clone(), false));
    assert_eq!(substitutor.substitute_projection(&out_t), TypeProjection::Star);

    let invariant_t = TypeProjection::invariant(ConeType::type_parameter(t, false));
    assert_eq!(
        substitutor.substitute_projection(&invariant_t),
        TypeProjection::contravariant(ConeType::string())
    );
}

#[test]
fn test_definitely_not_null_of_substituted_class_is_not_null() {
    let allocator = SymbolAllocator::new();
    let t = allocator.type_parameter_symbol(Name::new("T"));
    let flexible_string = ConeType::flexible(ConeType::string(), ConeType::string().with_nullability(true));
    let substitutor = Substitutor::new([t.clone()], &[TypeProjection::invariant(flexible_string)]);
    let dnn = ConeType::DefinitelyNotNull(Box::new(ConeType::type_parameter(t, false)));
    assert_eq!(substitutor.substitute(&dnn), ConeType::string());
}

#[test]
fn test_empty_substitutor_is_identity() {
    let allocator = SymbolAllocator::new();
    let t = allocator.type_parameter_symbol(Name::new("T"));
    let ty = ConeType::type_parameter(t, true);
    assert!(Substitutor::default().is_empty());
    assert_eq!(Substitutor::default().substitute(&ty), ty);
}
