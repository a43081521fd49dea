//! Built-in frontend classifiers.
//!
//! The interop layer never synthesizes the Kotlin standard classes that
//! foreign platform classes map to. Their type parameters (with declared
//! variance and bounds), annotation constructors and enum entries live in
//! this table instead, created once per session.

use crate::class_map::standard;
use crate::cone::{ConeType, TypeProjection};
use crate::lookup::{ClassifierLookup, TypeParameterInfo};
use crate::symbols::{CallableSymbol, ClassSymbol, SymbolAllocator, TypeParameterSymbol};
use jfir_common::{CallableId, ClassId, ClassKind, Name, Variance};
use rustc_hash::FxHashMap;
use tracing::debug;

pub struct BuiltinTypeParameter {
    pub symbol: TypeParameterSymbol,
    pub variance: Variance,
    pub bounds: Vec<ConeType>,
}

/// A constructor parameter of a built-in annotation class.
#[derive(Clone, Debug)]
pub struct BuiltinParameter {
    pub name: Name,
    /// Element type for a `vararg` parameter.
    pub ty: ConeType,
    pub is_vararg: bool,
    pub has_default: bool,
}

pub struct BuiltinClass {
    pub symbol: ClassSymbol,
    pub kind: ClassKind,
    pub type_parameters: Vec<BuiltinTypeParameter>,
    pub constructor_parameters: Vec<BuiltinParameter>,
    pub enum_entries: Vec<CallableSymbol>,
}

pub struct BuiltinClassifiers {
    classes: FxHashMap<ClassId, BuiltinClass>,
}

const ANNOTATION_TARGETS: &[&str] = &[
    "CLASS",
    "ANNOTATION_CLASS",
    "TYPE_PARAMETER",
    "PROPERTY",
    "FIELD",
    "LOCAL_VARIABLE",
    "VALUE_PARAMETER",
    "CONSTRUCTOR",
    "FUNCTION",
    "PROPERTY_GETTER",
    "PROPERTY_SETTER",
    "TYPE",
    "EXPRESSION",
    "FILE",
    "TYPEALIAS",
];

const ANNOTATION_RETENTIONS: &[&str] = &["SOURCE", "BINARY", "RUNTIME"];

impl BuiltinClassifiers {
    pub fn new(allocator: &SymbolAllocator) -> Self {
        use standard::*;
        use Variance::{In, Invariant, Out};

        let mut builtins = Self {
            classes: FxHashMap::default(),
        };

        for id in [
            ANY, NOTHING, UNIT, STRING, THROWABLE, NUMBER, BOOLEAN, CHAR, BYTE, SHORT, INT, FLOAT,
            LONG, DOUBLE,
        ] {
            builtins.add(allocator, id, ClassKind::Class, &[]);
        }
        for id in [
            "kotlin/BooleanArray",
            "kotlin/CharArray",
            "kotlin/ByteArray",
            "kotlin/ShortArray",
            "kotlin/IntArray",
            "kotlin/FloatArray",
            "kotlin/LongArray",
            "kotlin/DoubleArray",
        ] {
            builtins.add(allocator, id, ClassKind::Class, &[]);
        }
        for id in [CHAR_SEQUENCE, CLONEABLE, ANNOTATION] {
            builtins.add(allocator, id, ClassKind::Interface, &[]);
        }

        builtins.add(allocator, ARRAY, ClassKind::Class, &[("T", Invariant)]);
        builtins.add(allocator, COMPARABLE, ClassKind::Interface, &[("T", In)]);

        let enum_parameter = builtins.add(allocator, ENUM, ClassKind::Class, &[("E", Invariant)]);
        builtins.set_bounds(ENUM, 0, vec![self_bounded(ENUM, &enum_parameter[0])]);
        let entries_parameter = builtins.add(allocator, ENUM_ENTRIES, ClassKind::Interface, &[("E", Out)]);
        builtins.set_bounds(ENUM_ENTRIES, 0, vec![self_bounded(ENUM, &entries_parameter[0])]);

        builtins.add(allocator, KCLASS, ClassKind::Interface, &[("T", Invariant)]);
        builtins.set_bounds(KCLASS, 0, vec![ConeType::any()]);

        for (read_only, mutable, arity) in [
            (ITERABLE, MUTABLE_ITERABLE, 1),
            (ITERATOR, MUTABLE_ITERATOR, 1),
            (COLLECTION, MUTABLE_COLLECTION, 1),
            (LIST, MUTABLE_LIST, 1),
            (SET, MUTABLE_SET, 1),
            (LIST_ITERATOR, MUTABLE_LIST_ITERATOR, 1),
            (MAP, MUTABLE_MAP, 2),
            (MAP_ENTRY, MUTABLE_MAP_ENTRY, 2),
        ] {
            let read_only_parameters: &[(&str, Variance)] = match (read_only, arity) {
                (MAP, _) => &[("K", Invariant), ("V", Out)],
                (_, 2) => &[("K", Out), ("V", Out)],
                _ => &[("E", Out)],
            };
            let mutable_parameters: &[(&str, Variance)] = if arity == 2 {
                &[("K", Invariant), ("V", Invariant)]
            } else {
                &[("E", Invariant)]
            };
            builtins.add(allocator, read_only, ClassKind::Interface, read_only_parameters);
            builtins.add(allocator, mutable, ClassKind::Interface, mutable_parameters);
        }

        builtins.add_enum(allocator, ANNOTATION_TARGET, ANNOTATION_TARGETS);
        builtins.add_enum(allocator, ANNOTATION_RETENTION, ANNOTATION_RETENTIONS);
        builtins.add_enum(allocator, "kotlin/DeprecationLevel", &["WARNING", "ERROR", "HIDDEN"]);

        builtins.add_annotation(
            allocator,
            TARGET,
            vec![BuiltinParameter {
                name: Name::new("allowedTargets"),
                ty: ConeType::simple(ANNOTATION_TARGET),
                is_vararg: true,
                has_default: false,
            }],
        );
        builtins.add_annotation(
            allocator,
            RETENTION,
            vec![BuiltinParameter {
                name: Name::new("value"),
                ty: ConeType::simple(ANNOTATION_RETENTION),
                is_vararg: false,
                has_default: true,
            }],
        );
        builtins.add_annotation(allocator, MUST_BE_DOCUMENTED, Vec::new());
        builtins.add_annotation(allocator, REPEATABLE, Vec::new());
        builtins.add_annotation(
            allocator,
            DEPRECATED,
            vec![
                BuiltinParameter {
                    name: Name::new("message"),
                    ty: ConeType::string(),
                    is_vararg: false,
                    has_default: false,
                },
                BuiltinParameter {
                    name: Name::new("level"),
                    ty: ConeType::simple("kotlin/DeprecationLevel"),
                    is_vararg: false,
                    has_default: true,
                },
            ],
        );

        debug!(classes = builtins.classes.len(), "BuiltinClassifiers::new");
        builtins
    }

    fn add(
        &mut self,
        allocator: &SymbolAllocator,
        class_id: &str,
        kind: ClassKind,
        parameters: &[(&str, Variance)],
    ) -> Vec<TypeParameterSymbol> {
        let class_id = ClassId::from_string(class_id);
        let type_parameters: Vec<BuiltinTypeParameter> = parameters
            .iter()
            .map(|(name, variance)| BuiltinTypeParameter {
                symbol: allocator.type_parameter_symbol(Name::new(name)),
                variance: *variance,
                bounds: vec![ConeType::nullable_any()],
            })
            .collect();
        let symbols = type_parameters.iter().map(|parameter| parameter.symbol.clone()).collect();
        self.classes.insert(
            class_id.clone(),
            BuiltinClass {
                symbol: allocator.class_symbol(class_id),
                kind,
                type_parameters,
                constructor_parameters: Vec::new(),
                enum_entries: Vec::new(),
            },
        );
        symbols
    }

    fn set_bounds(&mut self, class_id: &str, index: usize, bounds: Vec<ConeType>) {
        if let Some(parameter) = self
            .classes
            .get_mut(&ClassId::from_string(class_id))
            .and_then(|class| class.type_parameters.get_mut(index))
        {
            parameter.bounds = bounds;
        }
    }

    fn add_enum(&mut self, allocator: &SymbolAllocator, class_id: &str, entries: &[&str]) {
        self.add(allocator, class_id, ClassKind::EnumClass, &[]);
        let id = ClassId::from_string(class_id);
        let symbols = entries
            .iter()
            .map(|entry| allocator.callable_symbol(CallableId::member(&id, Name::new(entry))))
            .collect();
        if let Some(class) = self.classes.get_mut(&id) {
            class.enum_entries = symbols;
        }
    }

    fn add_annotation(&mut self, allocator: &SymbolAllocator, class_id: &str, parameters: Vec<BuiltinParameter>) {
        self.add(allocator, class_id, ClassKind::AnnotationClass, &[]);
        if let Some(class) = self.classes.get_mut(&ClassId::from_string(class_id)) {
            class.constructor_parameters = parameters;
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn get(&self, class_id: &ClassId) -> Option<&BuiltinClass> {
        self.classes.get(class_id)
    }

    pub fn contains(&self, class_id: &ClassId) -> bool {
        self.classes.contains_key(class_id)
    }

    pub fn symbol(&self, class_id: &ClassId) -> Option<&ClassSymbol> {
        self.get(class_id).map(|class| &class.symbol)
    }

    pub fn enum_entry(&self, class_id: &ClassId, name: &Name) -> Option<&CallableSymbol> {
        self.get(class_id)?
            .enum_entries
            .iter()
            .find(|entry| entry.name() == name)
    }

    pub fn constructor_parameters(&self, class_id: &ClassId) -> Option<&[BuiltinParameter]> {
        self.get(class_id).map(|class| class.constructor_parameters.as_slice())
    }

    pub fn bounds(&self, symbol: &TypeParameterSymbol) -> Option<&[ConeType]> {
        self.classes
            .values()
            .flat_map(|class| class.type_parameters.iter())
            .find(|parameter| &parameter.symbol == symbol)
            .map(|parameter| parameter.bounds.as_slice())
    }
}

fn self_bounded(class_id: &str, parameter: &TypeParameterSymbol) -> ConeType {
    ConeType::class(
        ClassId::from_string(class_id),
        vec![TypeProjection::invariant(ConeType::type_parameter(parameter.clone(), false))],
        false,
    )
}

impl ClassifierLookup for BuiltinClassifiers {
    fn class_type_parameters(&self, class_id: &ClassId) -> Option<Vec<TypeParameterInfo>> {
        self.get(class_id).map(|class| {
            class
                .type_parameters
                .iter()
                .map(|parameter| TypeParameterInfo::new(parameter.symbol.clone(), parameter.variance))
                .collect()
        })
    }

    fn type_parameter_bounds(&self, symbol: &TypeParameterSymbol) -> Vec<ConeType> {
        self.bounds(symbol).map(<[ConeType]>::to_vec).unwrap_or_default()
    }

    fn type_parameter_count(&self, class_id: &ClassId) -> Option<usize> {
        self.get(class_id).map(|class| class.type_parameters.len())
    }
}

#[cfg(test)]
#[path = "../tests/builtins_tests.rs"]
mod tests;
