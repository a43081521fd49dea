//! Java-to-Kotlin class mapping.
//!
//! Foreign platform classes are seen through their Kotlin counterparts:
//! `java.lang.Object` is `kotlin.Any`, `java.util.List` is the read-only
//! `kotlin.collections.List`, and so on. Collection classes come in
//! read-only/mutable pairs.

use jfir_common::ClassId;
use jfir_model::PrimitiveKind;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Well-known frontend class ids in `package/path/Name` notation.
pub mod standard {
    pub const ANY: &str = "kotlin/Any";
    pub const NOTHING: &str = "kotlin/Nothing";
    pub const UNIT: &str = "kotlin/Unit";
    pub const STRING: &str = "kotlin/String";
    pub const CHAR_SEQUENCE: &str = "kotlin/CharSequence";
    pub const THROWABLE: &str = "kotlin/Throwable";
    pub const CLONEABLE: &str = "kotlin/Cloneable";
    pub const NUMBER: &str = "kotlin/Number";
    pub const COMPARABLE: &str = "kotlin/Comparable";
    pub const ENUM: &str = "kotlin/Enum";
    pub const ANNOTATION: &str = "kotlin/Annotation";
    pub const ARRAY: &str = "kotlin/Array";
    pub const DEPRECATED: &str = "kotlin/Deprecated";

    pub const BOOLEAN: &str = "kotlin/Boolean";
    pub const CHAR: &str = "kotlin/Char";
    pub const BYTE: &str = "kotlin/Byte";
    pub const SHORT: &str = "kotlin/Short";
    pub const INT: &str = "kotlin/Int";
    pub const FLOAT: &str = "kotlin/Float";
    pub const LONG: &str = "kotlin/Long";
    pub const DOUBLE: &str = "kotlin/Double";

    pub const ITERABLE: &str = "kotlin/collections/Iterable";
    pub const MUTABLE_ITERABLE: &str = "kotlin/collections/MutableIterable";
    pub const ITERATOR: &str = "kotlin/collections/Iterator";
    pub const MUTABLE_ITERATOR: &str = "kotlin/collections/MutableIterator";
    pub const COLLECTION: &str = "kotlin/collections/Collection";
    pub const MUTABLE_COLLECTION: &str = "kotlin/collections/MutableCollection";
    pub const LIST: &str = "kotlin/collections/List";
    pub const MUTABLE_LIST: &str = "kotlin/collections/MutableList";
    pub const SET: &str = "kotlin/collections/Set";
    pub const MUTABLE_SET: &str = "kotlin/collections/MutableSet";
    pub const LIST_ITERATOR: &str = "kotlin/collections/ListIterator";
    pub const MUTABLE_LIST_ITERATOR: &str = "kotlin/collections/MutableListIterator";
    pub const MAP: &str = "kotlin/collections/Map";
    pub const MUTABLE_MAP: &str = "kotlin/collections/MutableMap";
    pub const MAP_ENTRY: &str = "kotlin/collections/Map.Entry";
    pub const MUTABLE_MAP_ENTRY: &str = "kotlin/collections/MutableMap.MutableEntry";

    pub const KCLASS: &str = "kotlin/reflect/KClass";
    pub const ENUM_ENTRIES: &str = "kotlin/enums/EnumEntries";

    pub const TARGET: &str = "kotlin/annotation/Target";
    pub const RETENTION: &str = "kotlin/annotation/Retention";
    pub const MUST_BE_DOCUMENTED: &str = "kotlin/annotation/MustBeDocumented";
    pub const REPEATABLE: &str = "kotlin/annotation/Repeatable";
    pub const ANNOTATION_TARGET: &str = "kotlin/annotation/AnnotationTarget";
    pub const ANNOTATION_RETENTION: &str = "kotlin/annotation/AnnotationRetention";

    pub const JAVA_OBJECT: &str = "java/lang/Object";
    pub const JAVA_STRING: &str = "java/lang/String";
    pub const JAVA_CLASS: &str = "java/lang/Class";
    pub const JAVA_ENUM: &str = "java/lang/Enum";
    pub const JAVA_RECORD: &str = "java/lang/Record";
    pub const JAVA_DEPRECATED: &str = "java/lang/Deprecated";
    pub const JAVA_TARGET: &str = "java/lang/annotation/Target";
    pub const JAVA_RETENTION: &str = "java/lang/annotation/Retention";
    pub const JAVA_DOCUMENTED: &str = "java/lang/annotation/Documented";
    pub const JAVA_ELEMENT_TYPE: &str = "java/lang/annotation/ElementType";
    pub const JAVA_RETENTION_POLICY: &str = "java/lang/annotation/RetentionPolicy";
}

/// `(java, kotlin read-only, kotlin mutable)`.
const COLLECTIONS: &[(&str, &str, &str)] = &[
    ("java/lang/Iterable", standard::ITERABLE, standard::MUTABLE_ITERABLE),
    ("java/util/Iterator", standard::ITERATOR, standard::MUTABLE_ITERATOR),
    ("java/util/Collection", standard::COLLECTION, standard::MUTABLE_COLLECTION),
    ("java/util/List", standard::LIST, standard::MUTABLE_LIST),
    ("java/util/Set", standard::SET, standard::MUTABLE_SET),
    ("java/util/ListIterator", standard::LIST_ITERATOR, standard::MUTABLE_LIST_ITERATOR),
    ("java/util/Map", standard::MAP, standard::MUTABLE_MAP),
    ("java/util/Map.Entry", standard::MAP_ENTRY, standard::MUTABLE_MAP_ENTRY),
];

const PLATFORM: &[(&str, &str)] = &[
    (standard::JAVA_OBJECT, standard::ANY),
    (standard::JAVA_STRING, standard::STRING),
    ("java/lang/CharSequence", standard::CHAR_SEQUENCE),
    ("java/lang/Throwable", standard::THROWABLE),
    ("java/lang/Cloneable", standard::CLONEABLE),
    ("java/lang/Number", standard::NUMBER),
    ("java/lang/Comparable", standard::COMPARABLE),
    (standard::JAVA_ENUM, standard::ENUM),
    ("java/lang/annotation/Annotation", standard::ANNOTATION),
    ("java/lang/Boolean", standard::BOOLEAN),
    ("java/lang/Character", standard::CHAR),
    ("java/lang/Byte", standard::BYTE),
    ("java/lang/Short", standard::SHORT),
    ("java/lang/Integer", standard::INT),
    ("java/lang/Float", standard::FLOAT),
    ("java/lang/Long", standard::LONG),
    ("java/lang/Double", standard::DOUBLE),
];

struct ClassMap {
    java_to_kotlin: FxHashMap<ClassId, ClassId>,
    read_only_to_mutable: FxHashMap<ClassId, ClassId>,
    mutable_to_read_only: FxHashMap<ClassId, ClassId>,
}

static CLASS_MAP: LazyLock<ClassMap> = LazyLock::new(|| {
    let mut map = ClassMap {
        java_to_kotlin: FxHashMap::default(),
        read_only_to_mutable: FxHashMap::default(),
        mutable_to_read_only: FxHashMap::default(),
    };
    for (java, kotlin) in PLATFORM {
        map.java_to_kotlin
            .insert(ClassId::from_string(java), ClassId::from_string(kotlin));
    }
    for (java, read_only, mutable) in COLLECTIONS {
        let read_only = ClassId::from_string(read_only);
        let mutable = ClassId::from_string(mutable);
        map.java_to_kotlin
            .insert(ClassId::from_string(java), read_only.clone());
        map.read_only_to_mutable
            .insert(read_only.clone(), mutable.clone());
        map.mutable_to_read_only.insert(mutable, read_only);
    }
    map
});

/// The frontend counterpart of a foreign platform class.
pub fn map_java_to_kotlin(class_id: &ClassId) -> Option<ClassId> {
    CLASS_MAP.java_to_kotlin.get(class_id).cloned()
}

pub fn read_only_to_mutable(class_id: &ClassId) -> Option<ClassId> {
    CLASS_MAP.read_only_to_mutable.get(class_id).cloned()
}

pub fn mutable_to_read_only(class_id: &ClassId) -> Option<ClassId> {
    CLASS_MAP.mutable_to_read_only.get(class_id).cloned()
}

pub fn is_read_only_collection(class_id: &ClassId) -> bool {
    CLASS_MAP.read_only_to_mutable.contains_key(class_id)
}

pub fn is_mutable_collection(class_id: &ClassId) -> bool {
    CLASS_MAP.mutable_to_read_only.contains_key(class_id)
}

/// Whether the class is a foreign platform class with a frontend
/// counterpart. Such classes never get a synthesized declaration.
pub fn is_mapped_platform_class(class_id: &ClassId) -> bool {
    CLASS_MAP.java_to_kotlin.contains_key(class_id)
}

pub fn primitive_class_id(primitive: PrimitiveKind) -> ClassId {
    ClassId::from_string(match primitive {
        PrimitiveKind::Boolean => standard::BOOLEAN,
        PrimitiveKind::Char => standard::CHAR,
        PrimitiveKind::Byte => standard::BYTE,
        PrimitiveKind::Short => standard::SHORT,
        PrimitiveKind::Int => standard::INT,
        PrimitiveKind::Float => standard::FLOAT,
        PrimitiveKind::Long => standard::LONG,
        PrimitiveKind::Double => standard::DOUBLE,
        PrimitiveKind::Void => standard::UNIT,
    })
}

/// `kotlin/IntArray` and friends. `void` has no array class.
pub fn primitive_array_class_id(primitive: PrimitiveKind) -> Option<ClassId> {
    let name = match primitive {
        PrimitiveKind::Boolean => "kotlin/BooleanArray",
        PrimitiveKind::Char => "kotlin/CharArray",
        PrimitiveKind::Byte => "kotlin/ByteArray",
        PrimitiveKind::Short => "kotlin/ShortArray",
        PrimitiveKind::Int => "kotlin/IntArray",
        PrimitiveKind::Float => "kotlin/FloatArray",
        PrimitiveKind::Long => "kotlin/LongArray",
        PrimitiveKind::Double => "kotlin/DoubleArray",
        PrimitiveKind::Void => return None,
    };
    Some(ClassId::from_string(name))
}

pub fn is_primitive_class(class_id: &ClassId) -> bool {
    class_id.package_fq_name().as_str() == "kotlin"
        && matches!(
            class_id.relative_class_name().as_str(),
            "Boolean" | "Char" | "Byte" | "Short" | "Int" | "Float" | "Long" | "Double"
        )
}

#[cfg(test)]
#[path = "../tests/class_map_tests.rs"]
mod tests;
