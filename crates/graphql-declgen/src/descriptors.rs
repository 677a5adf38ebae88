//! The produced model: immutable schema-type descriptors and the registry
//! they live in.
//!
//! Descriptors never embed each other. Cross-references are name tags
//! ([`SchemaType::Object`] and friends) resolved through the
//! [`DescriptorRegistry`], because declarations are processed independently
//! and a reference may point at a descriptor synthesized in a sibling pass.

use crate::accessors::{FieldAccessor, MethodAccessor};
use indexmap::IndexMap;
use serde::Serialize;

/// The built-in scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarType {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
}

impl ScalarType {
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
            ScalarType::Boolean => "Boolean",
            ScalarType::DateTime => "DateTime",
        }
    }
}

/// A schema-type expression.
///
/// `SelfRef` only exists between the two phases of deferred input-object
/// construction. [`SchemaType::resolve_self`] rewrites it away before a
/// descriptor is attached; finished descriptors never contain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SchemaType {
    Scalar(ScalarType),
    List(Box<SchemaType>),
    NonNull(Box<SchemaType>),
    Enum(String),
    Object(String),
    Input(String),
    Union(String),
    SelfRef,
}

impl SchemaType {
    pub fn non_null(self) -> SchemaType {
        SchemaType::NonNull(Box::new(self))
    }

    pub fn list(self) -> SchemaType {
        SchemaType::List(Box::new(self))
    }

    /// The expression with `List`/`NonNull` wrappers peeled off.
    pub fn unwrapped(&self) -> &SchemaType {
        match self {
            SchemaType::List(inner) | SchemaType::NonNull(inner) => inner.unwrapped(),
            other => other,
        }
    }

    /// Rewrites `SelfRef` into an input reference to `owner`. Used when the
    /// deferred two-phase construction attaches the final field list.
    pub(crate) fn resolve_self(self, owner: &str) -> SchemaType {
        match self {
            SchemaType::SelfRef => SchemaType::Input(owner.to_owned()),
            SchemaType::List(inner) => SchemaType::List(Box::new(inner.resolve_self(owner))),
            SchemaType::NonNull(inner) => SchemaType::NonNull(Box::new(inner.resolve_self(owner))),
            other => other,
        }
    }

    pub(crate) fn contains_self_ref(&self) -> bool {
        match self {
            SchemaType::SelfRef => true,
            SchemaType::List(inner) | SchemaType::NonNull(inner) => inner.contains_self_ref(),
            _ => false,
        }
    }
}

/// An output-object field.
#[derive(Debug, Serialize)]
pub struct FieldDescriptor {
    pub wire_name: String,
    pub ty: SchemaType,
    pub description: Option<String>,
    pub deprecation: Option<String>,
    pub accessor: FieldAccessor,
}

/// An argument of a resolver-method field.
#[derive(Debug, Serialize)]
pub struct InputArgDescriptor {
    pub name: String,
    pub ty: SchemaType,
}

/// A field contributed by a resolver-marked method.
#[derive(Debug, Serialize)]
pub struct MethodFieldDescriptor {
    pub wire_name: String,
    pub ty: SchemaType,
    pub args: Vec<InputArgDescriptor>,
    pub description: Option<String>,
    pub deprecation: Option<String>,
    pub accessor: MethodAccessor,
}

/// An input-object field. Input fields never carry resolve behavior.
#[derive(Debug, Serialize)]
pub struct InputFieldDescriptor {
    pub wire_name: String,
    pub ty: SchemaType,
    pub description: Option<String>,
    pub deprecation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ObjectDescriptor {
    /// The SDL-visible type name.
    pub type_name: String,
    /// The host-language declaration the descriptor was derived from.
    pub source_name: String,
    pub description: Option<String>,
    pub deprecation: Option<String>,
    pub is_interface: bool,
    /// Object references to the output-marked implemented interfaces.
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    /// Method fields always come after plain fields in the emitted field
    /// sequence.
    pub method_fields: Vec<MethodFieldDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct InputObjectDescriptor {
    pub type_name: String,
    pub source_name: String,
    pub description: Option<String>,
    pub fields: Vec<InputFieldDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct UnionDescriptor {
    pub type_name: String,
    pub source_name: String,
    /// Object references to the member types. Never empty.
    pub members: Vec<String>,
}

/// How enum constants are represented toward the schema-runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BackingValue {
    /// The constant's wire-form name string, for weakly typed runtimes.
    Name(String),
    /// A typed constant tag, for strongly typed runtimes.
    Constant { enum_name: String, value: String },
}

#[derive(Debug, Serialize)]
pub struct EnumValueDescriptor {
    pub wire_name: String,
    pub backing: BackingValue,
    pub description: Option<String>,
    pub deprecation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EnumTypeDescriptor {
    pub type_name: String,
    pub source_name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValueDescriptor>,
}

/// The shared registry descriptors are published into, keyed by the same
/// name cross-references carry. Populated incrementally, one synthesis pass
/// at a time.
#[derive(Debug, Default, Serialize)]
pub struct DescriptorRegistry {
    objects: IndexMap<String, ObjectDescriptor>,
    input_objects: IndexMap<String, InputObjectDescriptor>,
    unions: IndexMap<String, UnionDescriptor>,
    enums: IndexMap<String, EnumTypeDescriptor>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_object(&mut self, descriptor: ObjectDescriptor) {
        self.objects.insert(descriptor.source_name.clone(), descriptor);
    }

    pub fn insert_input_object(&mut self, descriptor: InputObjectDescriptor) {
        self.input_objects.insert(descriptor.source_name.clone(), descriptor);
    }

    pub fn insert_union(&mut self, descriptor: UnionDescriptor) {
        self.unions.insert(descriptor.source_name.clone(), descriptor);
    }

    pub fn insert_enum(&mut self, descriptor: EnumTypeDescriptor) {
        self.enums.insert(descriptor.source_name.clone(), descriptor);
    }

    /// First phase of the deferred construction of a self-referential input
    /// object: the descriptor enters the registry with no fields, so that it
    /// has a stable identity before any field type needs to point back at it.
    pub(crate) fn reserve_input_object(&mut self, descriptor: InputObjectDescriptor) {
        debug_assert!(descriptor.fields.is_empty());
        self.input_objects.insert(descriptor.source_name.clone(), descriptor);
    }

    /// Second phase: attach the fully-built field list. Self-referential
    /// entries must already have been rewritten to input references.
    pub(crate) fn attach_input_fields(&mut self, source_name: &str, fields: Vec<InputFieldDescriptor>) {
        debug_assert!(fields.iter().all(|field| !field.ty.contains_self_ref()));
        if let Some(descriptor) = self.input_objects.get_mut(source_name) {
            descriptor.fields = fields;
        }
    }

    /// Rolls back a reserved placeholder when synthesis fails between the two
    /// phases, so no partial descriptor stays visible.
    pub(crate) fn discard_input_object(&mut self, source_name: &str) {
        self.input_objects.shift_remove(source_name);
    }

    pub fn object(&self, source_name: &str) -> Option<&ObjectDescriptor> {
        self.objects.get(source_name)
    }

    pub fn input_object(&self, source_name: &str) -> Option<&InputObjectDescriptor> {
        self.input_objects.get(source_name)
    }

    pub fn union(&self, source_name: &str) -> Option<&UnionDescriptor> {
        self.unions.get(source_name)
    }

    pub fn enum_type(&self, source_name: &str) -> Option<&EnumTypeDescriptor> {
        self.enums.get(source_name)
    }

    /// Resolves an input reference (possibly under `List`/`NonNull` wrappers)
    /// to the registered descriptor it points at.
    pub fn resolve_input_ref(&self, ty: &SchemaType) -> Option<&InputObjectDescriptor> {
        match ty.unwrapped() {
            SchemaType::Input(name) => self.input_object(name),
            _ => None,
        }
    }

    pub fn iter_objects(&self) -> impl Iterator<Item = &ObjectDescriptor> {
        self.objects.values()
    }

    pub fn iter_input_objects(&self) -> impl Iterator<Item = &InputObjectDescriptor> {
        self.input_objects.values()
    }
}
