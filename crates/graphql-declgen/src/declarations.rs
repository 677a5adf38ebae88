//! The declaration model handed to the generator by the host build pipeline.
//!
//! Declarations reference each other by name and are resolved through a
//! [`DeclarationSet`] arena. Nothing in this module owns another declaration:
//! that is what lets recursive shapes (a class with a field of its own type)
//! exist without an ownership cycle.

use indexmap::IndexMap;

/// Name of the universal root supertype. The inheritance walk stops here.
pub const OBJECT_SUPERTYPE: &str = "Object";

/// Name of the single-argument asynchronous result wrapper recognized on
/// resolver method return types.
pub const ASYNC_WRAPPER: &str = "Future";

/// Name of the iterable head type.
pub const ITERABLE: &str = "List";

/// Every declared type is either nullable or non-null. There is no third
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    Nullable,
    NonNull,
}

/// A reference to a declared type, by name. Type arguments carry their own
/// nullability, recursively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub nullability: Nullability,
    pub args: Vec<TypeRef>,
}

impl TypeRef {
    pub fn nullable(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            nullability: Nullability::Nullable,
            args: Vec::new(),
        }
    }

    pub fn non_null(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            nullability: Nullability::NonNull,
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<TypeRef>) -> Self {
        self.args = args;
        self
    }

    pub fn is_non_null(&self) -> bool {
        self.nullability == Nullability::NonNull
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::nullable(OBJECT_SUPERTYPE)
    }
}

/// The marker annotations present on a class declaration. Annotation parsing
/// happens upstream; by the time the core sees a class, markers are plain
/// flags.
#[derive(Debug, Clone, Default)]
pub struct Markers {
    pub output_type: bool,
    pub input_type: bool,
    /// The general-purpose serializable data-class marker. An abstract class
    /// carrying it is a concrete data-class pattern, not an interface.
    pub serializable: bool,
    pub union: Option<UnionMarker>,
}

/// The union marker: a literal list of member types, plus an optional
/// explicit SDL name.
#[derive(Debug, Clone, Default)]
pub struct UnionMarker {
    pub name: Option<String>,
    pub members: Vec<TypeRef>,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
    pub is_static: bool,
    pub is_synthetic: bool,
    pub docs: Option<String>,
    pub deprecation: Option<String>,
    /// Explicit rename directive. Always wins over the naming context.
    pub wire_name: Option<String>,
    /// Per-direction include flags.
    pub in_output: bool,
    pub in_input: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        FieldDecl {
            name: name.into(),
            ty,
            is_static: false,
            is_synthetic: false,
            docs: None,
            deprecation: None,
            wire_name: None,
            in_output: true,
            in_input: true,
        }
    }
}

impl Default for FieldDecl {
    fn default() -> Self {
        FieldDecl::new(String::new(), TypeRef::default())
    }
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub return_type: TypeRef,
    pub params: Vec<(String, TypeRef)>,
    pub docs: Option<String>,
    pub deprecation: Option<String>,
    /// Presence of the resolver marker annotation.
    pub is_resolver: bool,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        MethodDecl {
            name: name.into(),
            return_type,
            params: Vec::new(),
            docs: None,
            deprecation: None,
            is_resolver: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub is_abstract: bool,
    /// Name of the direct supertype. `None` means the class extends the
    /// universal root directly.
    pub supertype: Option<String>,
    /// Names of directly implemented interface declarations.
    pub interfaces: Vec<String>,
    pub docs: Option<String>,
    pub deprecation: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub markers: Markers,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDecl {
            name: name.into(),
            is_abstract: false,
            supertype: None,
            interfaces: Vec::new(),
            docs: None,
            deprecation: None,
            fields: Vec::new(),
            methods: Vec::new(),
            markers: Markers::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumValueDecl {
    pub name: String,
    pub docs: Option<String>,
    pub deprecation: Option<String>,
    /// Synthetic accessors (the generated "all values" member) are not real
    /// constants and are skipped.
    pub is_synthetic: bool,
}

impl EnumValueDecl {
    pub fn new(name: impl Into<String>) -> Self {
        EnumValueDecl {
            name: name.into(),
            docs: None,
            deprecation: None,
            is_synthetic: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub docs: Option<String>,
    /// Explicit type-level description override. Wins over `docs`.
    pub description: Option<String>,
    pub values: Vec<EnumValueDecl>,
}

impl EnumDecl {
    pub fn new(name: impl Into<String>) -> Self {
        EnumDecl {
            name: name.into(),
            docs: None,
            description: None,
            values: Vec::new(),
        }
    }
}

/// All declarations known to the current compilation unit, keyed by name.
///
/// The set is immutable during synthesis. Concurrent synthesizer invocations
/// share it by reference.
#[derive(Debug, Default)]
pub struct DeclarationSet {
    classes: IndexMap<String, ClassDecl>,
    enums: IndexMap<String, EnumDecl>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_class(&mut self, class: ClassDecl) -> &ClassDecl {
        let name = class.name.clone();
        self.classes.insert(name.clone(), class);
        &self.classes[&name]
    }

    pub fn push_enum(&mut self, decl: EnumDecl) -> &EnumDecl {
        let name = decl.name.clone();
        self.enums.insert(name.clone(), decl);
        &self.enums[&name]
    }

    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.get(name)
    }

    pub fn enum_decl(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.get(name)
    }

    /// Walks the supertype chain starting at `class` itself, stopping before
    /// the universal root. Unresolvable supertype names end the walk.
    pub fn supertype_chain<'a>(&'a self, class: &'a ClassDecl) -> SupertypeChain<'a> {
        SupertypeChain {
            decls: self,
            next: Some(class),
        }
    }
}

pub struct SupertypeChain<'a> {
    decls: &'a DeclarationSet,
    next: Option<&'a ClassDecl>,
}

impl<'a> Iterator for SupertypeChain<'a> {
    type Item = &'a ClassDecl;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .supertype
            .as_deref()
            .filter(|name| !crate::classify::is_object_supertype(name))
            .and_then(|name| self.decls.class(name));
        Some(current)
    }
}
