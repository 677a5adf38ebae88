//! Rendering of the per-declaration generated source units.
//!
//! Each unit is a top-level immutable binding whose value is a call into the
//! schema-runtime's construction API, preceded by a doc comment referencing
//! the source declaration. Units are appended into a single shared
//! [`GeneratedPart`] for the whole compilation unit.

use crate::{
    accessors::{AccessorShape, FieldAccessor, MethodAccessor},
    config::{EnumRepresentation, SynthesisConfig},
    descriptors::{
        BackingValue, EnumTypeDescriptor, FieldDescriptor, InputFieldDescriptor,
        InputObjectDescriptor, MethodFieldDescriptor, ObjectDescriptor, ScalarType, SchemaType,
        UnionDescriptor,
    },
    synthesize::names::{binding_name_for, graphql_type_name_for},
};
use itertools::Itertools;
use std::fmt::Write;

const INDENT: &str = "  ";
const DOUBLE_INDENT: &str = "    ";

const HEADER: &str = "// This is a generated file. It should not be edited manually.\n\n";

/// One emitted unit of generated source, for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Name of the top-level binding, `<camelCaseTypeName><Input>GraphQLType`.
    pub binding_name: String,
    /// The source declaration the unit was derived from.
    pub source_name: String,
    pub source: String,
}

/// The shared generated-output part units are appended into.
#[derive(Debug, Default)]
pub struct GeneratedPart {
    units: Vec<GeneratedUnit>,
}

impl GeneratedPart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, unit: GeneratedUnit) {
        self.units.push(unit);
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter_units(&self) -> impl Iterator<Item = &GeneratedUnit> {
        self.units.iter()
    }

    pub fn to_source(&self) -> String {
        let mut out = String::from(HEADER);
        for unit in &self.units {
            out.push_str(&unit.source);
            out.push('\n');
        }
        out
    }
}

pub(crate) fn render_object(
    descriptor: &ObjectDescriptor,
    declared_name: &str,
    config: &SynthesisConfig,
) -> GeneratedUnit {
    let binding_name = binding_name_for(&descriptor.type_name);
    let mut out = String::new();

    doc_comment(&mut out, declared_name);
    let _ = writeln!(out, "final {binding_name} = objectType(");
    let _ = writeln!(out, "{INDENT}'{}',", descriptor.type_name);
    if descriptor.is_interface {
        let _ = writeln!(out, "{INDENT}isInterface: true,");
    }
    if !descriptor.interfaces.is_empty() {
        let interfaces = descriptor
            .interfaces
            .iter()
            .map(|name| binding_name_for(&graphql_type_name_for(name, false, config.type_prefix.as_deref())))
            .join(", ");
        let _ = writeln!(out, "{INDENT}interfaces: [{interfaces}],");
    }
    if let Some(description) = &descriptor.description {
        let _ = writeln!(out, "{INDENT}description: '{}',", escape(description));
    }
    if let Some(deprecation) = &descriptor.deprecation {
        let _ = writeln!(out, "{INDENT}deprecationReason: '{}',", escape(deprecation));
    }
    let _ = writeln!(out, "{INDENT}fields: [");
    for field in &descriptor.fields {
        render_field(&mut out, field, config);
    }
    for method in &descriptor.method_fields {
        render_method_field(&mut out, method, config);
    }
    let _ = writeln!(out, "{INDENT}],");
    let _ = writeln!(out, ");");

    GeneratedUnit {
        binding_name,
        source_name: declared_name.to_owned(),
        source: out,
    }
}

fn render_field(out: &mut String, field: &FieldDescriptor, config: &SynthesisConfig) {
    let _ = write!(
        out,
        "{DOUBLE_INDENT}field('{}', {}",
        field.wire_name,
        render_type(&field.ty, config, None)
    );
    if let Some(description) = &field.description {
        let _ = write!(out, ", description: '{}'", escape(description));
    }
    if let Some(deprecation) = &field.deprecation {
        let _ = write!(out, ", deprecationReason: '{}'", escape(deprecation));
    }
    let _ = writeln!(out, ", resolve: {}),", render_field_resolver(&field.accessor));
}

fn render_method_field(out: &mut String, method: &MethodFieldDescriptor, config: &SynthesisConfig) {
    let _ = write!(
        out,
        "{DOUBLE_INDENT}field('{}', {}",
        method.wire_name,
        render_type(&method.ty, config, None)
    );
    if !method.args.is_empty() {
        let inputs = method
            .args
            .iter()
            .map(|arg| {
                format!(
                    "GraphQLFieldInput('{}', {})",
                    arg.name,
                    render_type(&arg.ty, config, None)
                )
            })
            .join(", ");
        let _ = write!(out, ", inputs: [{inputs}]");
    }
    if let Some(description) = &method.description {
        let _ = write!(out, ", description: '{}'", escape(description));
    }
    if let Some(deprecation) = &method.deprecation {
        let _ = write!(out, ", deprecationReason: '{}'", escape(deprecation));
    }
    let _ = writeln!(out, ", resolve: {}),", render_method_resolver(&method.accessor));
}

pub(crate) fn render_input_object(
    descriptor: &InputObjectDescriptor,
    declared_name: &str,
    deferred: bool,
    config: &SynthesisConfig,
) -> GeneratedUnit {
    let binding_name = binding_name_for(&descriptor.type_name);
    let mut out = String::new();
    doc_comment(&mut out, declared_name);

    if deferred {
        // Two-phase shape: the binding is initialized with an empty field
        // list first so the self-referential fields below can point at it.
        let _ = writeln!(out, "final {binding_name} = (() {{");
        let _ = write!(out, "{INDENT}final type = inputObjectType('{}'", descriptor.type_name);
        if let Some(description) = &descriptor.description {
            let _ = write!(out, ", description: '{}'", escape(description));
        }
        let _ = writeln!(out, ", inputFields: []);");
        let _ = writeln!(out, "{INDENT}type.inputFields.addAll([");
        for field in &descriptor.fields {
            render_input_field(&mut out, field, config, Some(&descriptor.source_name));
        }
        let _ = writeln!(out, "{INDENT}]);");
        let _ = writeln!(out, "{INDENT}return type;");
        let _ = writeln!(out, "}})();");
    } else {
        let _ = writeln!(out, "final {binding_name} = inputObjectType(");
        let _ = writeln!(out, "{INDENT}'{}',", descriptor.type_name);
        if let Some(description) = &descriptor.description {
            let _ = writeln!(out, "{INDENT}description: '{}',", escape(description));
        }
        let _ = writeln!(out, "{INDENT}inputFields: [");
        for field in &descriptor.fields {
            render_input_field(&mut out, field, config, None);
        }
        let _ = writeln!(out, "{INDENT}],");
        let _ = writeln!(out, ");");
    }

    GeneratedUnit {
        binding_name,
        source_name: declared_name.to_owned(),
        source: out,
    }
}

fn render_input_field(
    out: &mut String,
    field: &InputFieldDescriptor,
    config: &SynthesisConfig,
    self_owner: Option<&str>,
) {
    let _ = write!(
        out,
        "{DOUBLE_INDENT}inputObjectField('{}', {}",
        field.wire_name,
        render_type(&field.ty, config, self_owner)
    );
    if let Some(description) = &field.description {
        let _ = write!(out, ", description: '{}'", escape(description));
    }
    if let Some(deprecation) = &field.deprecation {
        let _ = write!(out, ", deprecationReason: '{}'", escape(deprecation));
    }
    let _ = writeln!(out, "),");
}

pub(crate) fn render_union(
    descriptor: &UnionDescriptor,
    declared_name: &str,
    config: &SynthesisConfig,
) -> GeneratedUnit {
    let binding_name = binding_name_for(&descriptor.type_name);
    let mut out = String::new();
    doc_comment(&mut out, declared_name);

    let members = descriptor
        .members
        .iter()
        .map(|name| binding_name_for(&graphql_type_name_for(name, false, config.type_prefix.as_deref())))
        .join(", ");
    let _ = writeln!(out, "final {binding_name} = GraphQLUnionType(");
    let _ = writeln!(out, "{INDENT}'{}',", descriptor.type_name);
    let _ = writeln!(out, "{INDENT}[{members}],");
    let _ = writeln!(out, ");");

    GeneratedUnit {
        binding_name,
        source_name: declared_name.to_owned(),
        source: out,
    }
}

pub(crate) fn render_enum(
    descriptor: &EnumTypeDescriptor,
    declared_name: &str,
    config: &SynthesisConfig,
) -> GeneratedUnit {
    let binding_name = binding_name_for(&descriptor.type_name);
    let mut out = String::new();
    doc_comment(&mut out, declared_name);

    match config.enum_representation {
        EnumRepresentation::WireStrings => {
            let _ = writeln!(out, "final {binding_name} = enumTypeFromStrings('{}', [", descriptor.type_name);
            for value in &descriptor.values {
                let _ = writeln!(out, "{INDENT}'{}',", value.wire_name);
            }
            match &descriptor.description {
                Some(description) => {
                    let _ = writeln!(out, "], description: '{}');", escape(description));
                }
                None => {
                    let _ = writeln!(out, "]);");
                }
            }
        }
        EnumRepresentation::Constants => {
            let _ = writeln!(out, "final {binding_name} = GraphQLEnumType(");
            let _ = writeln!(out, "{INDENT}'{}',", descriptor.type_name);
            let _ = writeln!(out, "{INDENT}[");
            for value in &descriptor.values {
                let backing = match &value.backing {
                    BackingValue::Name(name) => format!("'{}'", escape(name)),
                    BackingValue::Constant { enum_name, value } => format!("{enum_name}.{value}"),
                };
                let _ = write!(out, "{DOUBLE_INDENT}GraphQLEnumValue('{}', {backing}", value.wire_name);
                if let Some(description) = &value.description {
                    let _ = write!(out, ", description: '{}'", escape(description));
                }
                if let Some(deprecation) = &value.deprecation {
                    let _ = write!(out, ", deprecationReason: '{}'", escape(deprecation));
                }
                let _ = writeln!(out, "),");
            }
            let _ = writeln!(out, "{INDENT}],");
            if let Some(description) = &descriptor.description {
                let _ = writeln!(out, "{INDENT}description: '{}',", escape(description));
            }
            let _ = writeln!(out, ");");
        }
    }

    GeneratedUnit {
        binding_name,
        source_name: declared_name.to_owned(),
        source: out,
    }
}

/// Renders a schema-type expression. Inside a deferred input construction,
/// a reference back to the enclosing type renders as the in-progress `type`
/// binding.
fn render_type(ty: &SchemaType, config: &SynthesisConfig, self_owner: Option<&str>) -> String {
    let prefix = config.type_prefix.as_deref();
    match ty {
        SchemaType::Scalar(scalar) => scalar_binding(*scalar).to_owned(),
        SchemaType::List(inner) => format!("listOf({})", render_type(inner, config, self_owner)),
        SchemaType::NonNull(inner) => {
            format!("{}.nonNullable()", render_type(inner, config, self_owner))
        }
        SchemaType::Enum(name) => binding_name_for(name),
        SchemaType::Object(name) => binding_name_for(&graphql_type_name_for(name, false, prefix)),
        SchemaType::Union(name) => binding_name_for(&graphql_type_name_for(name, false, prefix)),
        SchemaType::Input(name) => {
            if self_owner == Some(name.as_str()) {
                "type".to_owned()
            } else {
                binding_name_for(&graphql_type_name_for(name, true, prefix))
            }
        }
        SchemaType::SelfRef => unreachable!("SelfRef never survives synthesis"),
    }
}

fn scalar_binding(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::String => "graphQLString",
        ScalarType::Int => "graphQLInt",
        ScalarType::Float => "graphQLFloat",
        ScalarType::Boolean => "graphQLBoolean",
        ScalarType::DateTime => "graphQLDate",
    }
}

/// The two-branch record-or-instance value accessor, as source text.
fn render_field_resolver(accessor: &FieldAccessor) -> String {
    let wire = &accessor.wire_name;
    let prop = &accessor.property_name;
    match &accessor.shape {
        AccessorShape::Plain => {
            format!("(obj, _) => obj is Map ? obj['{wire}'] : obj.{prop}")
        }
        AccessorShape::DateTime => {
            format!("(obj, _) => obj is Map ? parseGraphQLDate(obj['{wire}']) : obj.{prop}")
        }
        AccessorShape::Enum { enum_name, .. } => match accessor.enum_representation {
            EnumRepresentation::WireStrings => {
                format!("(obj, _) => obj is Map ? obj['{wire}'] : obj.{prop}?.name")
            }
            EnumRepresentation::Constants => format!(
                "(obj, _) => obj is Map ? enumValueByName({enum_name}.values, obj['{wire}']) : obj.{prop}?.name"
            ),
        },
        AccessorShape::EnumList { enum_name, .. } => match accessor.enum_representation {
            EnumRepresentation::WireStrings => format!(
                "(obj, _) => obj is Map ? obj['{wire}'] : obj.{prop}?.map((v) => v.name).toList()"
            ),
            EnumRepresentation::Constants => format!(
                "(obj, _) => obj is Map ? enumValuesByName({enum_name}.values, obj['{wire}']) : obj.{prop}?.map((v) => v.name).toList()"
            ),
        },
    }
}

fn render_method_resolver(accessor: &MethodAccessor) -> String {
    format!("(obj, args) => invokeResolver('{}', obj, args)", accessor.key)
}

fn doc_comment(out: &mut String, declared_name: &str) {
    let _ = writeln!(out, "/// Auto-generated from `{declared_name}`.");
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n")
}
