use graphql_declgen::*;
use pretty_assertions::assert_eq;

fn synthesize_output(
    decls: &DeclarationSet,
    class: &ClassDecl,
    config: &SynthesisConfig,
    registry: &mut DescriptorRegistry,
) -> GeneratedUnit {
    synthesize(
        decls,
        GenerationRequest {
            target: GenerationTarget::OutputType(class),
            naming: &CaseConvention::Preserve,
        },
        config,
        registry,
    )
    .into_result()
    .expect("synthesis must succeed")
}

#[test]
fn scalar_fields_wrap_non_null_from_source_nullability() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("User");
    class.markers.output_type = true;
    class.fields.push(FieldDecl::new("id", TypeRef::non_null("String")));
    class.fields.push(FieldDecl::new("nickname", TypeRef::nullable("String")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    synthesize_output(&decls, &class, &SynthesisConfig::default(), &mut registry);

    let descriptor = registry.object("User").unwrap();
    assert_eq!(
        descriptor.fields[0].ty,
        SchemaType::Scalar(ScalarType::String).non_null()
    );
    assert_eq!(descriptor.fields[1].ty, SchemaType::Scalar(ScalarType::String));
}

#[test]
fn type_name_and_binding_follow_the_derivation_rule() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("PrefixUser");
    class.markers.output_type = true;
    class.fields.push(FieldDecl::new("id", TypeRef::non_null("String")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let unit = synthesize_output(
        &decls,
        &class,
        &SynthesisConfig::with_type_prefix("Prefix"),
        &mut registry,
    );

    assert_eq!(unit.binding_name, "userGraphQLType");
    assert_eq!(registry.object("PrefixUser").unwrap().type_name, "_User");
}

#[test]
fn generated_unit_is_deterministic_text() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("PrefixUser");
    class.markers.output_type = true;
    class.fields.push(FieldDecl::new("id", TypeRef::non_null("String")));
    class.fields.push(FieldDecl::new(
        "tags",
        TypeRef::nullable(ITERABLE).with_args(vec![TypeRef::non_null("String")]),
    ));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let unit = synthesize_output(
        &decls,
        &class,
        &SynthesisConfig::with_type_prefix("Prefix"),
        &mut registry,
    );

    let expected = "\
/// Auto-generated from `PrefixUser`.
final userGraphQLType = objectType(
  '_User',
  fields: [
    field('id', graphQLString.nonNullable(), resolve: (obj, _) => obj is Map ? obj['id'] : obj.id),
    field('tags', listOf(graphQLString.nonNullable()), resolve: (obj, _) => obj is Map ? obj['tags'] : obj.tags),
  ],
);
";
    assert_eq!(unit.source, expected);
}

#[test]
fn interfaces_are_filtered_to_output_marked_ones() {
    let mut decls = DeclarationSet::new();

    let mut node = ClassDecl::new("Node");
    node.is_abstract = true;
    node.markers.output_type = true;
    node.fields.push(FieldDecl::new("id", TypeRef::non_null("String")));
    decls.push_class(node);

    // Implemented, but not marked: must not appear among interfaces.
    let mut comparable = ClassDecl::new("Comparable");
    comparable.is_abstract = true;
    decls.push_class(comparable);

    let mut class = ClassDecl::new("User");
    class.markers.output_type = true;
    class.interfaces = vec!["Node".into(), "Comparable".into()];
    class.fields.push(FieldDecl::new("id", TypeRef::non_null("String")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    synthesize_output(&decls, &class, &SynthesisConfig::default(), &mut registry);

    let descriptor = registry.object("User").unwrap();
    assert_eq!(descriptor.interfaces, vec!["Node".to_owned()]);
    assert!(!descriptor.is_interface);

    let node = decls.class("Node").unwrap().clone();
    synthesize_output(&decls, &node, &SynthesisConfig::default(), &mut registry);
    assert!(registry.object("Node").unwrap().is_interface);
}

#[test]
fn inherited_fields_come_after_own_and_shadowing_holds() {
    let mut decls = DeclarationSet::new();

    let mut base = ClassDecl::new("Base");
    base.markers.output_type = true;
    base.fields.push(FieldDecl::new("a", TypeRef::non_null("Int")));
    base.fields.push(FieldDecl::new("b", TypeRef::non_null("Int")));
    decls.push_class(base);

    let mut sub = ClassDecl::new("Sub");
    sub.supertype = Some("Base".into());
    sub.fields.push(FieldDecl::new("b", TypeRef::non_null("String")));
    sub.fields.push(FieldDecl::new("c", TypeRef::non_null("Int")));
    let sub = decls.push_class(sub).clone();

    let mut registry = DescriptorRegistry::new();
    // The subclass inherits the output marker from its annotated base.
    synthesize_output(&decls, &sub, &SynthesisConfig::default(), &mut registry);

    let descriptor = registry.object("Sub").unwrap();
    let wire_order: Vec<_> = descriptor.fields.iter().map(|f| f.wire_name.as_str()).collect();
    assert_eq!(wire_order, ["b", "c", "a"]);
    // The subclass's `b` won: it is a String now.
    assert_eq!(
        descriptor.fields[0].ty,
        SchemaType::Scalar(ScalarType::String).non_null()
    );
}

#[test]
fn resolver_methods_become_trailing_fields_with_dispatch_keys() {
    let mut decls = DeclarationSet::new();

    let mut class = ClassDecl::new("User");
    class.markers.output_type = true;
    class.fields.push(FieldDecl::new("name", TypeRef::non_null("String")));

    let mut method = MethodDecl::new(
        "greeting",
        TypeRef::non_null(ASYNC_WRAPPER).with_args(vec![TypeRef::non_null("String")]),
    );
    method.is_resolver = true;
    method
        .params
        .push(("salutation".into(), TypeRef::non_null("String")));
    class.methods.push(method);

    // Not resolver-marked: never becomes a field.
    class
        .methods
        .push(MethodDecl::new("helper", TypeRef::non_null("String")));

    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let unit = synthesize_output(&decls, &class, &SynthesisConfig::default(), &mut registry);

    let descriptor = registry.object("User").unwrap();
    assert_eq!(descriptor.method_fields.len(), 1);
    let method = &descriptor.method_fields[0];
    // The future wrapper is unwrapped before inference.
    assert_eq!(method.ty, SchemaType::Scalar(ScalarType::String).non_null());
    assert_eq!(method.accessor.key, "User.greeting");
    assert_eq!(method.args.len(), 1);
    assert_eq!(method.args[0].name, "salutation");

    assert!(unit
        .source
        .contains("resolve: (obj, args) => invokeResolver('User.greeting', obj, args)"));
    // Methods come after fields in the emitted sequence.
    let name_at = unit.source.find("field('name'").unwrap();
    let greeting_at = unit.source.find("field('greeting'").unwrap();
    assert!(name_at < greeting_at);
}

#[test]
fn wire_names_respect_explicit_rename_over_naming_context() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("User");
    class.markers.output_type = true;
    class.fields.push(FieldDecl::new("fullName", TypeRef::non_null("String")));
    let mut renamed = FieldDecl::new("shortName", TypeRef::non_null("String"));
    renamed.wire_name = Some("sname".into());
    class.fields.push(renamed);
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let result = synthesize(
        &decls,
        GenerationRequest {
            target: GenerationTarget::OutputType(&class),
            naming: &CaseConvention::Snake,
        },
        &SynthesisConfig::default(),
        &mut registry,
    );
    result.into_result().unwrap();

    let descriptor = registry.object("User").unwrap();
    assert_eq!(descriptor.fields[0].wire_name, "full_name");
    assert_eq!(descriptor.fields[1].wire_name, "sname");
}

#[test]
fn fields_excluded_from_output_are_skipped() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("User");
    class.markers.output_type = true;
    let mut hidden = FieldDecl::new("secret", TypeRef::non_null("String"));
    hidden.in_output = false;
    class.fields.push(hidden);
    class.fields.push(FieldDecl::new("name", TypeRef::non_null("String")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    synthesize_output(&decls, &class, &SynthesisConfig::default(), &mut registry);

    let descriptor = registry.object("User").unwrap();
    let wire_order: Vec<_> = descriptor.fields.iter().map(|f| f.wire_name.as_str()).collect();
    assert_eq!(wire_order, ["name"]);
}

#[test]
fn unresolvable_field_type_fails_the_declaration_atomically() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("Broken");
    class.markers.output_type = true;
    class.fields.push(FieldDecl::new("what", TypeRef::non_null("Mystery")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let result = synthesize(
        &decls,
        GenerationRequest {
            target: GenerationTarget::OutputType(&class),
            naming: &CaseConvention::Preserve,
        },
        &SynthesisConfig::default(),
        &mut registry,
    );

    assert_eq!(
        result.into_result().unwrap_err(),
        SynthesisError::TypeInference {
            owner: "Broken".into(),
            member: "what".into(),
            type_name: "Mystery".into(),
        }
    );
    assert!(registry.object("Broken").is_none());
}

#[test]
fn generated_part_collects_units_under_one_header() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("User");
    class.markers.output_type = true;
    class.fields.push(FieldDecl::new("id", TypeRef::non_null("String")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let unit = synthesize_output(&decls, &class, &SynthesisConfig::default(), &mut registry);

    let mut part = GeneratedPart::new();
    part.append(unit);
    let source = part.to_source();
    assert!(source.starts_with("// This is a generated file."));
    assert!(source.contains("final userGraphQLType = objectType("));
}
