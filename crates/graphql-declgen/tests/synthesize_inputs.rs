use graphql_declgen::*;
use pretty_assertions::assert_eq;

fn synthesize_input(
    decls: &DeclarationSet,
    class: &ClassDecl,
    registry: &mut DescriptorRegistry,
) -> Result<GeneratedUnit, SynthesisError> {
    synthesize(
        decls,
        GenerationRequest {
            target: GenerationTarget::InputType(class),
            naming: &CaseConvention::Preserve,
        },
        &SynthesisConfig::default(),
        registry,
    )
    .into_result()
}

#[test]
fn plain_input_uses_direct_construction() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("NewUserInput");
    class.markers.input_type = true;
    class.fields.push(FieldDecl::new("name", TypeRef::non_null("String")));
    class.fields.push(FieldDecl::new("age", TypeRef::nullable("Int")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let unit = synthesize_input(&decls, &class, &mut registry).unwrap();

    // An explicit `...Input` suffix is not doubled.
    let descriptor = registry.input_object("NewUserInput").unwrap();
    assert_eq!(descriptor.type_name, "_NewUserInput");
    assert_eq!(unit.binding_name, "newUserInputGraphQLType");
    assert_eq!(descriptor.fields.len(), 2);
    assert_eq!(
        descriptor.fields[0].ty,
        SchemaType::Scalar(ScalarType::String).non_null()
    );

    assert!(unit.source.contains("final newUserInputGraphQLType = inputObjectType("));
    // Direct construction, not the two-phase shape.
    assert!(!unit.source.contains("addAll"));
}

#[test]
fn self_referential_input_goes_through_deferred_construction() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("Category");
    class.markers.input_type = true;
    class.fields.push(FieldDecl::new("name", TypeRef::non_null("String")));
    class.fields.push(FieldDecl::new(
        "children",
        TypeRef::non_null(ITERABLE).with_args(vec![TypeRef::non_null("Category")]),
    ));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let unit = synthesize_input(&decls, &class, &mut registry).unwrap();

    let descriptor = registry.input_object("Category").unwrap();
    assert_eq!(
        descriptor.fields[1].ty,
        SchemaType::Input("Category".into()).non_null().list().non_null()
    );

    // The self-referential field's type resolves to the very descriptor it
    // is attached to: identity, not a copy.
    let resolved = registry.resolve_input_ref(&descriptor.fields[1].ty).unwrap();
    assert!(std::ptr::eq(resolved, descriptor));

    let expected = "\
/// Auto-generated from `Category`.
final categoryInputGraphQLType = (() {
  final type = inputObjectType('_CategoryInput', inputFields: []);
  type.inputFields.addAll([
    inputObjectField('name', graphQLString.nonNullable()),
    inputObjectField('children', listOf(type.nonNullable()).nonNullable()),
  ]);
  return type;
})();
";
    assert_eq!(unit.source, expected);
}

#[test]
fn field_of_exactly_own_type_also_defers() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("TreeNode");
    class.markers.input_type = true;
    class.fields.push(FieldDecl::new("value", TypeRef::non_null("Int")));
    class.fields.push(FieldDecl::new("parent", TypeRef::nullable("TreeNode")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    synthesize_input(&decls, &class, &mut registry).unwrap();

    let descriptor = registry.input_object("TreeNode").unwrap();
    // Nullable self-reference: no NonNull wrapper.
    assert_eq!(descriptor.fields[1].ty, SchemaType::Input("TreeNode".into()));
    let resolved = registry.resolve_input_ref(&descriptor.fields[1].ty).unwrap();
    assert!(std::ptr::eq(resolved, descriptor));
}

#[test]
fn failed_deferred_synthesis_leaves_no_descriptor_behind() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("Broken");
    class.markers.input_type = true;
    class.fields.push(FieldDecl::new("parent", TypeRef::nullable("Broken")));
    class.fields.push(FieldDecl::new("what", TypeRef::non_null("Mystery")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let error = synthesize_input(&decls, &class, &mut registry).unwrap_err();
    assert!(matches!(error, SynthesisError::TypeInference { .. }));

    // The reserved placeholder was rolled back.
    assert!(registry.input_object("Broken").is_none());
}

#[test]
fn union_references_are_rejected_in_input_fields() {
    let mut decls = DeclarationSet::new();
    let mut union = ClassDecl::new("SearchResult");
    union.markers.union = Some(UnionMarker {
        name: None,
        members: vec![TypeRef::non_null("User")],
    });
    decls.push_class(union);

    let mut class = ClassDecl::new("FilterInput");
    class.markers.input_type = true;
    class
        .fields
        .push(FieldDecl::new("scope", TypeRef::non_null("SearchResult")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let error = synthesize_input(&decls, &class, &mut registry).unwrap_err();
    assert!(matches!(error, SynthesisError::InvalidUsage { .. }));
    assert!(registry.input_object("FilterInput").is_none());
}

#[test]
fn input_fields_reference_other_input_types_by_name() {
    let mut decls = DeclarationSet::new();

    let mut address = ClassDecl::new("AddressInput");
    address.markers.input_type = true;
    address.fields.push(FieldDecl::new("street", TypeRef::non_null("String")));
    decls.push_class(address);

    let mut class = ClassDecl::new("NewUserInput");
    class.markers.input_type = true;
    class
        .fields
        .push(FieldDecl::new("address", TypeRef::non_null("AddressInput")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    let unit = synthesize_input(&decls, &class, &mut registry).unwrap();

    let descriptor = registry.input_object("NewUserInput").unwrap();
    assert_eq!(
        descriptor.fields[0].ty,
        SchemaType::Input("AddressInput".into()).non_null()
    );
    // Rendered as a reference to the sibling generated binding.
    assert!(unit
        .source
        .contains("inputObjectField('address', addressInputGraphQLType.nonNullable())"));
}

#[test]
fn input_fields_excluded_from_input_direction_are_skipped() {
    let mut decls = DeclarationSet::new();
    let mut class = ClassDecl::new("PatchInput");
    class.markers.input_type = true;
    let mut computed = FieldDecl::new("etag", TypeRef::non_null("String"));
    computed.in_input = false;
    class.fields.push(computed);
    class.fields.push(FieldDecl::new("name", TypeRef::nullable("String")));
    let class = decls.push_class(class).clone();

    let mut registry = DescriptorRegistry::new();
    synthesize_input(&decls, &class, &mut registry).unwrap();

    let descriptor = registry.input_object("PatchInput").unwrap();
    assert_eq!(descriptor.fields.len(), 1);
    assert_eq!(descriptor.fields[0].wire_name, "name");
}
