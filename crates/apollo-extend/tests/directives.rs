use super::base_schema;
use super::parse;
use apollo_extend::ast::DirectiveLocation;
use apollo_extend::ast::Value;
use apollo_extend::extend::ReferenceSite;
use apollo_extend::extend_schema;
use apollo_extend::name;
use apollo_extend::ExtensionError;
use apollo_extend::Schema;
use pretty_assertions::assert_eq;

#[test]
fn built_in_directives() {
    let schema = Schema::new();
    let names: Vec<_> = schema
        .directive_definitions
        .keys()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(names, ["include", "skip", "deprecated", "specifiedBy"]);
    assert!(schema
        .directive_definitions
        .values()
        .all(|def| def.is_built_in()));
}

#[test]
fn redefining_a_built_in_directive_fails() {
    let base = base_schema("type Query { a: Int }");
    let error = extend_schema(
        &base,
        &parse("directive @include(if: Boolean!) on FIELD"),
    )
    .unwrap_err();
    assert!(
        matches!(&error, ExtensionError::DirectiveRedefinition { name, .. } if name == "include"),
        "{error:?}"
    );
    assert_eq!(
        error.to_string(),
        "the directive `@include` is defined multiple times"
    );
}

#[test]
fn redefining_a_directive_added_earlier_fails() {
    let base = base_schema("type Query { a: Int }");
    let error = extend_schema(
        &base,
        &parse(
            "directive @tag(name: String!) on OBJECT
             directive @tag on FIELD_DEFINITION",
        ),
    )
    .unwrap_err();
    assert!(
        matches!(error, ExtensionError::DirectiveRedefinition { .. }),
        "{error:?}"
    );
}

#[test]
fn new_directive_is_retrievable() {
    let base = base_schema("type Query { a: Int }");
    let extended = extend_schema(
        &base,
        &parse(
            r#"
            "Attach a cache policy"
            directive @cacheControl(
              maxAge: Int = 60
              scope: CacheScope
            ) repeatable on FIELD_DEFINITION | OBJECT

            enum CacheScope { PUBLIC PRIVATE }
            "#,
        ),
    )
    .unwrap();
    let def = &extended.directive_definitions["cacheControl"];
    assert_eq!(def.description.as_deref(), Some("Attach a cache policy"));
    assert!(def.repeatable);
    assert_eq!(
        def.locations,
        [DirectiveLocation::FieldDefinition, DirectiveLocation::Object]
    );
    let arguments: Vec<_> = def
        .arguments
        .iter()
        .map(|arg| (arg.name.as_str(), arg.ty.to_string()))
        .collect();
    assert_eq!(
        arguments,
        [
            ("maxAge", "Int".to_owned()),
            ("scope", "CacheScope".to_owned())
        ]
    );
    let default_value = def.arguments[0].default_value.as_ref().unwrap();
    assert!(matches!(&**default_value, Value::Int(value) if value.as_str() == "60"));
    // Base directives come first, unchanged
    let names: Vec<_> = extended
        .directive_definitions
        .keys()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(
        names,
        ["include", "skip", "deprecated", "specifiedBy", "cacheControl"]
    );
}

#[test]
fn directive_argument_types_must_exist() {
    let base = base_schema("type Query { a: Int }");
    let error = extend_schema(&base, &parse("directive @tag(name: Label) on OBJECT")).unwrap_err();
    assert_eq!(
        error,
        ExtensionError::UnknownType {
            name: name!("Label"),
            site: ReferenceSite::DirectiveArgument {
                directive: name!("tag"),
                argument: name!("name"),
            },
            location: apollo_extend::diagnostic::ToDiagnostic::location(&error),
        }
    );
}

#[test]
fn directive_argument_types_must_be_input_types() {
    let base = base_schema("type Query { a: Int }");
    let error = extend_schema(&base, &parse("directive @tag(query: Query) on OBJECT")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "argument `@tag(query:)` references `Query`, which is an object type, but expected an input type"
    );
}

#[test]
fn directive_applications_are_not_validated() {
    let base = base_schema("type Query { a: Int }");
    let extended = extend_schema(
        &base,
        &parse("extend type Query @undefined(arg: [1, 2]) { b: Int @whatever }"),
    )
    .unwrap();
    let query = extended.get_object("Query").unwrap();
    assert!(query.directives.has("undefined"));
    assert!(query.fields["b"].directives.has("whatever"));
}
