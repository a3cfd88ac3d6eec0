use apollo_extend::ast::Definition;
use apollo_extend::ast::Document;
use apollo_extend::ast::ExtensionKeyword;
use apollo_extend::ast::IgnoredDefinition;
use apollo_extend::ast::Type;
use apollo_extend::Parser;
use pretty_assertions::assert_eq;

#[test]
fn token_limit() {
    let source = "type Query { a: Int b: Int c: Int }";
    let mut parser = Parser::new().token_limit(5);
    let errors = parser.parse_ast(source, "limited.graphql").unwrap_err();
    assert!(errors.errors.iter().any(|error| error.is_limit));

    let mut parser = Parser::new();
    parser.parse_ast(source, "unlimited.graphql").unwrap();
    assert!(parser.tokens_reached() > 5);
}

#[test]
fn recursion_limit() {
    // Executable definitions are skipped when extending, but still parsed
    let source = "query { a { b { c { d { e } } } } }";
    let mut parser = Parser::new().recursion_limit(2);
    let errors = parser.parse_ast(source, "deep.graphql").unwrap_err();
    assert!(errors.errors.iter().any(|error| error.is_limit));

    let mut parser = Parser::new();
    parser.parse_ast(source, "deep.graphql").unwrap();
    assert!(parser.recursion_reached() > 2);
}

#[test]
fn partial_document_on_syntax_error() {
    let errors = Document::parse("type A { a: Int } type B {", "partial.graphql").unwrap_err();
    assert_eq!(errors.partial.definitions[0].name().unwrap(), "A");
}

#[test]
fn type_references() {
    let document = Document::parse(
        "type T { a: Int, b: Int!, c: [Int], d: [Int!]!, e: [[T]!] }",
        "types.graphql",
    )
    .unwrap();
    let Definition::ObjectTypeDefinition(def) = &document.definitions[0] else {
        panic!("expected an object type definition")
    };
    let types: Vec<String> = def.fields.iter().map(|f| f.ty.to_string()).collect();
    assert_eq!(types, ["Int", "Int!", "[Int]", "[Int!]!", "[[T]!]"]);
    assert_eq!(
        *def.fields[3].ty,
        Type::NonNullList(Box::new(Type::NonNullNamed(apollo_extend::name!("Int"))))
    );
    assert_eq!(def.fields[4].ty.inner_named_type(), "T");
}

#[test]
fn extensions_are_kept_apart_from_definitions() {
    let document = Document::parse(
        "extend type Query implements Node & Named @key { a: Int }",
        "ext.graphql",
    )
    .unwrap();
    let Definition::ObjectTypeExtension(ext) = &document.definitions[0] else {
        panic!("expected an object type extension")
    };
    assert_eq!(ext.name, "Query");
    assert_eq!(ext.implements_interfaces, ["Node", "Named"]);
    assert!(ext.directives.has("key"));
    assert_eq!(ext.fields.len(), 1);
}

#[test]
fn interface_definitions_keep_implemented_interfaces() {
    let document = Document::parse(
        "interface Resource implements Node & Named { id: ID! }",
        "interfaces.graphql",
    )
    .unwrap();
    let Definition::InterfaceTypeDefinition(def) = &document.definitions[0] else {
        panic!("expected an interface type definition")
    };
    assert_eq!(def.implements_interfaces, ["Node", "Named"]);
    let location = def.implements_interfaces[1].location().unwrap();
    assert_eq!((location.offset(), location.end_offset()), (37, 42));
}

#[test]
fn other_extension_keywords_keep_their_target() {
    let document = Document::parse(
        "extend union SearchResult = Post\nquery { a }\nschema { query: Query }",
        "ext.graphql",
    )
    .unwrap();
    let Definition::OtherTypeExtension(ext) = &document.definitions[0] else {
        panic!("expected a non-object type extension")
    };
    assert_eq!(ext.keyword, ExtensionKeyword::Union);
    assert_eq!(ext.name, "SearchResult");
    assert!(matches!(
        &document.definitions[1],
        Definition::Ignored(def) if matches!(**def, IgnoredDefinition::Operation { name: None })
    ));
    assert!(matches!(&document.definitions[2], Definition::Ignored(_)));
}
