use super::base_schema;
use super::parse;
use apollo_extend::ast::Document;
use apollo_extend::ast::OperationType;
use apollo_extend::extend_schema;
use apollo_extend::name;
use apollo_extend::schema::ExtendedType;
use apollo_extend::schema::JsonValue;
use apollo_extend::Resolver;
use apollo_extend::Schema;
use apollo_extend::SchemaExtender;
use expect_test::expect;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use unindent::unindent;

const BASE: &str = r#"
    type Query {
      me: User
    }

    type User implements Node {
      id: ID!
    }

    interface Node {
      id: ID!
    }

    interface Named {
      name: String
    }
"#;

fn field_names(schema: &Schema, type_name: &str) -> Vec<String> {
    match &schema.types[type_name] {
        ExtendedType::Object(ty) => ty.fields.keys().map(|name| name.to_string()).collect(),
        ExtendedType::Interface(ty) => ty.fields.keys().map(|name| name.to_string()).collect(),
        _ => panic!("`{type_name}` has no fields"),
    }
}

#[test]
fn empty_document_returns_the_base_schema() {
    let base = base_schema(BASE);
    let extended = extend_schema(&base, &Document::new()).unwrap();
    assert!(Arc::ptr_eq(&base, &extended));
}

#[test]
fn executable_definitions_only_return_the_base_schema() {
    let base = base_schema(BASE);
    let document = parse(
        r#"
        query GetMe { me { id } }
        fragment UserFields on User { id }
        schema { query: Query }
        "#,
    );
    let extended = extend_schema(&base, &document).unwrap();
    assert!(Arc::ptr_eq(&base, &extended));
}

#[test]
fn extension_leaves_base_unchanged() {
    let base = base_schema(BASE);
    let printed_before = base.to_string();
    let document = parse(
        r#"
        extend type User implements Named { name: String }
        type Post { title: String }
        directive @tag on OBJECT
        "#,
    );
    let extended = extend_schema(&base, &document).unwrap();
    assert!(!Arc::ptr_eq(&base, &extended));
    assert_eq!(base.to_string(), printed_before);
    assert!(base.type_field("User", "name").is_none());
    assert!(!base.types.contains_key("Post"));
    assert!(!base.directive_definitions.contains_key("tag"));
    assert!(extended.type_field("User", "name").is_some());
}

#[test]
fn added_fields_come_after_base_fields() {
    let base = base_schema(BASE);
    let document = parse(
        r#"
        extend type User { name: String, email: String }
        extend type User { age: Int }
        "#,
    );
    let extended = extend_schema(&base, &document).unwrap();
    assert_eq!(field_names(&extended, "User"), ["id", "name", "email", "age"]);
    assert_eq!(field_names(&base, "User"), ["id"]);
}

#[test]
fn new_types_are_appended_in_document_order() {
    let base = base_schema(BASE);
    let document = parse(
        r#"
        type Zebra { stripes: Int }
        enum Animal { ZEBRA }
        scalar Date
        "#,
    );
    let extended = extend_schema(&base, &document).unwrap();
    let names: Vec<_> = extended
        .types
        .values()
        .filter(|ty| !ty.is_built_in())
        .map(|ty| ty.name().as_str())
        .collect();
    assert_eq!(
        names,
        ["Query", "User", "Node", "Named", "Zebra", "Animal", "Date"]
    );
}

#[test]
fn unextended_types_are_shared() {
    let base = base_schema(BASE);
    let document = parse("extend type User { name: String }");
    let extended = extend_schema(&base, &document).unwrap();
    assert!(base.types["Query"].ptr_eq(&extended.types["Query"]));
    assert!(base.types["Node"].ptr_eq(&extended.types["Node"]));
    assert!(base.types["Int"].ptr_eq(&extended.types["Int"]));
    assert!(!base.types["User"].ptr_eq(&extended.types["User"]));
    for (name, def) in &base.directive_definitions {
        assert!(def.ptr_eq(&extended.directive_definitions[name]));
    }
    // Fields copied from the base type are shared too
    let base_id = base.type_field("User", "id").unwrap();
    let extended_id = extended.type_field("User", "id").unwrap();
    assert!(base_id.ptr_eq(extended_id));
}

#[test]
fn self_referencing_types_terminate() {
    let base = base_schema(BASE);
    let document = parse(
        r#"
        extend type User { friends: [User!]!, bestFriend: User }
        type Foo { foos: [Foo]!, bar: Bar }
        type Bar { foo: Foo, bars(other: [Int]): [Bar] }
        "#,
    );
    let extended = extend_schema(&base, &document).unwrap();
    let foos = extended.type_field("Foo", "foos").unwrap();
    assert_eq!(foos.ty.to_string(), "[Foo]!");
    let resolved = extended.resolve_type(&foos.ty).unwrap();
    assert!(resolved.ptr_eq(&extended.types["Foo"]));
    let bar = extended.type_field("Foo", "bar").unwrap();
    assert_eq!(extended.resolve_type(&bar.ty).unwrap().name(), "Bar");
    let friends = extended.type_field("User", "friends").unwrap();
    assert!(extended
        .resolve_type(&friends.ty)
        .unwrap()
        .ptr_eq(&extended.types["User"]));
}

#[test]
fn new_types_may_reference_each_other_in_any_order() {
    let base = base_schema(BASE);
    let document = parse(
        r#"
        extend type Query { feed: Feed }
        type Feed { items: [FeedItem!]! }
        union FeedItem = Post | Photo
        type Post implements Node { id: ID! }
        type Photo implements Node { id: ID!, url: Url }
        scalar Url
        "#,
    );
    let extended = extend_schema(&base, &document).unwrap();
    let union_type = extended.get_union("FeedItem").unwrap();
    let members: Vec<_> = union_type.members.iter().map(|m| m.as_str()).collect();
    assert_eq!(members, ["Post", "Photo"]);
    assert!(extended.get_scalar("Url").is_some());
}

#[test]
fn interfaces_accumulate_across_clauses() {
    let base = base_schema(BASE);
    let document = parse(
        r#"
        extend type User implements Named { name: String }
        interface Aged { age: Int }
        extend type User implements Aged { age: Int }
        "#,
    );
    let extended = extend_schema(&base, &document).unwrap();
    let user = extended.get_object("User").unwrap();
    let interfaces: Vec<_> = user
        .implements_interfaces
        .iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(interfaces, ["Node", "Named", "Aged"]);
}

#[test]
fn new_interfaces_keep_their_implemented_interfaces() {
    let base = base_schema(BASE);
    let document = parse(
        r#"
        interface Resource implements Node & Named { id: ID!, name: String, url: Url }
        interface Url implements Resource & Node & Named { id: ID!, name: String, url: Url }
        "#,
    );
    let extended = extend_schema(&base, &document).unwrap();
    let interfaces = |name: &str| -> Vec<String> {
        extended
            .get_interface(name)
            .unwrap()
            .implements_interfaces
            .iter()
            .map(|name| name.to_string())
            .collect()
    };
    assert_eq!(interfaces("Resource"), ["Node", "Named"]);
    assert_eq!(interfaces("Url"), ["Resource", "Node", "Named"]);
    assert!(extended
        .to_string()
        .contains("interface Url implements Resource & Node & Named {"));
}

#[test]
fn extension_directives_are_appended() {
    let base = base_schema(
        r#"
        directive @cache on OBJECT
        directive @key(fields: String!) repeatable on OBJECT
        type Query @cache { a: Int }
        "#,
    );
    let document = parse(r#"extend type Query @key(fields: "a") { b: Int }"#);
    let extended = extend_schema(&base, &document).unwrap();
    let directives: Vec<_> = extended.types["Query"]
        .directives()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(directives, ["cache", "key"]);
}

#[test]
fn extended_root_is_used_for_operations() {
    let base = base_schema(BASE);
    let document = parse("extend type Query { version: String }");
    let extended = extend_schema(&base, &document).unwrap();
    assert_eq!(
        extended.root_operation(OperationType::Query),
        Some(&name!("Query"))
    );
    let query = extended
        .root_operation_object(OperationType::Query)
        .unwrap();
    assert!(query.fields.contains_key("version"));
    assert!(extended.root_operation(OperationType::Mutation).is_none());
}

#[test]
fn enum_values_have_internal_values() {
    let base = base_schema(BASE);
    let document = parse("enum Color { RED GREEN }");
    let extended = extend_schema(&base, &document).unwrap();
    let color = extended.get_enum("Color").unwrap();
    assert_eq!(
        color.values["RED"].internal_value,
        JsonValue::String("RED".into())
    );
}

#[test]
fn resolvers_are_kept_and_assigned() {
    let base_resolver = Resolver::new("base");
    let added_resolver = Resolver::new("added");
    let special_resolver = Resolver::new("special");

    let base_document = Document::parse(BASE, "base.graphql").unwrap();
    let base = SchemaExtender::new()
        .default_resolver(base_resolver.clone())
        .extend(&Arc::new(Schema::new()), &base_document)
        .unwrap();

    let document = parse("extend type User { name: String, avatar: String }");
    let extended = SchemaExtender::new()
        .default_resolver(added_resolver.clone())
        .field_resolver(name!("User"), name!("avatar"), special_resolver.clone())
        .extend(&base, &document)
        .unwrap();

    let resolver = |field: &str| {
        extended
            .type_field("User", field)
            .unwrap()
            .resolver
            .clone()
    };
    assert_eq!(resolver("id"), Some(base_resolver));
    assert_eq!(resolver("name"), Some(added_resolver));
    assert_eq!(resolver("avatar"), Some(special_resolver));
}

#[test]
fn extended_schema_can_be_extended_again() {
    let base = base_schema(BASE);
    let first = extend_schema(&base, &parse("extend type User { name: String }")).unwrap();
    let second = extend_schema(&first, &parse("extend type User { age: Int }")).unwrap();
    assert_eq!(field_names(&second, "User"), ["id", "name", "age"]);
    assert_eq!(field_names(&first, "User"), ["id", "name"]);
}

#[test]
fn printed_extended_schema() {
    let base = base_schema(BASE);
    let document = parse(&unindent(
        r#"
        extend type User implements Named @tag {
          name: String
          friends(first: Int = 10): [User!]!
        }

        extend type Query {
          search(filter: Filter): [Result!]
        }

        union Result = User | Post

        type Post implements Node {
          id: ID!
          author: User
        }

        input Filter {
          text: String
        }

        directive @tag on OBJECT
        "#,
    ));
    let extended = extend_schema(&base, &document).unwrap();
    expect![[r#"
        directive @tag on OBJECT

        type Query {
          me: User
          search(filter: Filter): [Result!]
        }

        type User implements Node & Named @tag {
          id: ID!
          name: String
          friends(first: Int = 10): [User!]!
        }

        interface Node {
          id: ID!
        }

        interface Named {
          name: String
        }

        union Result = User | Post

        type Post implements Node {
          id: ID!
          author: User
        }

        input Filter {
          text: String
        }
    "#]]
    .assert_eq(&extended.to_string());
}
