use super::base_schema;
use super::parse;
use apollo_extend::extend_schema;
use std::thread;

#[test]
fn concurrent_extensions_of_the_same_base() {
    let base = base_schema("type Query { a: Int } type User { id: ID! }");
    let printed_base = base.to_string();
    let extended: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let base = &base;
                scope.spawn(move || {
                    let document = parse(&format!(
                        "extend type User {{ field{i}: Int }} type New{i} {{ user: User }}"
                    ));
                    extend_schema(base, &document).unwrap()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });
    for (i, schema) in extended.iter().enumerate() {
        let user = schema.get_object("User").unwrap();
        let fields: Vec<_> = user.fields.keys().map(|name| name.as_str()).collect();
        assert_eq!(fields, ["id".to_owned(), format!("field{i}")]);
        assert!(schema.types.contains_key(format!("New{i}").as_str()));
        assert!(base.types["Query"].ptr_eq(&schema.types["Query"]));
    }
    assert_eq!(base.to_string(), printed_base);
}
