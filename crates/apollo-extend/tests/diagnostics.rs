use super::base_schema;
use apollo_extend::ast::Document;
use apollo_extend::diagnostic::ResultExt;
use apollo_extend::diagnostic::ToDiagnostic;
use apollo_extend::extend_schema;

#[test]
fn extension_error_report() {
    let base = base_schema("type Query { a: Int }");
    let document = Document::parse("extend type Missing { b: Int }", "extension.graphql").unwrap();
    let diagnostic = extend_schema(&base, &document)
        .to_diagnostic(&document.sources)
        .unwrap_err();

    let line_column = diagnostic.line_column().unwrap();
    assert_eq!((line_column.line, line_column.column), (1, 1));

    let report = diagnostic.to_string();
    assert!(
        report.contains("cannot extend type `Missing` because it does not exist"),
        "{report}"
    );
    assert!(report.contains("extension.graphql"), "{report}");
    assert!(report.contains("extension of an undefined type"), "{report}");
}

#[test]
fn report_labels_previous_definition() {
    let base = base_schema("type Query { a: Int }");
    let document = Document::parse(
        "type Thing { a: Int }\ntype Thing { b: Int }",
        "extension.graphql",
    )
    .unwrap();
    let error = extend_schema(&base, &document).unwrap_err();
    let diagnostic = error.to_diagnostic(&document.sources);
    assert_eq!(diagnostic.line_column().unwrap().line, 2);
    let report = diagnostic.to_string();
    assert!(report.contains("previous definition of `Thing` here"), "{report}");
    assert!(report.contains("`Thing` redefined here"), "{report}");
}

#[test]
fn previous_definition_in_base_schema() {
    let base = base_schema("type Query { a: Int }");
    let document = Document::parse("extend type Query { a: String }", "extension.graphql").unwrap();
    let error = extend_schema(&base, &document).unwrap_err();

    let report = error.clone().to_diagnostic(&base.sources_with(&document)).to_string();
    assert!(report.contains("previous definition of `a` here"), "{report}");
    assert!(report.contains("`a` redefined here"), "{report}");
    assert!(report.contains("base.graphql"), "{report}");
    assert!(report.contains("extension.graphql"), "{report}");

    // Without the base sources, only the label in the extension document remains
    let report = error.to_diagnostic(&document.sources).to_string();
    assert!(report.contains("`a` redefined here"), "{report}");
    assert!(!report.contains("previous definition"), "{report}");
}

#[test]
fn extended_schema_keeps_every_source_file() {
    let base = base_schema("type Query { a: Int }");
    let document = Document::parse("extend type Query { b: Int }", "extension.graphql").unwrap();
    let extended = extend_schema(&base, &document).unwrap();

    let paths: Vec<_> = extended
        .sources
        .values()
        .map(|file| file.path().to_str().unwrap())
        .collect();
    assert_eq!(paths, ["built_in.graphql", "base.graphql", "extension.graphql"]);
    assert_eq!(extended.sources_with(&Document::new()).len(), 3);

    // A later error in a type added by this extension points into its file
    let next = Document::parse("extend type Query { b: String }", "next.graphql").unwrap();
    let report = extend_schema(&extended, &next)
        .to_diagnostic(&extended.sources_with(&next))
        .unwrap_err()
        .to_string();
    assert!(report.contains("extension.graphql"), "{report}");
    assert!(report.contains("next.graphql"), "{report}");
}

#[test]
fn syntax_errors() {
    let errors = Document::parse("type Query {", "broken.graphql").unwrap_err();
    assert!(!errors.errors.is_empty());
    let report = errors.to_string();
    assert!(report.contains("syntax error"), "{report}");
    assert!(report.contains("broken.graphql"), "{report}");
}

#[test]
fn built_in_locations() {
    let schema = apollo_extend::Schema::new();
    let location = schema.types["String"].location().unwrap();
    assert_eq!(location.file_id(), apollo_extend::FileId::BUILT_IN);
}
