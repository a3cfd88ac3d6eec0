mod concurrency;
mod diagnostics;
mod directives;
mod extend;
mod parser;

use apollo_extend::ast::Document;
use apollo_extend::name;
use apollo_extend::Schema;
use std::sync::Arc;

/// Builds a base schema from SDL, using `Query` as the query root if defined
fn base_schema(sdl: &str) -> Arc<Schema> {
    let document = Document::parse(sdl, "base.graphql").unwrap();
    let mut schema = apollo_extend::extend_schema(&Arc::new(Schema::new()), &document).unwrap();
    let schema_mut = Arc::make_mut(&mut schema);
    if schema_mut.get_object("Query").is_some() {
        schema_mut.query_type = Some(name!("Query"));
    }
    schema
}

fn parse(sdl: &str) -> Document {
    Document::parse(sdl, "extension.graphql").unwrap()
}
