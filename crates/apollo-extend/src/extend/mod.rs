//! Extending an existing [`Schema`] with type extensions and new definitions.
//!
//! ```rust
//! use apollo_extend::ast::Document;
//! use apollo_extend::Schema;
//! use std::sync::Arc;
//!
//! let base = Document::parse("type Query { hello: String }", "base.graphql").unwrap();
//! let base = apollo_extend::extend_schema(&Arc::new(Schema::new()), &base).unwrap();
//!
//! let extension = Document::parse(
//!     "extend type Query { greeting: Greeting } type Greeting { text: String }",
//!     "extension.graphql",
//! )
//! .unwrap();
//! let extended = apollo_extend::extend_schema(&base, &extension).unwrap();
//!
//! assert!(extended.type_field("Query", "greeting").is_some());
//! assert!(base.type_field("Query", "greeting").is_none());
//! ```

use crate::ast::Document;
use crate::schema::Resolver;
use crate::schema::Schema;
use crate::Name;
use indexmap::IndexMap;
use std::sync::Arc;

mod builder;
mod conflicts;
mod directives;
mod error;
mod index;

pub use self::error::ExtensionError;
pub use self::error::ReferenceSite;

/// Configuration for extending a schema
///
/// Resolvers configured here are attached to fields added by the extension document:
/// fields of new object and interface types, and fields added by `extend type` clauses.
/// Fields already present in the base schema keep their resolver.
#[derive(Debug, Clone, Default)]
pub struct SchemaExtender {
    field_resolvers: IndexMap<Name, IndexMap<Name, Resolver>>,
    default_resolver: Option<Resolver>,
}

/// Returns a new schema made of `base` and the type system definitions of `document`,
/// with the default configuration.
///
/// See [`SchemaExtender::extend`].
pub fn extend_schema(base: &Arc<Schema>, document: &Document) -> Result<Arc<Schema>, ExtensionError> {
    SchemaExtender::new().extend(base, document)
}

impl SchemaExtender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `resolver` to the field `type_name.field_name` if the extension document adds it
    pub fn field_resolver(mut self, type_name: Name, field_name: Name, resolver: Resolver) -> Self {
        self.field_resolvers
            .entry(type_name)
            .or_default()
            .insert(field_name, resolver);
        self
    }

    /// Attach `resolver` to added fields that have no resolver configured
    /// with [`field_resolver`][Self::field_resolver]
    pub fn default_resolver(mut self, resolver: Resolver) -> Self {
        self.default_resolver = Some(resolver);
        self
    }

    /// Returns a new schema made of `base` and the type system definitions of `document`.
    ///
    /// * Object types of `base` can be extended with `extend type`,
    ///   adding fields, implemented interfaces, and directive applications.
    /// * New types and directives can be defined.
    /// * Other definitions (operations, fragments, `schema` definitions) are ignored.
    ///
    /// `base` is never modified. If `document` contains nothing that would change it,
    /// the returned `Arc` points to `base` itself.
    /// Otherwise, base types that are not extended are shared with the new schema.
    ///
    /// Stops at the first invalid definition or reference and returns it as an error.
    pub fn extend(
        &self,
        base: &Arc<Schema>,
        document: &Document,
    ) -> Result<Arc<Schema>, ExtensionError> {
        let index = index::ExtensionIndex::new(base, document)?;
        if index.is_empty() {
            tracing::debug!("no type system definition to apply, reusing base schema");
            return Ok(Arc::clone(base));
        }
        self.assemble(base, document, &index).map(Arc::new)
    }

    /// Like `extend`, but always builds a new schema
    pub(crate) fn extend_owned(
        &self,
        base: &Schema,
        document: &Document,
    ) -> Result<Schema, ExtensionError> {
        let index = index::ExtensionIndex::new(base, document)?;
        self.assemble(base, document, &index)
    }

    fn assemble(
        &self,
        base: &Schema,
        document: &Document,
        index: &index::ExtensionIndex,
    ) -> Result<Schema, ExtensionError> {
        tracing::debug!(
            extended_types = index.extensions.len(),
            new_types = index.new_types.len(),
            new_directives = index.new_directives.len(),
            "extending schema"
        );
        let mut builder = builder::TypeGraphBuilder::new(self, base, index);
        let directive_definitions = directives::extend_directives(
            &base.directive_definitions,
            &index.new_directives,
            &mut builder,
        )?;
        let types = builder.build_all()?;
        Ok(Schema {
            sources: base.sources_with(document),
            directive_definitions,
            types,
            query_type: base.query_type.clone(),
            mutation_type: base.mutation_type.clone(),
            subscription_type: base.subscription_type.clone(),
        })
    }

    pub(crate) fn resolver_for(&self, type_name: &Name, field_name: &Name) -> Option<Resolver> {
        self.field_resolvers
            .get(type_name)
            .and_then(|fields| fields.get(field_name))
            .or(self.default_resolver.as_ref())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name;

    #[test]
    fn resolver_lookup() {
        let specific = Resolver::new("specific");
        let fallback = Resolver::new("fallback");
        let config = SchemaExtender::new()
            .field_resolver(name!("Query"), name!("a"), specific.clone())
            .default_resolver(fallback.clone());
        assert_eq!(
            config.resolver_for(&name!("Query"), &name!("a")),
            Some(specific)
        );
        assert_eq!(
            config.resolver_for(&name!("Query"), &name!("b")),
            Some(fallback)
        );
        assert_eq!(
            SchemaExtender::new().resolver_for(&name!("Query"), &name!("a")),
            None
        );
    }
}
