use super::builder::TypeGraphBuilder;
use super::conflicts;
use super::conflicts::ExpectedKind;
use super::error::ExtensionError;
use super::error::ReferenceSite;
use crate::ast::DirectiveDefinition;
use crate::Name;
use crate::Node;
use indexmap::IndexMap;

/// Returns base directives, unchanged and in their original order,
/// followed by directives newly defined in the extension document.
///
/// Argument types of new directives are resolved through `builder`,
/// so they may refer to types defined in the same document.
pub(crate) fn extend_directives(
    base: &IndexMap<Name, Node<DirectiveDefinition>>,
    new_directives: &[Node<DirectiveDefinition>],
    builder: &mut TypeGraphBuilder<'_>,
) -> Result<IndexMap<Name, Node<DirectiveDefinition>>, ExtensionError> {
    let mut directives = IndexMap::with_capacity(base.len() + new_directives.len());
    directives.extend(base.iter().map(|(name, def)| (name.clone(), def.clone())));
    for def in new_directives {
        conflicts::new_directive_name(&directives, def)?;
        for argument in &def.arguments {
            builder.reference(
                argument.ty.inner_named_type(),
                argument.ty.location(),
                ExpectedKind::Input,
                || ReferenceSite::DirectiveArgument {
                    directive: def.name.clone(),
                    argument: argument.name.clone(),
                },
            )?;
        }
        tracing::trace!(name = %def.name, "added directive");
        directives.insert(def.name.clone(), def.clone());
    }
    Ok(directives)
}
