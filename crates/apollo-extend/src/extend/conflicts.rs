//! Fail-fast checks run while indexing and building.
//! Each returns the first violation it finds.

use super::error::ExtensionError;
use super::error::ReferenceSite;
use super::index::NewType;
use crate::ast;
use crate::schema::ExtendedType;
use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::schema::TypeKind;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// The kinds of types allowed at a reference site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpectedKind {
    Object,
    Interface,
    Input,
    Output,
}

impl ExpectedKind {
    fn accepts(self, kind: TypeKind) -> bool {
        match self {
            Self::Object => kind == TypeKind::Object,
            Self::Interface => kind == TypeKind::Interface,
            Self::Input => kind.is_input_type(),
            Self::Output => kind.is_output_type(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Object => "an object type",
            Self::Interface => "an interface type",
            Self::Input => "an input type",
            Self::Output => "an output type",
        }
    }
}

/// Returns the object type targeted by an extension clause
pub(crate) fn extension_target<'schema>(
    base: &'schema Schema,
    name: &Name,
    location: Option<NodeLocation>,
) -> Result<&'schema Node<ObjectType>, ExtensionError> {
    match base.types.get(name) {
        None => Err(ExtensionError::UnknownTargetType {
            name: name.clone(),
            location,
        }),
        Some(ExtendedType::Object(ty)) => Ok(ty),
        Some(other) => Err(ExtensionError::InvalidExtensionTarget {
            name: name.clone(),
            location,
            found: other.kind().describe(),
        }),
    }
}

/// Only `extend type` clauses are supported.
/// Other extension keywords are rejected after their target is checked.
pub(crate) fn extension_keyword(
    base: &Schema,
    clause: &Node<ast::OtherTypeExtension>,
) -> ExtensionError {
    match extension_target(base, &clause.name, clause.location()) {
        Err(err) => err,
        Ok(_) => ExtensionError::InvalidExtensionTarget {
            name: clause.name.clone(),
            location: clause.location(),
            found: clause.keyword.describe(),
        },
    }
}

/// A new type definition must not reuse the name of a base type,
/// nor of a new type defined earlier in the same document.
pub(crate) fn new_type_name(
    base: &Schema,
    defined: &IndexMap<Name, NewType>,
    name: &Name,
    location: Option<NodeLocation>,
) -> Result<(), ExtensionError> {
    let previous_location = if let Some(previous) = base.types.get(name) {
        previous.location()
    } else if let Some(previous) = defined.get(name) {
        previous.location()
    } else {
        return Ok(());
    };
    Err(ExtensionError::TypeAlreadyExists {
        name: name.clone(),
        location,
        previous_location,
    })
}

/// `directives` contains base directives followed by those added so far
pub(crate) fn new_directive_name(
    directives: &IndexMap<Name, Node<ast::DirectiveDefinition>>,
    definition: &Node<ast::DirectiveDefinition>,
) -> Result<(), ExtensionError> {
    match directives.get(&definition.name) {
        Some(previous) => Err(ExtensionError::DirectiveRedefinition {
            name: definition.name.clone(),
            location: definition.location(),
            previous_location: previous.location(),
        }),
        None => Ok(()),
    }
}

/// Also used for enum values and input fields, which share the field namespace of their type
pub(crate) fn new_field<V>(
    type_name: &Name,
    existing: &IndexMap<Name, Node<V>>,
    field: &Name,
    location: Option<NodeLocation>,
) -> Result<(), ExtensionError> {
    match existing.get(field) {
        Some(previous) => Err(ExtensionError::DuplicateField {
            type_name: type_name.clone(),
            field: field.clone(),
            location,
            previous_location: previous.location(),
        }),
        None => Ok(()),
    }
}

pub(crate) fn new_interface(
    type_name: &Name,
    existing: &IndexSet<Name>,
    interface: &Name,
    location: Option<NodeLocation>,
) -> Result<(), ExtensionError> {
    if existing.contains(interface) {
        Err(ExtensionError::DuplicateInterfaceImplementation {
            type_name: type_name.clone(),
            interface: interface.clone(),
            location,
        })
    } else {
        Ok(())
    }
}

/// A type reference must name a type of a kind allowed at its site
pub(crate) fn reference_kind(
    name: &Name,
    found: TypeKind,
    expected: ExpectedKind,
    location: Option<NodeLocation>,
    site: impl FnOnce() -> ReferenceSite,
) -> Result<(), ExtensionError> {
    if expected.accepts(found) {
        Ok(())
    } else {
        Err(ExtensionError::UnexpectedTypeKind {
            name: name.clone(),
            site: site(),
            location,
            found,
            expected: expected.describe(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name;

    #[test]
    fn expected_kinds() {
        assert!(ExpectedKind::Input.accepts(TypeKind::Enum));
        assert!(ExpectedKind::Input.accepts(TypeKind::InputObject));
        assert!(!ExpectedKind::Input.accepts(TypeKind::Object));
        assert!(ExpectedKind::Output.accepts(TypeKind::Union));
        assert!(!ExpectedKind::Output.accepts(TypeKind::InputObject));
        assert!(!ExpectedKind::Interface.accepts(TypeKind::Object));
    }

    #[test]
    fn extension_target_of_builtin_scalar() {
        let schema = Schema::new();
        let err = extension_target(&schema, &name!("Int"), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot extend `Int`: only object types can be extended, found a scalar type"
        );
        let err = extension_target(&schema, &name!("Missing"), None).unwrap_err();
        assert!(matches!(err, ExtensionError::UnknownTargetType { .. }));
    }

    #[test]
    fn duplicate_interface() {
        let existing: IndexSet<Name> = [name!("Node")].into_iter().collect();
        assert!(new_interface(&name!("T"), &existing, &name!("Named"), None).is_ok());
        let err = new_interface(&name!("T"), &existing, &name!("Node"), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type `T` implements interface `Node` more than once"
        );
    }
}
