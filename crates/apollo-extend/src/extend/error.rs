use crate::diagnostic::Report;
use crate::diagnostic::ToDiagnostic;
use crate::schema::TypeKind;
use crate::Name;
use crate::NodeLocation;
use std::fmt;

/// The reason an extend operation was rejected.
///
/// Extending a schema stops at the first violation:
/// no partial schema is ever returned, and the base schema is left untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("the type `{name}` is defined multiple times")]
    TypeAlreadyExists {
        name: Name,
        location: Option<NodeLocation>,
        previous_location: Option<NodeLocation>,
    },

    #[error("cannot extend `{name}`: only object types can be extended, found {found}")]
    InvalidExtensionTarget {
        name: Name,
        location: Option<NodeLocation>,
        /// Describes either the extension clause or the existing type
        found: &'static str,
    },

    #[error("cannot extend type `{name}` because it does not exist")]
    UnknownTargetType {
        name: Name,
        location: Option<NodeLocation>,
    },

    #[error("duplicate definitions for the `{field}` field of type `{type_name}`")]
    DuplicateField {
        type_name: Name,
        field: Name,
        location: Option<NodeLocation>,
        previous_location: Option<NodeLocation>,
    },

    #[error("type `{type_name}` implements interface `{interface}` more than once")]
    DuplicateInterfaceImplementation {
        type_name: Name,
        interface: Name,
        location: Option<NodeLocation>,
    },

    #[error("{site} references unknown type `{name}`")]
    UnknownType {
        name: Name,
        site: ReferenceSite,
        location: Option<NodeLocation>,
    },

    #[error("the directive `@{name}` is defined multiple times")]
    DirectiveRedefinition {
        name: Name,
        location: Option<NodeLocation>,
        previous_location: Option<NodeLocation>,
    },

    #[error("{site} references `{name}`, which is {found}, but expected {expected}")]
    UnexpectedTypeKind {
        name: Name,
        site: ReferenceSite,
        location: Option<NodeLocation>,
        found: TypeKind,
        expected: &'static str,
    },
}

/// Where a type reference appears, for error messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSite {
    /// The result type of `type_name.field`
    Field { type_name: Name, field: Name },
    /// The type of `type_name.field(argument:)`
    Argument {
        type_name: Name,
        field: Name,
        argument: Name,
    },
    /// The type of an input object field
    InputField { type_name: Name, field: Name },
    /// The type of `@directive(argument:)`
    DirectiveArgument { directive: Name, argument: Name },
    /// An entry of the `implements` list of an object or interface type
    ImplementedInterface { type_name: Name },
    /// A member of a union type
    UnionMember { type_name: Name },
}

impl fmt::Display for ReferenceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { type_name, field } => write!(f, "field `{type_name}.{field}`"),
            Self::Argument {
                type_name,
                field,
                argument,
            } => write!(f, "argument `{type_name}.{field}({argument}:)`"),
            Self::InputField { type_name, field } => {
                write!(f, "input field `{type_name}.{field}`")
            }
            Self::DirectiveArgument {
                directive,
                argument,
            } => write!(f, "argument `@{directive}({argument}:)`"),
            Self::ImplementedInterface { type_name } => {
                write!(f, "the implements list of `{type_name}`")
            }
            Self::UnionMember { type_name } => write!(f, "union `{type_name}`"),
        }
    }
}

impl ExtensionError {
    /// The name of the type, field, or directive this error is about
    pub fn name(&self) -> &Name {
        match self {
            Self::TypeAlreadyExists { name, .. }
            | Self::InvalidExtensionTarget { name, .. }
            | Self::UnknownTargetType { name, .. }
            | Self::UnknownType { name, .. }
            | Self::DirectiveRedefinition { name, .. }
            | Self::UnexpectedTypeKind { name, .. } => name,
            Self::DuplicateField { field, .. } => field,
            Self::DuplicateInterfaceImplementation { interface, .. } => interface,
        }
    }
}

impl ToDiagnostic for ExtensionError {
    fn location(&self) -> Option<NodeLocation> {
        match self {
            Self::TypeAlreadyExists { location, .. }
            | Self::InvalidExtensionTarget { location, .. }
            | Self::UnknownTargetType { location, .. }
            | Self::DuplicateField { location, .. }
            | Self::DuplicateInterfaceImplementation { location, .. }
            | Self::UnknownType { location, .. }
            | Self::DirectiveRedefinition { location, .. }
            | Self::UnexpectedTypeKind { location, .. } => *location,
        }
    }

    fn report(&self, report: &mut Report) {
        report.message(self);
        match self {
            Self::TypeAlreadyExists {
                name,
                location,
                previous_location,
            } => {
                report.label(
                    *previous_location,
                    format_args!("previous definition of `{name}` here"),
                );
                report.label(*location, format_args!("`{name}` redefined here"));
                report.help("remove or rename one of the definitions, or use `extend`");
            }
            Self::InvalidExtensionTarget {
                location, found, ..
            } => {
                report.label(*location, format_args!("found {found}"));
            }
            Self::UnknownTargetType { location, .. } => {
                report.label(*location, "extension of an undefined type");
            }
            Self::DuplicateField {
                field,
                location,
                previous_location,
                ..
            } => {
                report.label(
                    *previous_location,
                    format_args!("previous definition of `{field}` here"),
                );
                report.label(*location, format_args!("`{field}` redefined here"));
            }
            Self::DuplicateInterfaceImplementation {
                interface,
                location,
                ..
            } => {
                report.label(
                    *location,
                    format_args!("`{interface}` is already implemented"),
                );
            }
            Self::UnknownType { name, location, .. } => {
                report.label(*location, format_args!("`{name}` is not defined"));
            }
            Self::DirectiveRedefinition {
                name,
                location,
                previous_location,
            } => {
                report.label(
                    *previous_location,
                    format_args!("previous definition of `@{name}` here"),
                );
                report.label(*location, format_args!("`@{name}` redefined here"));
            }
            Self::UnexpectedTypeKind {
                name,
                location,
                found,
                ..
            } => {
                report.label(*location, format_args!("`{name}` is {found}"));
            }
        }
    }
}
