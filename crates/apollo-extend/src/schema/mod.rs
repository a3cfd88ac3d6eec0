//! High-level representation of a GraphQL schema
//!
//! A [`Schema`] is an immutable value once built.
//! Types refer to each other by name, resolved through [`Schema::types`],
//! which lets the type graph contain cycles without ownership cycles.
//! Extending a schema with [`extend_schema`][crate::extend_schema] returns a new `Schema`
//! that shares every unmodified definition with the original through [`Node`] clones.

use crate::ast::Document;
use crate::Name;
use crate::Node;
use crate::SourceMap;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::sync::OnceLock;

mod deprecation;
mod resolver;
mod serialize;

pub use self::deprecation::Deprecation;
pub use self::deprecation::DEFAULT_DEPRECATION_REASON;
pub use self::resolver::Resolver;
pub use crate::ast::Directive;
pub use crate::ast::DirectiveDefinition;
pub use crate::ast::DirectiveList;
pub use crate::ast::DirectiveLocation;
pub use crate::ast::InputValueDefinition;
pub use crate::ast::NamedType;
pub use crate::ast::OperationType;
pub use crate::ast::Type;
pub use crate::ast::Value;

/// JSON value as produced for enum values, compatible with `serde_json_bytes`
pub type JsonValue = serde_json_bytes::Value;

/// High-level representation of a GraphQL schema
#[derive(Debug, Clone)]
pub struct Schema {
    /// Files the definitions of this schema were parsed from,
    /// including those of every schema it was extended from
    pub sources: SourceMap,

    /// Built-in and explicit directive definitions
    pub directive_definitions: IndexMap<Name, Node<DirectiveDefinition>>,

    /// Built-in scalars and explicit types
    pub types: IndexMap<NamedType, ExtendedType>,

    /// Name of the object type for the `query` root operation
    pub query_type: Option<NamedType>,

    /// Name of the object type for the `mutation` root operation
    pub mutation_type: Option<NamedType>,

    /// Name of the object type for the `subscription` root operation
    pub subscription_type: Option<NamedType>,
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};

/// The definition of a named type, with all information from type extensions folded in.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtendedType {
    Scalar(Node<ScalarType>),
    Object(Node<ObjectType>),
    Interface(Node<InterfaceType>),
    Union(Node<UnionType>),
    Enum(Node<EnumType>),
    InputObject(Node<InputObjectType>),
}

/// The kind of a named type, without its definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScalarType {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub description: Option<String>,
    pub name: Name,
    pub implements_interfaces: IndexSet<NamedType>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, Node<FieldDefinition>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub description: Option<String>,
    pub name: Name,
    pub implements_interfaces: IndexSet<NamedType>,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, Node<FieldDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,

    /// Names of the member object types
    pub members: IndexSet<NamedType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
    pub values: IndexMap<Name, Node<EnumValueDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputObjectType {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
    pub fields: IndexMap<Name, Node<InputValueDefinition>>,
}

/// A field of an object or interface type
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<Node<InputValueDefinition>>,
    pub ty: Node<Type>,

    /// Directive applications, including `@deprecated` if present
    pub directives: DirectiveList,

    /// Set from a `@deprecated` directive application
    pub deprecation: Option<Deprecation>,

    /// How an executor resolves this field.
    /// `None` means the executor’s default behavior.
    pub resolver: Option<Resolver>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub value: Name,
    pub directives: DirectiveList,

    /// Set from a `@deprecated` directive application
    pub deprecation: Option<Deprecation>,

    /// The value an executor uses to represent this enum value.
    /// Defaults to the name of the value, as a string.
    pub internal_value: JsonValue,
}

impl Schema {
    /// Returns a schema containing built-in directives and built-in scalars,
    /// without any root operation.
    ///
    /// Add definitions with [`extend_schema`][crate::extend_schema].
    #[allow(clippy::new_without_default)] // not a great implicit default in generic contexts
    pub fn new() -> Self {
        static BUILT_IN: OnceLock<Schema> = OnceLock::new();
        BUILT_IN
            .get_or_init(|| {
                let input = include_str!("built_in.graphql");
                let document = crate::Parser::new()
                    .parse_ast_with_file_id(
                        input.to_owned(),
                        "built_in.graphql".into(),
                        crate::FileId::BUILT_IN,
                    )
                    .expect("built-in definitions are syntactically valid");
                crate::extend::SchemaExtender::new()
                    .extend_owned(&Self::empty(), &document)
                    .expect("built-in definitions are valid")
            })
            .clone()
    }

    /// A schema without any definition, not even built-ins
    pub(crate) fn empty() -> Self {
        Self {
            sources: SourceMap::default(),
            directive_definitions: IndexMap::new(),
            types: IndexMap::new(),
            query_type: None,
            mutation_type: None,
            subscription_type: None,
        }
    }

    /// The sources of this schema followed by those of `document`.
    ///
    /// Errors from extending this schema with `document` can point into either,
    /// so this is the source map to render them with.
    pub fn sources_with(&self, document: &Document) -> SourceMap {
        let mut sources = IndexMap::clone(&self.sources);
        sources.extend(document.sources.iter().map(|(id, file)| (*id, file.clone())));
        SourceMap::new(sources)
    }

    /// Returns the type with the given name, if it is a scalar type
    pub fn get_scalar(&self, name: &str) -> Option<&Node<ScalarType>> {
        if let Some(ExtendedType::Scalar(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a object type
    pub fn get_object(&self, name: &str) -> Option<&Node<ObjectType>> {
        if let Some(ExtendedType::Object(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a interface type
    pub fn get_interface(&self, name: &str) -> Option<&Node<InterfaceType>> {
        if let Some(ExtendedType::Interface(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a union type
    pub fn get_union(&self, name: &str) -> Option<&Node<UnionType>> {
        if let Some(ExtendedType::Union(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a enum type
    pub fn get_enum(&self, name: &str) -> Option<&Node<EnumType>> {
        if let Some(ExtendedType::Enum(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the type with the given name, if it is a input object type
    pub fn get_input_object(&self, name: &str) -> Option<&Node<InputObjectType>> {
        if let Some(ExtendedType::InputObject(ty)) = self.types.get(name) {
            Some(ty)
        } else {
            None
        }
    }

    /// Returns the name of the object type for the root operation with the given operation kind
    pub fn root_operation(&self, operation_type: OperationType) -> Option<&NamedType> {
        match operation_type {
            OperationType::Query => &self.query_type,
            OperationType::Mutation => &self.mutation_type,
            OperationType::Subscription => &self.subscription_type,
        }
        .as_ref()
    }

    /// Returns the object type for the root operation with the given operation kind
    pub fn root_operation_object(&self, operation_type: OperationType) -> Option<&Node<ObjectType>> {
        self.get_object(self.root_operation(operation_type)?)
    }

    /// Returns root operations that are set, in `query`, `mutation`, `subscription` order
    pub fn iter_root_operations(&self) -> impl Iterator<Item = (OperationType, &NamedType)> {
        [
            (OperationType::Query, &self.query_type),
            (OperationType::Mutation, &self.mutation_type),
            (OperationType::Subscription, &self.subscription_type),
        ]
        .into_iter()
        .filter_map(|(ty, maybe_name)| maybe_name.as_ref().map(|name| (ty, name)))
    }

    /// Returns the definition of an explicit field of an object or interface type.
    pub fn type_field(&self, type_name: &str, field_name: &str) -> Option<&Node<FieldDefinition>> {
        match self.types.get(type_name)? {
            ExtendedType::Object(ty) => ty.fields.get(field_name),
            ExtendedType::Interface(ty) => ty.fields.get(field_name),
            ExtendedType::Scalar(_)
            | ExtendedType::Union(_)
            | ExtendedType::Enum(_)
            | ExtendedType::InputObject(_) => None,
        }
    }

    /// Follows a type reference through list and non-null wrappers
    /// to the definition of its named type in this schema.
    pub fn resolve_type(&self, ty: &Type) -> Option<&ExtendedType> {
        self.types.get(ty.inner_named_type())
    }

    /// Returns whether the type `ty` is defined as is an input type
    ///
    /// <https://spec.graphql.org/October2021/#sec-Input-and-Output-Types>
    pub fn is_input_type(&self, ty: &Type) -> bool {
        self.resolve_type(ty)
            .is_some_and(|def| def.kind().is_input_type())
    }

    /// Returns whether the type `ty` is defined as is an output type
    ///
    /// <https://spec.graphql.org/October2021/#sec-Input-and-Output-Types>
    pub fn is_output_type(&self, ty: &Type) -> bool {
        self.resolve_type(ty)
            .is_some_and(|def| def.kind().is_output_type())
    }
}

/// Source files are not compared
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        let Self {
            sources: _,
            directive_definitions,
            types,
            query_type,
            mutation_type,
            subscription_type,
        } = self;
        *directive_definitions == other.directive_definitions
            && *types == other.types
            && *query_type == other.query_type
            && *mutation_type == other.mutation_type
            && *subscription_type == other.subscription_type
    }
}

impl ExtendedType {
    pub fn name(&self) -> &Name {
        match self {
            Self::Scalar(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Interface(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(def) => def.description.as_deref(),
            Self::Object(def) => def.description.as_deref(),
            Self::Interface(def) => def.description.as_deref(),
            Self::Union(def) => def.description.as_deref(),
            Self::Enum(def) => def.description.as_deref(),
            Self::InputObject(def) => def.description.as_deref(),
        }
    }

    pub fn directives(&self) -> &DirectiveList {
        match self {
            Self::Scalar(def) => &def.directives,
            Self::Object(def) => &def.directives,
            Self::Interface(def) => &def.directives,
            Self::Union(def) => &def.directives,
            Self::Enum(def) => &def.directives,
            Self::InputObject(def) => &def.directives,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns whether this definition is located in the built-in definitions
    pub fn is_built_in(&self) -> bool {
        match self {
            Self::Scalar(def) => def.is_built_in(),
            Self::Object(def) => def.is_built_in(),
            Self::Interface(def) => def.is_built_in(),
            Self::Union(def) => def.is_built_in(),
            Self::Enum(def) => def.is_built_in(),
            Self::InputObject(def) => def.is_built_in(),
        }
    }

    /// Returns whether two definitions point to the same memory allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a.ptr_eq(b),
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Interface(a), Self::Interface(b)) => a.ptr_eq(b),
            (Self::Union(a), Self::Union(b)) => a.ptr_eq(b),
            (Self::Enum(a), Self::Enum(b)) => a.ptr_eq(b),
            (Self::InputObject(a), Self::InputObject(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    pub fn location(&self) -> Option<crate::NodeLocation> {
        match self {
            Self::Scalar(def) => def.location(),
            Self::Object(def) => def.location(),
            Self::Interface(def) => def.location(),
            Self::Union(def) => def.location(),
            Self::Enum(def) => def.location(),
            Self::InputObject(def) => def.location(),
        }
    }
}

impl TypeKind {
    /// Returns whether values of this kind can be used as arguments and input fields
    pub fn is_input_type(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum | Self::InputObject)
    }

    /// Returns whether values of this kind can be returned by fields
    pub fn is_output_type(self) -> bool {
        !matches!(self, Self::InputObject)
    }

    /// Describe this kind, for use in diagnostics
    pub fn describe(self) -> &'static str {
        match self {
            Self::Scalar => "a scalar type",
            Self::Object => "an object type",
            Self::Interface => "an interface type",
            Self::Union => "a union type",
            Self::Enum => "an enum type",
            Self::InputObject => "an input object type",
        }
    }
}

impl FieldDefinition {
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.as_ref().map(|d| d.reason.as_str())
    }

    /// Returns the argument definition with the given name, if any
    pub fn argument_by_name(&self, name: &str) -> Option<&Node<InputValueDefinition>> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

impl EnumValueDefinition {
    pub fn is_deprecated(&self) -> bool {
        self.deprecation.is_some()
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation.as_ref().map(|d| d.reason.as_str())
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}
