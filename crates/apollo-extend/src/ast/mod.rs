//! *Abstract Syntax Tree* of the type system parts of a GraphQL document.
//!
//! This is what [`extend_schema`][crate::extend_schema] consumes.
//! Type definitions, directive definitions and `extend type` clauses are kept in full,
//! with directive applications as opaque data.
//! Other extension keywords keep only their target name, which is enough to reject them.
//! Operations, fragments and `schema` blocks are recorded as [`IgnoredDefinition`]s.
//!
//! Start with [`Document::parse`], or [`Parser`][crate::Parser] to change the parser configuration.

use crate::Name;
use crate::Node;
use crate::NodeLocation;
use std::fmt;

mod from_cst;

#[derive(Clone, Default)]
pub struct Document {
    /// The file this document was parsed from, if any
    pub sources: crate::SourceMap,

    pub definitions: Vec<Definition>,
}

/// Refers to the name of a GraphQL type defined elsewhere
pub type NamedType = Name;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Definition {
    DirectiveDefinition(Node<DirectiveDefinition>),
    ScalarTypeDefinition(Node<ScalarTypeDefinition>),
    ObjectTypeDefinition(Node<ObjectTypeDefinition>),
    InterfaceTypeDefinition(Node<InterfaceTypeDefinition>),
    UnionTypeDefinition(Node<UnionTypeDefinition>),
    EnumTypeDefinition(Node<EnumTypeDefinition>),
    InputObjectTypeDefinition(Node<InputObjectTypeDefinition>),
    ObjectTypeExtension(Node<ObjectTypeExtension>),
    OtherTypeExtension(Node<OtherTypeExtension>),
    Ignored(Node<IgnoredDefinition>),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DirectiveDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<Node<InputValueDefinition>>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ScalarTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub implements_interfaces: Vec<Name>,
    pub directives: DirectiveList,
    pub fields: Vec<Node<FieldDefinition>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InterfaceTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub implements_interfaces: Vec<Name>,
    pub directives: DirectiveList,
    pub fields: Vec<Node<FieldDefinition>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct UnionTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
    pub members: Vec<NamedType>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EnumTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
    pub values: Vec<Node<EnumValueDefinition>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InputObjectTypeDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub directives: DirectiveList,
    pub fields: Vec<Node<InputValueDefinition>>,
}

/// An `extend type` clause
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectTypeExtension {
    pub name: Name,
    pub implements_interfaces: Vec<Name>,
    pub directives: DirectiveList,
    pub fields: Vec<Node<FieldDefinition>>,
}

/// An `extend scalar`, `extend interface`, `extend union`, `extend enum`,
/// or `extend input` clause. Its body is not kept.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct OtherTypeExtension {
    pub keyword: ExtensionKeyword,
    pub name: Name,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExtensionKeyword {
    Scalar,
    Interface,
    Union,
    Enum,
    InputObject,
}

/// A definition that does not affect types or directives
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum IgnoredDefinition {
    Operation { name: Option<Name> },
    Fragment { name: Name },
    Schema,
    SchemaExtension,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub arguments: Vec<Node<InputValueDefinition>>,
    pub ty: Node<Type>,
    pub directives: DirectiveList,
}

/// An argument definition or an input object field
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: Name,
    pub ty: Node<Type>,
    pub default_value: Option<Node<Value>>,
    pub directives: DirectiveList,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub value: Name,
    pub directives: DirectiveList,
}

/// Directive applications in source order
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct DirectiveList(pub Vec<Node<Directive>>);

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Directive {
    pub name: Name,
    pub arguments: Vec<Node<Argument>>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Argument {
    pub name: Name,
    pub value: Node<Value>,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum DirectiveLocation {
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

/// A type reference: a name wrapped in any number of list and non-null modifiers
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Type {
    Named(NamedType),
    NonNullNamed(NamedType),
    List(Box<Type>),
    NonNullList(Box<Type>),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Value {
    Null,
    Enum(Name),
    Variable(Name),
    /// With escape sequences resolved
    String(String),
    Float(FloatValue),
    Int(IntValue),
    Boolean(bool),
    List(Vec<Node<Value>>),
    Object(Vec<(Name, Node<Value>)>),
}

/// An integer literal as written
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct IntValue(String);

/// A float literal as written
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FloatValue(String);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse with the default [`Parser`][crate::Parser] configuration.
    ///
    /// `path` only names the file in diagnostics.
    pub fn parse(
        source_text: impl Into<String>,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, crate::parser::WithErrors<Self>> {
        crate::Parser::new().parse_ast(source_text, path)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.definitions.fmt(f)
    }
}

impl Definition {
    /// The name of the defined or extended type or directive,
    /// or of an operation or fragment
    pub fn name(&self) -> Option<&Name> {
        match self {
            Self::DirectiveDefinition(def) => Some(&def.name),
            Self::ScalarTypeDefinition(def) => Some(&def.name),
            Self::ObjectTypeDefinition(def) => Some(&def.name),
            Self::InterfaceTypeDefinition(def) => Some(&def.name),
            Self::UnionTypeDefinition(def) => Some(&def.name),
            Self::EnumTypeDefinition(def) => Some(&def.name),
            Self::InputObjectTypeDefinition(def) => Some(&def.name),
            Self::ObjectTypeExtension(ext) => Some(&ext.name),
            Self::OtherTypeExtension(ext) => Some(&ext.name),
            Self::Ignored(def) => match &**def {
                IgnoredDefinition::Operation { name } => name.as_ref(),
                IgnoredDefinition::Fragment { name } => Some(name),
                IgnoredDefinition::Schema | IgnoredDefinition::SchemaExtension => None,
            },
        }
    }

    pub fn location(&self) -> Option<NodeLocation> {
        match self {
            Self::DirectiveDefinition(def) => def.location(),
            Self::ScalarTypeDefinition(def) => def.location(),
            Self::ObjectTypeDefinition(def) => def.location(),
            Self::InterfaceTypeDefinition(def) => def.location(),
            Self::UnionTypeDefinition(def) => def.location(),
            Self::EnumTypeDefinition(def) => def.location(),
            Self::InputObjectTypeDefinition(def) => def.location(),
            Self::ObjectTypeExtension(ext) => ext.location(),
            Self::OtherTypeExtension(ext) => ext.location(),
            Self::Ignored(def) => def.location(),
        }
    }
}

impl ExtensionKeyword {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Self::Scalar => "a scalar type extension",
            Self::Interface => "an interface type extension",
            Self::Union => "a union type extension",
            Self::Enum => "an enum type extension",
            Self::InputObject => "an input object type extension",
        }
    }
}

impl IgnoredDefinition {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::Operation { .. } => "an operation definition",
            Self::Fragment { .. } => "a fragment definition",
            Self::Schema => "a schema definition",
            Self::SchemaExtension => "a schema extension",
        }
    }
}

impl DirectiveList {
    /// The first application of the named directive
    pub fn get(&self, name: &str) -> Option<&Node<Directive>> {
        self.0.iter().find(|directive| directive.name == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

impl std::ops::Deref for DirectiveList {
    type Target = Vec<Node<Directive>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for DirectiveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Directive {
    /// The value given for the named argument, if any
    pub fn argument_by_name(&self, name: &str) -> Option<&Node<Value>> {
        self.arguments
            .iter()
            .find(|argument| argument.name == name)
            .map(|argument| &argument.value)
    }
}

impl OperationType {
    /// The keyword for this operation type
    pub fn name(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

const DIRECTIVE_LOCATIONS: [(DirectiveLocation, &str); 19] = [
    (DirectiveLocation::Query, "QUERY"),
    (DirectiveLocation::Mutation, "MUTATION"),
    (DirectiveLocation::Subscription, "SUBSCRIPTION"),
    (DirectiveLocation::Field, "FIELD"),
    (DirectiveLocation::FragmentDefinition, "FRAGMENT_DEFINITION"),
    (DirectiveLocation::FragmentSpread, "FRAGMENT_SPREAD"),
    (DirectiveLocation::InlineFragment, "INLINE_FRAGMENT"),
    (DirectiveLocation::VariableDefinition, "VARIABLE_DEFINITION"),
    (DirectiveLocation::Schema, "SCHEMA"),
    (DirectiveLocation::Scalar, "SCALAR"),
    (DirectiveLocation::Object, "OBJECT"),
    (DirectiveLocation::FieldDefinition, "FIELD_DEFINITION"),
    (DirectiveLocation::ArgumentDefinition, "ARGUMENT_DEFINITION"),
    (DirectiveLocation::Interface, "INTERFACE"),
    (DirectiveLocation::Union, "UNION"),
    (DirectiveLocation::Enum, "ENUM"),
    (DirectiveLocation::EnumValue, "ENUM_VALUE"),
    (DirectiveLocation::InputObject, "INPUT_OBJECT"),
    (DirectiveLocation::InputFieldDefinition, "INPUT_FIELD_DEFINITION"),
];

impl DirectiveLocation {
    /// The name of this location in SDL, such as `FIELD_DEFINITION`
    pub fn name(self) -> &'static str {
        DIRECTIVE_LOCATIONS
            .iter()
            .find(|(location, _)| *location == self)
            .map_or("", |(_, name)| name)
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        DIRECTIVE_LOCATIONS
            .iter()
            .find(|(_, location_name)| *location_name == name)
            .map(|(location, _)| *location)
    }
}

impl fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Type {
    /// The named type at the core of any list and non-null wrappers
    pub fn inner_named_type(&self) -> &NamedType {
        match self {
            Self::Named(name) | Self::NonNullNamed(name) => name,
            Self::List(item) | Self::NonNullList(item) => item.inner_named_type(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::NonNullNamed(name) => write!(f, "{name}!"),
            Self::List(item) => write!(f, "[{item}]"),
            Self::NonNullList(item) => write!(f, "[{item}]!"),
        }
    }
}

impl IntValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FloatValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Prints GraphQL syntax
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Enum(name) => write!(f, "{name}"),
            Self::Variable(name) => write!(f, "${name}"),
            Self::String(value) => write_string(f, value),
            Self::Float(value) => f.write_str(value.as_str()),
            Self::Int(value) => f.write_str(value.as_str()),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?
                    }
                    write!(f, "{item}")?
                }
                f.write_str("]")
            }
            Self::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?
                    }
                    write!(f, "{name}: {value}")?
                }
                f.write_str("}")
            }
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
