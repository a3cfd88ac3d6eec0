use super::conflicts;
use super::error::ExtensionError;
use crate::ast;
use crate::ast::Definition;
use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::schema::TypeKind;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use indexmap::IndexMap;

/// The definitions of an extension document relevant to a base schema, grouped by name
#[derive(Debug, Default)]
pub(crate) struct ExtensionIndex {
    /// Extension clauses by target type, in document order
    pub(crate) extensions: IndexMap<Name, ObjectExtensions>,
    pub(crate) new_types: IndexMap<Name, NewType>,
    pub(crate) new_directives: Vec<Node<ast::DirectiveDefinition>>,
}

/// All `extend type` clauses for one base object type
#[derive(Debug)]
pub(crate) struct ObjectExtensions {
    pub(crate) base: Node<ObjectType>,
    pub(crate) clauses: Vec<Node<ast::ObjectTypeExtension>>,
}

/// A type defined in the extension document
#[derive(Debug, Clone)]
pub(crate) enum NewType {
    Scalar(Node<ast::ScalarTypeDefinition>),
    Object(Node<ast::ObjectTypeDefinition>),
    Interface(Node<ast::InterfaceTypeDefinition>),
    Union(Node<ast::UnionTypeDefinition>),
    Enum(Node<ast::EnumTypeDefinition>),
    InputObject(Node<ast::InputObjectTypeDefinition>),
}

impl ExtensionIndex {
    /// Classifies the definitions of `document`.
    ///
    /// Extension targets must be object types of `base`,
    /// and new types must not collide with `base` types or with each other.
    pub(crate) fn new(base: &Schema, document: &ast::Document) -> Result<Self, ExtensionError> {
        let mut index = Self::default();
        for definition in &document.definitions {
            match definition {
                Definition::ObjectTypeExtension(extension) => {
                    let target =
                        conflicts::extension_target(base, &extension.name, extension.location())?;
                    index
                        .extensions
                        .entry(extension.name.clone())
                        .or_insert_with(|| ObjectExtensions {
                            base: target.clone(),
                            clauses: Vec::new(),
                        })
                        .clauses
                        .push(extension.clone())
                }
                Definition::OtherTypeExtension(extension) => {
                    return Err(conflicts::extension_keyword(base, extension))
                }
                Definition::ScalarTypeDefinition(def) => {
                    index.add_new_type(base, &def.name, NewType::Scalar(def.clone()))?
                }
                Definition::ObjectTypeDefinition(def) => {
                    index.add_new_type(base, &def.name, NewType::Object(def.clone()))?
                }
                Definition::InterfaceTypeDefinition(def) => {
                    index.add_new_type(base, &def.name, NewType::Interface(def.clone()))?
                }
                Definition::UnionTypeDefinition(def) => {
                    index.add_new_type(base, &def.name, NewType::Union(def.clone()))?
                }
                Definition::EnumTypeDefinition(def) => {
                    index.add_new_type(base, &def.name, NewType::Enum(def.clone()))?
                }
                Definition::InputObjectTypeDefinition(def) => {
                    index.add_new_type(base, &def.name, NewType::InputObject(def.clone()))?
                }
                Definition::DirectiveDefinition(def) => index.new_directives.push(def.clone()),
                Definition::Ignored(def) => {
                    tracing::debug!(
                        definition = def.describe(),
                        "ignoring definition irrelevant to schema extension"
                    )
                }
            }
        }
        Ok(index)
    }

    fn add_new_type(
        &mut self,
        base: &Schema,
        name: &Name,
        definition: NewType,
    ) -> Result<(), ExtensionError> {
        conflicts::new_type_name(base, &self.new_types, name, definition.location())?;
        self.new_types.insert(name.clone(), definition);
        Ok(())
    }

    /// Returns whether extending with this index would leave a schema unchanged
    pub(crate) fn is_empty(&self) -> bool {
        self.extensions.is_empty() && self.new_types.is_empty() && self.new_directives.is_empty()
    }
}

impl NewType {
    pub(crate) fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Union(_) => TypeKind::Union,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    pub(crate) fn location(&self) -> Option<NodeLocation> {
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
