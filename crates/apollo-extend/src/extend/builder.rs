use super::conflicts;
use super::conflicts::ExpectedKind;
use super::error::ExtensionError;
use super::error::ReferenceSite;
use super::index::ExtensionIndex;
use super::index::NewType;
use super::index::ObjectExtensions;
use super::SchemaExtender;
use crate::ast;
use crate::schema::Deprecation;
use crate::schema::EnumType;
use crate::schema::EnumValueDefinition;
use crate::schema::ExtendedType;
use crate::schema::FieldDefinition;
use crate::schema::InputObjectType;
use crate::schema::InterfaceType;
use crate::schema::JsonValue;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::Schema;
use crate::schema::TypeKind;
use crate::schema::UnionType;
use crate::Name;
use crate::Node;
use crate::NodeLocation;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// Builds the types of an extended schema on demand, at most once per name.
///
/// One builder serves a single extend operation and is dropped with it.
pub(crate) struct TypeGraphBuilder<'a> {
    config: &'a SchemaExtender,
    base: &'a Schema,
    index: &'a ExtensionIndex,
    cache: IndexMap<Name, Slot>,
}

enum Slot {
    /// Being built further up the stack. Its kind is known from its definition.
    InProgress(TypeKind),
    Built(ExtendedType),
}

impl Slot {
    fn kind(&self) -> TypeKind {
        match self {
            Self::InProgress(kind) => *kind,
            Self::Built(ty) => ty.kind(),
        }
    }
}

impl<'a> TypeGraphBuilder<'a> {
    pub(crate) fn new(
        config: &'a SchemaExtender,
        base: &'a Schema,
        index: &'a ExtensionIndex,
    ) -> Self {
        Self {
            config,
            base,
            index,
            cache: IndexMap::new(),
        }
    }

    /// Builds every extended and new type, then returns the full type map:
    /// base types in their original order followed by new types in document order.
    ///
    /// Base types without extension clauses are the same `Node`s as in the base schema.
    pub(crate) fn build_all(mut self) -> Result<IndexMap<Name, ExtendedType>, ExtensionError> {
        let index = self.index;
        for name in index.extensions.keys().chain(index.new_types.keys()) {
            self.resolve(name)?;
        }
        let mut built: IndexMap<Name, ExtendedType> = self
            .cache
            .into_iter()
            .filter_map(|(name, slot)| match slot {
                Slot::Built(ty) => Some((name, ty)),
                Slot::InProgress(_) => None,
            })
            .collect();
        let mut types = IndexMap::with_capacity(self.base.types.len() + index.new_types.len());
        for (name, base_ty) in &self.base.types {
            let ty = built
                .swap_remove(name)
                .unwrap_or_else(|| base_ty.clone());
            types.insert(name.clone(), ty);
        }
        for name in index.new_types.keys() {
            if let Some((name, ty)) = built.swap_remove_entry(name) {
                types.insert(name, ty);
            }
        }
        Ok(types)
    }

    /// Returns the kind of the type named `name` in the extended schema,
    /// building it first if needed.
    ///
    /// Returns `Ok(None)` if no such type exists.
    pub(crate) fn resolve(&mut self, name: &Name) -> Result<Option<TypeKind>, ExtensionError> {
        if let Some(slot) = self.cache.get(name) {
            return Ok(Some(slot.kind()));
        }
        let index = self.index;
        let base = self.base;
        let kind;
        if let Some(extensions) = index.extensions.get(name) {
            kind = TypeKind::Object;
            self.cache.insert(name.clone(), Slot::InProgress(kind));
            let ty = self.extend_object(extensions)?;
            tracing::trace!(%name, clauses = extensions.clauses.len(), "built extended type");
            self.cache.insert(name.clone(), Slot::Built(ExtendedType::Object(ty)));
        } else if let Some(ty) = base.types.get(name) {
            kind = ty.kind();
            self.cache.insert(name.clone(), Slot::Built(ty.clone()));
        } else if let Some(def) = index.new_types.get(name) {
            kind = def.kind();
            self.cache.insert(name.clone(), Slot::InProgress(kind));
            let ty = self.build_new_type(def)?;
            tracing::trace!(%name, kind = %kind, "built new type");
            self.cache.insert(name.clone(), Slot::Built(ty));
        } else {
            return Ok(None);
        }
        Ok(Some(kind))
    }

    /// Resolves a type reference, which must name an existing type of the expected kind
    pub(crate) fn reference(
        &mut self,
        name: &Name,
        location: Option<NodeLocation>,
        expected: ExpectedKind,
        site: impl FnOnce() -> ReferenceSite,
    ) -> Result<(), ExtensionError> {
        match self.resolve(name)? {
            Some(found) => conflicts::reference_kind(name, found, expected, location, site),
            None => Err(ExtensionError::UnknownType {
                name: name.clone(),
                site: site(),
                location,
            }),
        }
    }

    fn reference_type(
        &mut self,
        ty: &Node<ast::Type>,
        expected: ExpectedKind,
        site: impl FnOnce() -> ReferenceSite,
    ) -> Result<(), ExtensionError> {
        self.reference(ty.inner_named_type(), ty.location(), expected, site)
    }

    /// Copies the base type, then applies extension clauses in document order
    fn extend_object(
        &mut self,
        extensions: &ObjectExtensions,
    ) -> Result<Node<ObjectType>, ExtensionError> {
        let mut node = extensions.base.clone();
        let ty = node.make_mut();
        for clause in &extensions.clauses {
            self.add_interfaces(
                &ty.name,
                &mut ty.implements_interfaces,
                &clause.implements_interfaces,
                clause.location(),
            )?;
            ty.directives.extend(clause.directives.iter().cloned());
            self.add_fields(&ty.name, &mut ty.fields, &clause.fields)?;
        }
        Ok(node)
    }

    fn build_new_type(&mut self, def: &NewType) -> Result<ExtendedType, ExtensionError> {
        Ok(match def {
            NewType::Scalar(def) => ExtendedType::Scalar(def.same_location(ScalarType {
                description: def.description.clone(),
                name: def.name.clone(),
                directives: def.directives.clone(),
            })),
            NewType::Object(def) => {
                let mut implements_interfaces = IndexSet::new();
                self.add_interfaces(
                    &def.name,
                    &mut implements_interfaces,
                    &def.implements_interfaces,
                    def.location(),
                )?;
                let mut fields = IndexMap::new();
                self.add_fields(&def.name, &mut fields, &def.fields)?;
                ExtendedType::Object(def.same_location(ObjectType {
                    description: def.description.clone(),
                    name: def.name.clone(),
                    implements_interfaces,
                    directives: def.directives.clone(),
                    fields,
                }))
            }
            NewType::Interface(def) => {
                let mut implements_interfaces = IndexSet::new();
                self.add_interfaces(
                    &def.name,
                    &mut implements_interfaces,
                    &def.implements_interfaces,
                    def.location(),
                )?;
                let mut fields = IndexMap::new();
                self.add_fields(&def.name, &mut fields, &def.fields)?;
                ExtendedType::Interface(def.same_location(InterfaceType {
                    description: def.description.clone(),
                    name: def.name.clone(),
                    implements_interfaces,
                    directives: def.directives.clone(),
                    fields,
                }))
            }
            NewType::Union(def) => {
                let mut members = IndexSet::with_capacity(def.members.len());
                for member in &def.members {
                    let location = member.location().or(def.location());
                    self.reference(member, location, ExpectedKind::Object, || {
                        ReferenceSite::UnionMember {
                            type_name: def.name.clone(),
                        }
                    })?;
                    members.insert(member.clone());
                }
                ExtendedType::Union(def.same_location(UnionType {
                    description: def.description.clone(),
                    name: def.name.clone(),
                    directives: def.directives.clone(),
                    members,
                }))
            }
            NewType::Enum(def) => {
                let mut values = IndexMap::with_capacity(def.values.len());
                for value in &def.values {
                    conflicts::new_field(&def.name, &values, &value.value, value.location())?;
                    values.insert(value.value.clone(), build_enum_value(value));
                }
                ExtendedType::Enum(def.same_location(EnumType {
                    description: def.description.clone(),
                    name: def.name.clone(),
                    directives: def.directives.clone(),
                    values,
                }))
            }
            NewType::InputObject(def) => {
                let mut fields = IndexMap::with_capacity(def.fields.len());
                for field in &def.fields {
                    conflicts::new_field(&def.name, &fields, &field.name, field.location())?;
                    self.reference_type(&field.ty, ExpectedKind::Input, || {
                        ReferenceSite::InputField {
                            type_name: def.name.clone(),
                            field: field.name.clone(),
                        }
                    })?;
                    fields.insert(field.name.clone(), field.clone());
                }
                ExtendedType::InputObject(def.same_location(InputObjectType {
                    description: def.description.clone(),
                    name: def.name.clone(),
                    directives: def.directives.clone(),
                    fields,
                }))
            }
        })
    }

    fn add_interfaces(
        &mut self,
        type_name: &Name,
        implements_interfaces: &mut IndexSet<Name>,
        added: &[Name],
        clause_location: Option<NodeLocation>,
    ) -> Result<(), ExtensionError> {
        for interface in added {
            let location = interface.location().or(clause_location);
            conflicts::new_interface(type_name, implements_interfaces, interface, location)?;
            self.reference(interface, location, ExpectedKind::Interface, || {
                ReferenceSite::ImplementedInterface {
                    type_name: type_name.clone(),
                }
            })?;
            implements_interfaces.insert(interface.clone());
        }
        Ok(())
    }

    /// Appends `added` fields after existing ones
    fn add_fields(
        &mut self,
        type_name: &Name,
        fields: &mut IndexMap<Name, Node<FieldDefinition>>,
        added: &[Node<ast::FieldDefinition>],
    ) -> Result<(), ExtensionError> {
        fields.reserve(added.len());
        for field in added {
            conflicts::new_field(type_name, fields, &field.name, field.location())?;
            let field = self.build_field(type_name, field)?;
            fields.insert(field.name.clone(), field);
        }
        Ok(())
    }

    fn build_field(
        &mut self,
        type_name: &Name,
        def: &Node<ast::FieldDefinition>,
    ) -> Result<Node<FieldDefinition>, ExtensionError> {
        self.reference_type(&def.ty, ExpectedKind::Output, || ReferenceSite::Field {
            type_name: type_name.clone(),
            field: def.name.clone(),
        })?;
        for argument in &def.arguments {
            self.reference_type(&argument.ty, ExpectedKind::Input, || {
                ReferenceSite::Argument {
                    type_name: type_name.clone(),
                    field: def.name.clone(),
                    argument: argument.name.clone(),
                }
            })?;
        }
        Ok(def.same_location(FieldDefinition {
            description: def.description.clone(),
            name: def.name.clone(),
            arguments: def.arguments.clone(),
            ty: def.ty.clone(),
            directives: def.directives.clone(),
            deprecation: Deprecation::from_directives(&def.directives),
            resolver: self.config.resolver_for(type_name, &def.name),
        }))
    }
}

fn build_enum_value(def: &Node<ast::EnumValueDefinition>) -> Node<EnumValueDefinition> {
    def.same_location(EnumValueDefinition {
        description: def.description.clone(),
        value: def.value.clone(),
        directives: def.directives.clone(),
        deprecation: Deprecation::from_directives(&def.directives),
        internal_value: JsonValue::String(def.value.as_str().into()),
    })
}
