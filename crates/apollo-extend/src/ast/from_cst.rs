use super::*;
use crate::FileId;
use crate::SourceMap;
use apollo_parser::cst;
use apollo_parser::cst::CstNode;
use apollo_parser::SyntaxNode;

impl Document {
    /// Nodes missing a required part are skipped:
    /// the parser reported a syntax error for each of them.
    pub(crate) fn from_cst(document: &cst::Document, file_id: FileId, sources: SourceMap) -> Self {
        let converter = Converter { file_id };
        Self {
            sources,
            definitions: document
                .definitions()
                .filter_map(|definition| converter.definition(&definition))
                .collect(),
        }
    }
}

/// Builds AST nodes located in one file
struct Converter {
    file_id: FileId,
}

impl Converter {
    fn node<T>(&self, syntax: &SyntaxNode, value: T) -> Node<T> {
        Node::located(value, Some(NodeLocation::of(self.file_id, syntax)))
    }

    /// Located at the identifier token, without surrounding whitespace or comments
    fn name(&self, name: Option<cst::Name>) -> Option<Name> {
        let ident = name?.ident_token()?;
        let location = NodeLocation {
            file_id: self.file_id,
            range: ident.text_range(),
        };
        Some(Name::parsed(ident.text(), location))
    }

    fn named_types(&self, types: impl Iterator<Item = cst::NamedType>) -> Vec<Name> {
        types.filter_map(|ty| self.name(ty.name())).collect()
    }

    fn definition(&self, definition: &cst::Definition) -> Option<Definition> {
        use cst::Definition as C;
        let syntax = definition.syntax();
        Some(match definition {
            C::DirectiveDefinition(def) => {
                Definition::DirectiveDefinition(self.node(syntax, self.directive_definition(def)?))
            }
            C::ScalarTypeDefinition(def) => {
                let converted = ScalarTypeDefinition {
                    description: description(def.description()),
                    name: self.name(def.name())?,
                    directives: self.directives(def.directives()),
                };
                Definition::ScalarTypeDefinition(self.node(syntax, converted))
            }
            C::ObjectTypeDefinition(def) => {
                let converted = ObjectTypeDefinition {
                    description: description(def.description()),
                    name: self.name(def.name())?,
                    implements_interfaces: self.implements(def.implements_interfaces()),
                    directives: self.directives(def.directives()),
                    fields: self.fields(def.fields_definition()),
                };
                Definition::ObjectTypeDefinition(self.node(syntax, converted))
            }
            C::InterfaceTypeDefinition(def) => {
                let converted = InterfaceTypeDefinition {
                    description: description(def.description()),
                    name: self.name(def.name())?,
                    implements_interfaces: self.implements(def.implements_interfaces()),
                    directives: self.directives(def.directives()),
                    fields: self.fields(def.fields_definition()),
                };
                Definition::InterfaceTypeDefinition(self.node(syntax, converted))
            }
            C::UnionTypeDefinition(def) => {
                let members = def
                    .union_member_types()
                    .map(|members| self.named_types(members.named_types()))
                    .unwrap_or_default();
                let converted = UnionTypeDefinition {
                    description: description(def.description()),
                    name: self.name(def.name())?,
                    directives: self.directives(def.directives()),
                    members,
                };
                Definition::UnionTypeDefinition(self.node(syntax, converted))
            }
            C::EnumTypeDefinition(def) => {
                let values = def
                    .enum_values_definition()
                    .into_iter()
                    .flat_map(|values| values.enum_value_definitions())
                    .filter_map(|value| self.enum_value(&value))
                    .collect();
                let converted = EnumTypeDefinition {
                    description: description(def.description()),
                    name: self.name(def.name())?,
                    directives: self.directives(def.directives()),
                    values,
                };
                Definition::EnumTypeDefinition(self.node(syntax, converted))
            }
            C::InputObjectTypeDefinition(def) => {
                let fields = def
                    .input_fields_definition()
                    .map(|fields| self.input_values(fields.input_value_definitions()))
                    .unwrap_or_default();
                let converted = InputObjectTypeDefinition {
                    description: description(def.description()),
                    name: self.name(def.name())?,
                    directives: self.directives(def.directives()),
                    fields,
                };
                Definition::InputObjectTypeDefinition(self.node(syntax, converted))
            }
            C::ObjectTypeExtension(ext) => {
                let converted = ObjectTypeExtension {
                    name: self.name(ext.name())?,
                    implements_interfaces: self.implements(ext.implements_interfaces()),
                    directives: self.directives(ext.directives()),
                    fields: self.fields(ext.fields_definition()),
                };
                Definition::ObjectTypeExtension(self.node(syntax, converted))
            }
            C::ScalarTypeExtension(ext) => {
                self.other_extension(syntax, ExtensionKeyword::Scalar, ext.name())?
            }
            C::InterfaceTypeExtension(ext) => {
                self.other_extension(syntax, ExtensionKeyword::Interface, ext.name())?
            }
            C::UnionTypeExtension(ext) => {
                self.other_extension(syntax, ExtensionKeyword::Union, ext.name())?
            }
            C::EnumTypeExtension(ext) => {
                self.other_extension(syntax, ExtensionKeyword::Enum, ext.name())?
            }
            C::InputObjectTypeExtension(ext) => {
                self.other_extension(syntax, ExtensionKeyword::InputObject, ext.name())?
            }
            C::OperationDefinition(def) => {
                let ignored = IgnoredDefinition::Operation {
                    name: self.name(def.name()),
                };
                Definition::Ignored(self.node(syntax, ignored))
            }
            C::FragmentDefinition(def) => {
                let ignored = IgnoredDefinition::Fragment {
                    name: self.name(def.fragment_name()?.name())?,
                };
                Definition::Ignored(self.node(syntax, ignored))
            }
            C::SchemaDefinition(_) => {
                Definition::Ignored(self.node(syntax, IgnoredDefinition::Schema))
            }
            C::SchemaExtension(_) => {
                Definition::Ignored(self.node(syntax, IgnoredDefinition::SchemaExtension))
            }
        })
    }

    fn other_extension(
        &self,
        syntax: &SyntaxNode,
        keyword: ExtensionKeyword,
        name: Option<cst::Name>,
    ) -> Option<Definition> {
        let name = self.name(name)?;
        let extension = OtherTypeExtension { keyword, name };
        Some(Definition::OtherTypeExtension(self.node(syntax, extension)))
    }

    fn directive_definition(&self, def: &cst::DirectiveDefinition) -> Option<DirectiveDefinition> {
        let locations = def
            .directive_locations()
            .into_iter()
            .flat_map(|locations| locations.directive_locations())
            .filter_map(|location| {
                DirectiveLocation::from_name(location.syntax().first_token()?.text())
            })
            .collect();
        let arguments = def
            .arguments_definition()
            .map(|arguments| self.input_values(arguments.input_value_definitions()))
            .unwrap_or_default();
        Some(DirectiveDefinition {
            description: description(def.description()),
            name: self.name(def.name())?,
            arguments,
            repeatable: def.repeatable_token().is_some(),
            locations,
        })
    }

    fn implements(&self, implements: Option<cst::ImplementsInterfaces>) -> Vec<Name> {
        implements
            .map(|implements| self.named_types(implements.named_types()))
            .unwrap_or_default()
    }

    fn fields(&self, fields: Option<cst::FieldsDefinition>) -> Vec<Node<FieldDefinition>> {
        fields
            .into_iter()
            .flat_map(|fields| fields.field_definitions())
            .filter_map(|field| {
                let arguments = field
                    .arguments_definition()
                    .map(|arguments| self.input_values(arguments.input_value_definitions()))
                    .unwrap_or_default();
                let converted = FieldDefinition {
                    description: description(field.description()),
                    name: self.name(field.name())?,
                    arguments,
                    ty: self.ty(field.ty()?)?,
                    directives: self.directives(field.directives()),
                };
                Some(self.node(field.syntax(), converted))
            })
            .collect()
    }

    fn input_values(
        &self,
        values: impl Iterator<Item = cst::InputValueDefinition>,
    ) -> Vec<Node<InputValueDefinition>> {
        values
            .filter_map(|value| {
                let default_value = match value.default_value() {
                    Some(default) => Some(self.value(default.value()?)?),
                    None => None,
                };
                let converted = InputValueDefinition {
                    description: description(value.description()),
                    name: self.name(value.name())?,
                    ty: self.ty(value.ty()?)?,
                    default_value,
                    directives: self.directives(value.directives()),
                };
                Some(self.node(value.syntax(), converted))
            })
            .collect()
    }

    fn enum_value(&self, def: &cst::EnumValueDefinition) -> Option<Node<EnumValueDefinition>> {
        let converted = EnumValueDefinition {
            description: description(def.description()),
            value: self.name(def.enum_value()?.name())?,
            directives: self.directives(def.directives()),
        };
        Some(self.node(def.syntax(), converted))
    }

    fn ty(&self, ty: cst::Type) -> Option<Node<Type>> {
        Some(self.node(ty.syntax(), self.type_ref(&ty)?))
    }

    fn type_ref(&self, ty: &cst::Type) -> Option<Type> {
        Some(match ty {
            cst::Type::NamedType(named) => Type::Named(self.name(named.name())?),
            cst::Type::ListType(list) => Type::List(Box::new(self.type_ref(&list.ty()?)?)),
            cst::Type::NonNullType(non_null) => {
                if let Some(named) = non_null.named_type() {
                    Type::NonNullNamed(self.name(named.name())?)
                } else {
                    let item = non_null.list_type()?.ty()?;
                    Type::NonNullList(Box::new(self.type_ref(&item)?))
                }
            }
        })
    }

    fn directives(&self, directives: Option<cst::Directives>) -> DirectiveList {
        let directives = directives
            .into_iter()
            .flat_map(|directives| directives.directives())
            .filter_map(|directive| {
                let arguments = directive
                    .arguments()
                    .into_iter()
                    .flat_map(|arguments| arguments.arguments())
                    .filter_map(|argument| {
                        let converted = Argument {
                            name: self.name(argument.name())?,
                            value: self.value(argument.value()?)?,
                        };
                        Some(self.node(argument.syntax(), converted))
                    })
                    .collect();
                let converted = Directive {
                    name: self.name(directive.name())?,
                    arguments,
                };
                Some(self.node(directive.syntax(), converted))
            })
            .collect();
        DirectiveList(directives)
    }

    fn value(&self, value: cst::Value) -> Option<Node<Value>> {
        use cst::Value as C;
        let converted = match &value {
            C::Variable(v) => Value::Variable(self.name(v.name())?),
            C::StringValue(v) => Value::String(String::from(v)),
            C::FloatValue(v) => Value::Float(FloatValue(first_token_text(v.syntax())?)),
            C::IntValue(v) => Value::Int(IntValue(first_token_text(v.syntax())?)),
            C::BooleanValue(v) => Value::Boolean(first_token_text(v.syntax())? == "true"),
            C::NullValue(_) => Value::Null,
            C::EnumValue(v) => Value::Enum(self.name(v.name())?),
            C::ListValue(v) => Value::List(v.values().filter_map(|item| self.value(item)).collect()),
            C::ObjectValue(v) => Value::Object(
                v.object_fields()
                    .filter_map(|field| Some((self.name(field.name())?, self.value(field.value()?)?)))
                    .collect(),
            ),
        };
        Some(self.node(value.syntax(), converted))
    }
}

fn description(description: Option<cst::Description>) -> Option<String> {
    Some(String::from(description?.string_value()?))
}

fn first_token_text(syntax: &SyntaxNode) -> Option<String> {
    Some(syntax.first_token()?.text().to_owned())
}
