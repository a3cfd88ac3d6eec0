//! GraphQL SDL output for [`Schema`]
//!
//! Built-in definitions are skipped.
//! Everything else is printed in definition order, which for an extended schema means
//! base definitions first, then new definitions in document order.

use super::*;
use std::fmt;
use std::fmt::Write;

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut separator = |f: &mut fmt::Formatter<'_>| {
            if !std::mem::take(&mut first) {
                f.write_str("\n")?
            }
            Ok::<_, fmt::Error>(())
        };
        if !self.has_implicit_root_operations() {
            separator(f)?;
            f.write_str("schema {\n")?;
            for (operation_type, name) in self.iter_root_operations() {
                writeln!(f, "  {}: {name}", operation_type.name())?
            }
            f.write_str("}\n")?;
        }
        for def in self.directive_definitions.values() {
            if def.is_built_in() {
                continue;
            }
            separator(f)?;
            write_directive_definition(f, def)?
        }
        for ty in self.types.values() {
            if ty.is_built_in() {
                continue;
            }
            separator(f)?;
            write_extended_type(f, ty)?
        }
        Ok(())
    }
}

impl Schema {
    /// Returns whether a `schema` definition would be redundant when printing this schema
    fn has_implicit_root_operations(&self) -> bool {
        self.iter_root_operations()
            .all(|(operation_type, name)| name == default_root_name(operation_type))
    }
}

fn default_root_name(operation_type: OperationType) -> &'static str {
    match operation_type {
        OperationType::Query => "Query",
        OperationType::Mutation => "Mutation",
        OperationType::Subscription => "Subscription",
    }
}

fn write_directive_definition(
    f: &mut fmt::Formatter<'_>,
    def: &DirectiveDefinition,
) -> fmt::Result {
    write_description(f, "", def.description.as_deref())?;
    write!(f, "directive @{}", def.name)?;
    write_arguments_definition(f, &def.arguments)?;
    if def.repeatable {
        f.write_str(" repeatable")?
    }
    f.write_str(" on ")?;
    for (i, location) in def.locations.iter().enumerate() {
        if i > 0 {
            f.write_str(" | ")?
        }
        write!(f, "{location}")?
    }
    f.write_str("\n")
}

fn write_implements(f: &mut fmt::Formatter<'_>, interfaces: &IndexSet<NamedType>) -> fmt::Result {
    for (i, interface) in interfaces.iter().enumerate() {
        f.write_str(if i == 0 { " implements " } else { " & " })?;
        f.write_str(interface)?
    }
    Ok(())
}

fn write_extended_type(f: &mut fmt::Formatter<'_>, ty: &ExtendedType) -> fmt::Result {
    write_description(f, "", ty.description())?;
    match ty {
        ExtendedType::Scalar(def) => {
            write!(f, "scalar {}", def.name)?;
            write_directives(f, &def.directives)?;
            f.write_str("\n")
        }
        ExtendedType::Object(def) => {
            write!(f, "type {}", def.name)?;
            write_implements(f, &def.implements_interfaces)?;
            write_directives(f, &def.directives)?;
            write_fields(f, &def.fields)
        }
        ExtendedType::Interface(def) => {
            write!(f, "interface {}", def.name)?;
            write_implements(f, &def.implements_interfaces)?;
            write_directives(f, &def.directives)?;
            write_fields(f, &def.fields)
        }
        ExtendedType::Union(def) => {
            write!(f, "union {}", def.name)?;
            write_directives(f, &def.directives)?;
            for (i, member) in def.members.iter().enumerate() {
                f.write_str(if i == 0 { " = " } else { " | " })?;
                f.write_str(member)?
            }
            f.write_str("\n")
        }
        ExtendedType::Enum(def) => {
            write!(f, "enum {}", def.name)?;
            write_directives(f, &def.directives)?;
            f.write_str(" {\n")?;
            for value in def.values.values() {
                write_description(f, "  ", value.description.as_deref())?;
                write!(f, "  {}", value.value)?;
                write_directives(f, &value.directives)?;
                f.write_str("\n")?
            }
            f.write_str("}\n")
        }
        ExtendedType::InputObject(def) => {
            write!(f, "input {}", def.name)?;
            write_directives(f, &def.directives)?;
            f.write_str(" {\n")?;
            for field in def.fields.values() {
                write_description(f, "  ", field.description.as_deref())?;
                f.write_str("  ")?;
                write_input_value(f, field)?;
                f.write_str("\n")?
            }
            f.write_str("}\n")
        }
    }
}

fn write_fields(
    f: &mut fmt::Formatter<'_>,
    fields: &IndexMap<Name, Node<FieldDefinition>>,
) -> fmt::Result {
    if fields.is_empty() {
        return f.write_str("\n");
    }
    f.write_str(" {\n")?;
    for field in fields.values() {
        write_description(f, "  ", field.description.as_deref())?;
        write!(f, "  {}", field.name)?;
        write_arguments_definition(f, &field.arguments)?;
        write!(f, ": {}", field.ty)?;
        write_directives(f, &field.directives)?;
        f.write_str("\n")?
    }
    f.write_str("}\n")
}

fn write_arguments_definition(
    f: &mut fmt::Formatter<'_>,
    arguments: &[Node<InputValueDefinition>],
) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    f.write_str("(")?;
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?
        }
        if let Some(description) = &argument.description {
            write!(f, "{} ", Value::String(description.clone()))?
        }
        write_input_value(f, argument)?
    }
    f.write_str(")")
}

fn write_input_value(f: &mut fmt::Formatter<'_>, def: &InputValueDefinition) -> fmt::Result {
    write!(f, "{}: {}", def.name, def.ty)?;
    if let Some(default_value) = &def.default_value {
        write!(f, " = {default_value}")?
    }
    write_directives(f, &def.directives)
}

fn write_directives(f: &mut fmt::Formatter<'_>, directives: &DirectiveList) -> fmt::Result {
    for directive in directives.iter() {
        write!(f, " @{}", directive.name)?;
        if !directive.arguments.is_empty() {
            f.write_str("(")?;
            for (i, argument) in directive.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?
                }
                write!(f, "{}: {}", argument.name, argument.value)?
            }
            f.write_str(")")?
        }
    }
    Ok(())
}

/// Single-line descriptions are printed as quoted strings, others as block strings
fn write_description(
    f: &mut fmt::Formatter<'_>,
    indent: &str,
    description: Option<&str>,
) -> fmt::Result {
    let Some(description) = description else {
        return Ok(());
    };
    if !description.contains('\n') {
        return writeln!(f, "{indent}{}", Value::String(description.to_owned()));
    }
    writeln!(f, "{indent}\"\"\"")?;
    for line in description.lines() {
        f.write_str(indent)?;
        f.write_str(&line.replace("\"\"\"", "\\\"\"\""))?;
        f.write_char('\n')?
    }
    writeln!(f, "{indent}\"\"\"")
}
