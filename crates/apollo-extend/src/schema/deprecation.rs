use crate::ast::DirectiveList;
use crate::ast::Value;

/// Reason used when `@deprecated` is applied without a `reason` argument
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Deprecation status of a field or enum value, from a `@deprecated` directive application
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Deprecation {
    pub reason: String,
}

impl Deprecation {
    /// Interprets the `@deprecated` application among `directives`, if any.
    ///
    /// A missing or `null` reason is replaced with [`DEFAULT_DEPRECATION_REASON`].
    /// Non-string reasons are printed as GraphQL values.
    pub fn from_directives(directives: &DirectiveList) -> Option<Self> {
        let directive = directives.get("deprecated")?;
        let reason = match directive.argument_by_name("reason").map(|value| &**value) {
            None | Some(Value::Null) => DEFAULT_DEPRECATION_REASON.to_owned(),
            Some(Value::String(reason)) => reason.clone(),
            Some(other) => other.to_string(),
        };
        Some(Self { reason })
    }
}
