use crate::NodeLocation;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

/// Create a [`Name`] from a string literal or identifier, checked for validity at compile time.
///
/// # Examples
///
/// ```
/// use apollo_extend::name;
///
/// assert_eq!(name!("Query").as_str(), "Query");
/// assert_eq!(name!(Query).as_str(), "Query");
/// ```
///
/// ```compile_fail
/// # use apollo_extend::name;
/// let invalid = name!("è_é");
/// ```
#[macro_export]
macro_rules! name {
    ($value: ident) => {
        $crate::name!(stringify!($value))
    };
    ($value: expr) => {{
        const _: () = { assert!($crate::Name::valid_syntax($value)) };
        $crate::Name::new_static_unchecked($value)
    }};
}

/// A GraphQL identifier, with the location it was parsed from if any.
///
/// Cloning is cheap. Comparison and hashing only look at the text,
/// so a parsed `Name` can be used to look up entries keyed by names from elsewhere.
#[derive(Clone)]
pub struct Name {
    text: Text,
    location: Option<NodeLocation>,
}

#[derive(Clone)]
enum Text {
    Shared(Arc<str>),
    Static(&'static str),
}

/// Tried to create a [`Name`] from a string that is not in valid
/// [GraphQL name](https://spec.graphql.org/draft/#sec-Names) syntax.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("`{name}` is not a valid GraphQL name")]
pub struct InvalidNameError {
    pub name: String,
}

impl Name {
    /// Create a new `Name`, checking its syntax
    pub fn new(value: &str) -> Result<Self, InvalidNameError> {
        if !Self::valid_syntax(value) {
            return Err(InvalidNameError {
                name: value.to_owned(),
            });
        }
        Ok(Self {
            text: Text::Shared(value.into()),
            location: None,
        })
    }

    /// A name the parser already checked
    pub(crate) fn parsed(value: &str, location: NodeLocation) -> Self {
        Self {
            text: Text::Shared(value.into()),
            location: Some(location),
        }
    }

    /// Create a new `Name` from a static string without checking its syntax.
    ///
    /// Prefer the [`name!`][crate::name!] macro which checks at compile time.
    pub const fn new_static_unchecked(value: &'static str) -> Self {
        Self {
            text: Text::Static(value),
            location: None,
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.text {
            Text::Shared(text) => text,
            Text::Static(text) => text,
        }
    }

    /// Where this name occurs in a parsed document
    pub fn location(&self) -> Option<NodeLocation> {
        self.location
    }

    /// Returns whether the given string is a valid GraphQL name
    ///
    /// <https://spec.graphql.org/October2021/#Name>
    pub const fn valid_syntax(value: &str) -> bool {
        let bytes = value.as_bytes();
        if bytes.is_empty() || bytes[0].is_ascii_digit() {
            return false;
        }
        let mut i = 0;
        while i < bytes.len() {
            if !(bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                return false;
            }
            i += 1
        }
        true
    }
}

impl std::ops::Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Same as `str` for the `Borrow<str>` impl
        self.as_str().hash(state)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Name {}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&'_ str> for Name {
    fn eq(&self, other: &&'_ str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl TryFrom<&str> for Name {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
