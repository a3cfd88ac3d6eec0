use apollo_parser::SyntaxNode;
use rowan::TextRange;
use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/// A shared, immutable GraphQL node with an optional source location.
///
/// Cloning a `Node` keeps pointing at the same allocation. An extended schema holds
/// clones of every definition it did not change, which [`Node::ptr_eq`] can observe.
pub struct Node<T: ?Sized>(triomphe::Arc<Located<T>>);

struct Located<T: ?Sized> {
    location: Option<NodeLocation>,
    value: T,
}

/// Where a node was parsed from: a source file and a byte range within it
#[derive(Clone, Copy, Hash, PartialEq, Eq)]
pub struct NodeLocation {
    pub(crate) file_id: FileId,
    pub(crate) range: TextRange,
}

/// Identifies a parsed source file within a [`SourceMap`][crate::SourceMap].
///
/// IDs are unique within the process, so source maps of different documents can be merged.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileId(u64);

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(FileId::FIRST_PARSED);

impl<T> Node<T> {
    pub(crate) fn located(value: T, location: Option<NodeLocation>) -> Self {
        Self(triomphe::Arc::new(Located { location, value }))
    }

    /// Wraps `value` in a new node with the location of `self`
    pub fn same_location<U>(&self, value: U) -> Node<U> {
        Node::located(value, self.0.location)
    }

    /// Copy-on-write access to the value, cloning it first if the allocation is shared
    pub fn make_mut(&mut self) -> &mut T
    where
        T: Clone,
    {
        &mut triomphe::Arc::make_mut(&mut self.0).value
    }
}

impl<T: ?Sized> Node<T> {
    pub fn location(&self) -> Option<NodeLocation> {
        self.0.location
    }

    /// Whether this node comes from the built-in definitions every schema starts with
    pub fn is_built_in(&self) -> bool {
        self.location()
            .is_some_and(|location| location.file_id == FileId::BUILT_IN)
    }

    /// Returns whether both nodes share the same allocation
    pub fn ptr_eq(&self, other: &Self) -> bool {
        triomphe::Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> std::ops::Deref for Node<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0.value
    }
}

impl<T: ?Sized> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self(triomphe::Arc::clone(&self.0))
    }
}

impl<T: Clone> Clone for Located<T> {
    fn clone(&self) -> Self {
        Self {
            location: self.location,
            value: self.value.clone(),
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location() {
            write!(f, "{location:?} ")?
        }
        self.0.value.fmt(f)
    }
}

impl<T: ?Sized + fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.value.fmt(f)
    }
}

/// Locations are ignored
impl<T: ?Sized + PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.value == other.0.value
    }
}

impl<T: ?Sized + Eq> Eq for Node<T> {}

impl<T: ?Sized + std::hash::Hash> std::hash::Hash for Node<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.value.hash(state)
    }
}

impl NodeLocation {
    pub(crate) fn of(file_id: FileId, node: &SyntaxNode) -> Self {
        Self {
            file_id,
            range: node.text_range(),
        }
    }

    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    /// Start of the range, in UTF-8 bytes from the start of the file
    pub fn offset(&self) -> usize {
        self.range.start().into()
    }

    /// End of the range (exclusive), in UTF-8 bytes from the start of the file
    pub fn end_offset(&self) -> usize {
        self.range.end().into()
    }
}

impl fmt::Debug for NodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}@{}..{}",
            self.file_id,
            self.offset(),
            self.end_offset()
        )
    }
}

impl FileId {
    /// The file containing built-in scalars and directives
    pub const BUILT_IN: Self = Self(1);

    /// Stands in for a file when a report has no location
    pub(crate) const NONE: Self = Self(2);

    const FIRST_PARSED: u64 = 3;

    /// Returns a file ID not used before in this process
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BUILT_IN => f.write_str("built_in"),
            Self::NONE => f.write_str("none"),
            Self(id) => write!(f, "file#{id}"),
        }
    }
}
