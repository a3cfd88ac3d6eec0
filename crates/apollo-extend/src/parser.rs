use crate::ast::Document;
use crate::diagnostic::Diagnostic;
use crate::diagnostic::Report;
use crate::diagnostic::ToDiagnostic;
use crate::FileId;
use crate::NodeLocation;
use indexmap::IndexMap;
use rowan::TextRange;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;

/// Configuration for parsing GraphQL source text into a [`Document`]
#[derive(Default, Debug, Clone)]
pub struct Parser {
    recursion_limit: Option<usize>,
    token_limit: Option<usize>,
    recursion_reached: usize,
    tokens_reached: usize,
}

/// A parsed source file, kept so diagnostics can quote it
pub struct SourceFile {
    path: PathBuf,
    source_text: String,
    ariadne: OnceLock<ariadne::Source>,
}

/// Source files by ID, shared between a document and everything built from it
pub type SourceMap = Arc<IndexMap<FileId, Arc<SourceFile>>>;

/// A partial result together with the syntax errors that made it partial.
pub struct WithErrors<T> {
    /// Definitions that could not be parsed are missing
    pub partial: T,

    pub sources: SourceMap,

    /// In source order
    pub errors: Vec<SyntaxError>,
}

/// A syntax error, or a configured parser limit that was reached
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub location: Option<NodeLocation>,
    pub is_limit: bool,
}

/// A 1-indexed line and column in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum nesting depth before parsing gives up.
    pub fn recursion_limit(mut self, value: usize) -> Self {
        self.recursion_limit = Some(value);
        self
    }

    /// Maximum number of tokens before parsing gives up. Unlimited by default.
    pub fn token_limit(mut self, value: usize) -> Self {
        self.token_limit = Some(value);
        self
    }

    /// Parse `source_text` into a document.
    ///
    /// `path` only names the file in diagnostics; nothing is read from disk.
    pub fn parse_ast(
        &mut self,
        source_text: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Document, WithErrors<Document>> {
        self.parse_ast_with_file_id(source_text.into(), path.as_ref().to_owned(), FileId::new())
    }

    pub(crate) fn parse_ast_with_file_id(
        &mut self,
        source_text: String,
        path: PathBuf,
        file_id: FileId,
    ) -> Result<Document, WithErrors<Document>> {
        let mut parser = apollo_parser::Parser::new(&source_text);
        if let Some(limit) = self.recursion_limit {
            parser = parser.recursion_limit(limit)
        }
        if let Some(limit) = self.token_limit {
            parser = parser.token_limit(limit)
        }
        let tree = parser.parse();
        self.recursion_reached = tree.recursion_limit().high;
        self.tokens_reached = tree.token_limit().high;

        let errors: Vec<_> = tree
            .errors()
            .map(|error| SyntaxError::from_parser(file_id, error))
            .collect();
        let sources: SourceMap = Arc::new(IndexMap::from([(
            file_id,
            Arc::new(SourceFile::new(path, source_text)),
        )]));
        let document = Document::from_cst(&tree.document(), file_id, sources.clone());
        if errors.is_empty() {
            tracing::trace!(definitions = document.definitions.len(), "parsed document");
            Ok(document)
        } else {
            tracing::debug!(errors = errors.len(), "document has syntax errors");
            Err(WithErrors {
                partial: document,
                sources,
                errors,
            })
        }
    }

    /// Deepest nesting seen by the last parse
    pub fn recursion_reached(&self) -> usize {
        self.recursion_reached
    }

    /// Number of tokens seen by the last parse
    pub fn tokens_reached(&self) -> usize {
        self.tokens_reached
    }
}

impl SourceFile {
    pub(crate) fn new(path: PathBuf, source_text: String) -> Self {
        Self {
            path,
            source_text,
            ariadne: OnceLock::new(),
        }
    }

    /// The path (or any string) naming this file in diagnostics
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub(crate) fn ariadne(&self) -> &ariadne::Source {
        self.ariadne
            .get_or_init(|| ariadne::Source::from(self.source_text.as_str()))
    }

    /// Converts a UTF-8 byte offset to the char offset ariadne counts in.
    ///
    /// An offset inside a multibyte character maps to that character.
    pub(crate) fn char_offset(&self, byte_offset: usize) -> usize {
        let text = self.source_text.as_str();
        let mut end = byte_offset.min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text[..end].chars().count()
    }

    /// Line and column of a UTF-8 byte `offset`, or `None` if it is out of bounds
    /// or not on a character boundary.
    pub fn get_line_column(&self, offset: usize) -> Option<LineColumn> {
        let before = self.source_text.get(..offset)?;
        let line_start = before.rfind('\n').map_or(0, |newline| newline + 1);
        Some(LineColumn {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
        })
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("len", &self.source_text.len())
            .finish_non_exhaustive()
    }
}

impl SyntaxError {
    fn from_parser(file_id: FileId, error: &apollo_parser::Error) -> Self {
        // Offsets past 4 GiB have no `TextRange`
        let start = u32::try_from(error.index()).ok();
        let len = u32::try_from(error.data().len()).ok();
        Self {
            message: error.message().to_owned(),
            location: start.zip(len).map(|(start, len)| NodeLocation {
                file_id,
                range: TextRange::at(start.into(), len.into()),
            }),
            is_limit: error.is_limit(),
        }
    }
}

impl ToDiagnostic for SyntaxError {
    fn location(&self) -> Option<NodeLocation> {
        self.location
    }

    fn report(&self, report: &mut Report) {
        if self.is_limit {
            report.message(format_args!("parser limit reached: {}", self.message));
            report.label(self.location, "limit reached here");
        } else {
            report.message(format_args!("syntax error: {}", self.message));
            report.label(self.location, &self.message);
        }
    }
}

impl<T> WithErrors<T> {
    /// One pretty-printable diagnostic per syntax error
    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic<&SyntaxError>> + '_ {
        self.errors
            .iter()
            .map(|error| error.to_diagnostic(&self.sources))
    }
}

impl<T> fmt::Debug for WithErrors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.diagnostics()
            .try_for_each(|diagnostic| writeln!(f, "{diagnostic:?}"))
    }
}

impl<T> fmt::Display for WithErrors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.diagnostics()
            .try_for_each(|diagnostic| writeln!(f, "{diagnostic}"))
    }
}

impl<T> std::error::Error for WithErrors<T> {}
