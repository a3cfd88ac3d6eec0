//! Pretty-printable reports for errors that point into GraphQL source files.
//!
//! [`ExtensionError`][crate::ExtensionError] and [`SyntaxError`][crate::parser::SyntaxError]
//! implement [`ToDiagnostic`]. Pairing an error with a [`SourceMap`] gives a [`Diagnostic`]
//! that formats as an annotated source excerpt.
//! Extension errors can point into the base schema as well as into the extension document,
//! so [`Schema::sources_with`][crate::Schema::sources_with] provides both:
//!
//! ```rust
//! use apollo_extend::ast::Document;
//! use apollo_extend::diagnostic::ResultExt;
//! use apollo_extend::Schema;
//! use std::sync::Arc;
//!
//! let base = Arc::new(Schema::new());
//! let document = Document::parse("extend type Missing { field: Int }", "ext.graphql").unwrap();
//! let error = apollo_extend::extend_schema(&base, &document)
//!     .to_diagnostic(&base.sources_with(&document))
//!     .unwrap_err();
//! // Debug-formatting uses colors, Display-formatting does not.
//! eprintln!("{error:?}");
//! assert!(error.to_string().contains("ext.graphql"));
//! ```
use crate::parser::LineColumn;
use crate::parser::SourceMap;
use crate::FileId;
use crate::NodeLocation;
use ariadne::ColorGenerator;
use ariadne::ReportKind;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

/// An error together with the source files it may point into.
pub struct Diagnostic<T> {
    pub sources: SourceMap,
    pub error: T,
}

/// An error report being filled in by [`ToDiagnostic::report`]
pub struct Report {
    sources: SourceMap,
    colors: ColorGenerator,
    builder: ariadne::ReportBuilder<'static, Span>,
}

/// An error that can be rendered against GraphQL sources
pub trait ToDiagnostic {
    /// Where the report is anchored, if anywhere
    fn location(&self) -> Option<NodeLocation>;

    fn report(&self, report: &mut Report);

    fn to_diagnostic(self, sources: &SourceMap) -> Diagnostic<Self>
    where
        Self: Sized,
    {
        Diagnostic {
            sources: sources.clone(),
            error: self,
        }
    }
}

/// Turns the error branch of a `Result` into a [`Diagnostic`]
pub trait ResultExt<T, E> {
    fn to_diagnostic(self, sources: &SourceMap) -> Result<T, Diagnostic<E>>;
}

/// ariadne spans count chars, not bytes
type Span = (FileId, Range<usize>);

fn span(sources: &SourceMap, location: NodeLocation) -> Option<Span> {
    let file = sources.get(&location.file_id())?;
    let start = file.char_offset(location.offset());
    let end = file.char_offset(location.end_offset());
    Some((location.file_id(), start..end))
}

impl Report {
    fn new(sources: SourceMap, location: Option<NodeLocation>, color: bool) -> Self {
        let (file_id, range) = location
            .and_then(|location| span(&sources, location))
            .unwrap_or((FileId::NONE, 0..0));
        let builder = ariadne::Report::build(ReportKind::Error, file_id, range.start)
            .with_config(ariadne::Config::default().with_color(color));
        Self {
            sources,
            colors: ColorGenerator::new(),
            builder,
        }
    }

    pub fn message(&mut self, message: impl ToString) {
        self.builder.set_message(message)
    }

    /// Usually a suggestion on how to fix the error
    pub fn help(&mut self, help: impl ToString) {
        self.builder.set_help(help)
    }

    /// Labels `location` with `message`.
    /// Nothing is added without a location, or when its file is not in the source map.
    pub fn label(&mut self, location: Option<NodeLocation>, message: impl ToString) {
        let Some(span) = location.and_then(|location| span(&self.sources, location)) else {
            return;
        };
        let label = ariadne::Label::new(span)
            .with_message(message)
            .with_color(self.colors.next());
        self.builder.add_label(label)
    }

    fn render(self) -> Result<String, std::io::Error> {
        let mut out = Vec::new();
        self.builder
            .finish()
            .write(SourceCache(&self.sources), &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

struct SourceCache<'a>(&'a SourceMap);

impl ariadne::Cache<FileId> for SourceCache<'_> {
    fn fetch(&mut self, file_id: &FileId) -> Result<&ariadne::Source, Box<dyn fmt::Debug + '_>> {
        if let Some(file) = self.0.get(file_id) {
            return Ok(file.ariadne());
        }
        if *file_id == FileId::NONE {
            static EMPTY: OnceLock<ariadne::Source> = OnceLock::new();
            return Ok(EMPTY.get_or_init(|| ariadne::Source::from("")));
        }
        Err(Box::new(format!("no source file for {file_id:?}")))
    }

    fn display<'a>(&self, file_id: &'a FileId) -> Option<Box<dyn fmt::Display + 'a>> {
        if *file_id == FileId::NONE {
            return Some(Box::new("(no source file)"));
        }
        let path = self.0.get(file_id)?.path().display().to_string();
        Some(Box::new(path))
    }
}

impl<T: ToDiagnostic> Diagnostic<T> {
    /// 1-indexed line and column of the error's main location
    pub fn line_column(&self) -> Option<LineColumn> {
        let location = self.error.location()?;
        self.sources
            .get(&location.file_id())?
            .get_line_column(location.offset())
    }

    fn format(&self, f: &mut fmt::Formatter<'_>, color: bool) -> fmt::Result {
        let mut report = Report::new(self.sources.clone(), self.error.location(), color);
        self.error.report(&mut report);
        let rendered = report.render().map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl<T> std::ops::Deref for Diagnostic<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.error
    }
}

impl<T: ToDiagnostic> fmt::Debug for Diagnostic<T> {
    /// Colored when stderr is a terminal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format(f, true)
    }
}

impl<T: ToDiagnostic> fmt::Display for Diagnostic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.format(f, false)
    }
}

impl<T: std::error::Error + ToDiagnostic> std::error::Error for Diagnostic<T> {}

impl<T: ToDiagnostic> ToDiagnostic for &T {
    fn location(&self) -> Option<NodeLocation> {
        ToDiagnostic::location(*self)
    }

    fn report(&self, report: &mut Report) {
        ToDiagnostic::report(*self, report)
    }
}

impl<T, E: ToDiagnostic> ResultExt<T, E> for Result<T, E> {
    fn to_diagnostic(self, sources: &SourceMap) -> Result<T, Diagnostic<E>> {
        self.map_err(|error| error.to_diagnostic(sources))
    }
}
