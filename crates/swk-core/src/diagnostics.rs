//! Recoverable findings collected while resolving a document.
//!
//! Nothing in resolution fails on a parseable document; shapes that cannot be
//! expressed are skipped and reported here instead. Each finding is also
//! forwarded to the `log` facade.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A schema property with no `$ref` and no usable `type` was dropped.
    IgnoredProperty,
    /// A query/path parameter with no usable type was dropped.
    IgnoredParameter,
    /// A `$ref` points at a name missing from the schema table.
    MissingSchema,
    /// A referenced schema has no properties to declare.
    EmptySchema,
    /// A `$ref` outside the schema tables, or one that derives no name.
    InvalidReference,
    /// A `{name}` in the path template that no parameter declares.
    UndeclaredPathVariable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// The schema, parameter or reference the finding is about.
    pub subject: String,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.detail)
    }
}

/// Per-call diagnostics sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(
        &mut self,
        kind: DiagnosticKind,
        subject: impl Into<String>,
        detail: impl Into<String>,
    ) {
        let diagnostic = Diagnostic {
            kind,
            subject: subject.into(),
            detail: detail.into(),
        };
        match kind {
            DiagnosticKind::EmptySchema => log::debug!("{diagnostic}"),
            _ => log::warn!("{diagnostic}"),
        }
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }
}
