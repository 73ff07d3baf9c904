use derive_more::Display;

///
/// Severity
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Severity {
    #[display("warning")]
    Warning,
    #[display("note")]
    Note,
}

///
/// FilterProblem
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum FilterProblem {
    #[display("no comparator")]
    MissingComparator,
    #[display("no column before the comparator")]
    MissingKey,
}

///
/// Diagnostic
///
/// Non-fatal parse report. Line numbers are 1-based within the directive
/// body.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum Diagnostic {
    #[display("unknown option '{option}' on line {line}")]
    UnknownOption { line: usize, option: String },

    #[display("{problem} in filter '{argument}' on line {line}")]
    MalformedFilter {
        line: usize,
        argument: String,
        problem: FilterProblem,
    },

    #[display("{headers} headers declared for {columns} columns, using column names")]
    HeaderCountMismatch { headers: usize, columns: usize },
}

impl Diagnostic {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnknownOption { .. } | Self::HeaderCountMismatch { .. } => Severity::Warning,
            Self::MalformedFilter { .. } => Severity::Note,
        }
    }
}
