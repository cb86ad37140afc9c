use std::fmt;

/// Machine-readable error codes for scripting-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ExportRootMissing,
    NoExportsFound,
    ConfigParseError,
    MainLiftCountInvalid,
    ExportReadFailed,
    ExportParseError,
    InvalidRepCount,
    ReportWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ExportRootMissing => "E1001",
            Self::NoExportsFound => "E1002",
            Self::ConfigParseError => "E1003",
            Self::MainLiftCountInvalid => "E1004",
            Self::ExportReadFailed => "E2001",
            Self::ExportParseError => "E2002",
            Self::InvalidRepCount => "E2003",
            Self::ReportWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ExportRootMissing => "Export root not found",
            Self::NoExportsFound => "No workout exports found",
            Self::ConfigParseError => "Config file parse error",
            Self::MainLiftCountInvalid => "Main lift list has wrong length",
            Self::ExportReadFailed => "Export file read failed",
            Self::ExportParseError => "Malformed export row",
            Self::InvalidRepCount => "Invalid rep count",
            Self::ReportWriteFailed => "Report artifact write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ExportRootMissing => {
                Some("Pass --root pointing at the directory of per-user export folders.")
            }
            Self::NoExportsFound => Some("Expected <user>/strong.csv one level below the root."),
            Self::ConfigParseError => Some("Fix syntax in maxlog.toml and retry."),
            Self::MainLiftCountInvalid => {
                Some("Configure exactly three main lifts; the summary column layout is fixed.")
            }
            Self::ExportReadFailed => Some("Check file permissions on the export tree."),
            Self::ExportParseError => {
                Some("Fix the named row in the source export; malformed rows are never skipped.")
            }
            Self::InvalidRepCount => {
                Some("Fix the rep count in the source export; sets must have at least 1 rep.")
            }
            Self::ReportWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
