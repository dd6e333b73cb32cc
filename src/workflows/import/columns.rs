use super::LoadError;
use csv::StringRecord;
use serde::Serialize;
use std::fmt;

/// Which of the two report sources a header or row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Tasks,
    Meetings,
}

impl SourceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tasks => "task export",
            Self::Meetings => "meeting log",
        }
    }

    pub const fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Tasks => &[
                "id",
                "created_at",
                "completed_at",
                "name",
                "section_column",
                "assignee",
                "due_date",
                "effort_level",
                "workstream",
            ],
            Self::Meetings => &["assignee", "section_column", "hours"],
        }
    }

    const fn aliases(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Tasks => &[("task_id", "id")],
            Self::Meetings => &[("assignee_nickname", "assignee")],
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase snake form of a header: `"Section/Column"` becomes `section_column`.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let mut normalized = String::with_capacity(cleaned.len());
    let mut pending_separator = false;

    for ch in cleaned.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            normalized.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    normalized
}

/// Normalizes every header and applies the source's aliases. An alias is
/// skipped when its canonical name is already present.
pub(crate) fn canonical_headers(headers: &StringRecord, kind: SourceKind) -> StringRecord {
    let mut names: Vec<String> = headers.iter().map(normalize_header).collect();

    for (alias, canonical) in kind.aliases() {
        if names.iter().any(|name| name == canonical) {
            continue;
        }
        if let Some(name) = names.iter_mut().find(|name| name.as_str() == *alias) {
            *name = (*canonical).to_string();
        }
    }

    StringRecord::from(names)
}

pub(crate) fn require_columns(headers: &StringRecord, kind: SourceKind) -> Result<(), LoadError> {
    match kind
        .required_columns()
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        Some(column) => Err(LoadError::MissingColumn {
            kind,
            column: *column,
        }),
        None => Ok(()),
    }
}
