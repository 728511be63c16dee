use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::table::RawTable;

// ---------------------------------------------------------------------------
// Interaction – a reaction or a comment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InteractionKind {
    Reaction,
    Comment,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 2] = [InteractionKind::Reaction, InteractionKind::Comment];

    pub fn plural(&self) -> &'static str {
        match self {
            InteractionKind::Reaction => "Reactions",
            InteractionKind::Comment => "Comments",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub at: NaiveDateTime,
    pub kind: InteractionKind,
}

// ---------------------------------------------------------------------------
// Network records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub position: String,
    pub connected_on: NaiveDate,
    /// Only present in exports enriched with a `Sector` column.
    pub sector: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedJob {
    pub saved_at: NaiveDateTime,
    pub title: String,
    pub company: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub company: String,
    pub title: String,
    /// `None` when the cell did not parse; such rows are dropped by the career analysis.
    pub started_on: Option<NaiveDate>,
    /// `None` for the current position.
    pub finished_on: Option<NaiveDate>,
}

/// A dated marker drawn on activity charts (e.g. the start of a position).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerEvent {
    pub date: NaiveDate,
    pub label: String,
}

// ---------------------------------------------------------------------------
// ExportSource – one file of the export directory
// ---------------------------------------------------------------------------

/// Well-known files of a personal-data export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ExportSource {
    Reactions,
    Comments,
    Positions,
    Connections,
    Profile,
    ProfileSummary,
    Messages,
    Logins,
    Events,
    SavedJobs,
}

impl ExportSource {
    pub const ALL: [ExportSource; 10] = [
        ExportSource::Reactions,
        ExportSource::Comments,
        ExportSource::Positions,
        ExportSource::Connections,
        ExportSource::Profile,
        ExportSource::ProfileSummary,
        ExportSource::Messages,
        ExportSource::Logins,
        ExportSource::Events,
        ExportSource::SavedJobs,
    ];

    /// Path relative to the export directory.
    pub fn relative_path(&self) -> &'static str {
        match self {
            ExportSource::Reactions => "Reactions.csv",
            ExportSource::Comments => "Comments.csv",
            ExportSource::Positions => "Positions.csv",
            ExportSource::Connections => "Connections.csv",
            ExportSource::Profile => "Profile.csv",
            ExportSource::ProfileSummary => "Profile Summary.csv",
            ExportSource::Messages => "Messages.csv",
            ExportSource::Logins => "Logins.csv",
            ExportSource::Events => "Events.csv",
            ExportSource::SavedJobs => "jobs/Saved Jobs.csv",
        }
    }

    pub fn file_name(&self) -> &'static str {
        let path = self.relative_path();
        path.rsplit('/').next().unwrap_or(path)
    }
}

impl fmt::Display for ExportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

// ---------------------------------------------------------------------------
// ExportBundle – everything loaded from one export directory
// ---------------------------------------------------------------------------

/// The cleaned export: typed records plus what was found on disk.
#[derive(Debug, Clone, Default)]
pub struct ExportBundle {
    /// Reactions and comments merged, sorted by time.
    pub interactions: Vec<Interaction>,
    /// Sorted by connection date.
    pub connections: Vec<Connection>,
    /// Sorted by saved date.
    pub saved_jobs: Vec<SavedJob>,
    /// File order.
    pub positions: Vec<Position>,
    pub events: Vec<CareerEvent>,

    /// Presence of each well-known file, in [`ExportSource::ALL`] order.
    pub files: Vec<(ExportSource, bool)>,
    /// Raw tables kept for column validation by the analyses.
    pub connections_table: Option<RawTable>,
    pub saved_jobs_table: Option<RawTable>,
    pub positions_table: Option<RawTable>,

    /// Human-readable loading problems (unreadable files, missing date columns).
    pub problems: Vec<String>,
}

impl ExportBundle {
    pub fn is_present(&self, source: ExportSource) -> bool {
        self.files
            .iter()
            .any(|(s, present)| *s == source && *present)
    }

    pub fn count_of(&self, kind: InteractionKind) -> usize {
        self.interactions.iter().filter(|i| i.kind == kind).count()
    }

    /// Whether nothing at all could be loaded.
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
            && self.connections.is_empty()
            && self.saved_jobs.is_empty()
            && self.positions.is_empty()
    }
}
