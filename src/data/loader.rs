use std::path::Path;

use super::dates::{parse_date, parse_datetime};
use super::model::{
    CareerEvent, Connection, ExportBundle, ExportSource, Interaction, InteractionKind, Position,
    SavedJob,
};
use super::table::RawTable;
use crate::error::ExportError;

// ---------------------------------------------------------------------------
// Column names used by the exports
// ---------------------------------------------------------------------------

pub const DATE: &str = "Date";
pub const CONNECTED_ON: &str = "Connected On";
pub const SECTOR: &str = "Sector";
pub const SAVED_DATE: &str = "Saved Date";
pub const JOB_TITLE: &str = "Job Title";
pub const JOB_URL: &str = "Job Url";
pub const COMPANY_NAME: &str = "Company Name";
pub const TITLE: &str = "Title";
pub const STARTED_ON: &str = "Started On";
pub const FINISHED_ON: &str = "Finished On";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Detect the well-known files in `data_dir` and load the ones the analyses use.
///
/// Missing files are not errors: the matching record list stays empty.
/// Files that cannot be read, or lack their date column, are reported in
/// [`ExportBundle::problems`] and skipped.
pub fn detect_and_load(data_dir: &Path) -> Result<ExportBundle, ExportError> {
    if !data_dir.is_dir() {
        return Err(ExportError::MissingDataDir(data_dir.to_path_buf()));
    }

    let mut bundle = ExportBundle {
        files: ExportSource::ALL
            .iter()
            .map(|s| (*s, data_dir.join(s.relative_path()).is_file()))
            .collect(),
        ..Default::default()
    };

    // ---- Interactions ----
    for (source, kind) in [
        (ExportSource::Reactions, InteractionKind::Reaction),
        (ExportSource::Comments, InteractionKind::Comment),
    ] {
        if let Some(table) = load_table(data_dir, source, None, &mut bundle.problems) {
            match load_interactions(&table, kind) {
                Ok(mut rows) => {
                    log::info!("Loaded {} {} from {}", rows.len(), kind, source);
                    bundle.interactions.append(&mut rows);
                }
                Err(e) => report(&mut bundle.problems, e),
            }
        }
    }
    bundle.interactions.sort_by_key(|i| i.at);

    // ---- Connections ----
    if let Some(table) = load_table(
        data_dir,
        ExportSource::Connections,
        Some(CONNECTED_ON),
        &mut bundle.problems,
    ) {
        match load_connections(&table) {
            Ok(rows) => {
                log::info!("Loaded {} connections", rows.len());
                bundle.connections = rows;
            }
            Err(e) => report(&mut bundle.problems, e),
        }
        bundle.connections_table = Some(table);
    }

    // ---- Saved jobs ----
    if let Some(table) = load_table(data_dir, ExportSource::SavedJobs, None, &mut bundle.problems)
    {
        match load_saved_jobs(&table) {
            Ok(rows) => {
                log::info!("Loaded {} saved jobs", rows.len());
                bundle.saved_jobs = rows;
            }
            Err(e) => report(&mut bundle.problems, e),
        }
        bundle.saved_jobs_table = Some(table);
    }

    // ---- Positions ----
    if let Some(table) = load_table(data_dir, ExportSource::Positions, None, &mut bundle.problems)
    {
        bundle.positions = load_positions(&table);
        bundle.events = career_events(&bundle.positions);
        log::info!(
            "Loaded {} positions ({} dated events)",
            bundle.positions.len(),
            bundle.events.len()
        );
        bundle.positions_table = Some(table);
    }

    Ok(bundle)
}

fn report(problems: &mut Vec<String>, err: ExportError) {
    log::warn!("{err}");
    problems.push(err.to_string());
}

/// Read one export file if it exists. When `anchor` is given, any preamble
/// before the header containing it is skipped; if no such header exists the
/// file is re-read as a plain CSV so the other columns stay available.
fn load_table(
    data_dir: &Path,
    source: ExportSource,
    anchor: Option<&str>,
    problems: &mut Vec<String>,
) -> Option<RawTable> {
    let path = data_dir.join(source.relative_path());
    if !path.is_file() {
        log::debug!("{} not present", source.relative_path());
        return None;
    }
    let name = source.file_name();

    let result = match RawTable::from_path_with_header(&path, name, anchor) {
        // The typed loader reports the missing column itself.
        Err(ExportError::HeaderNotFound { .. }) => RawTable::from_path(&path, name),
        other => other,
    };

    match result {
        Ok(table) => Some(table),
        Err(e) => {
            report(problems, e);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Per-file typing
// ---------------------------------------------------------------------------

/// Rows whose `Date` does not parse are dropped.
pub fn load_interactions(
    table: &RawTable,
    kind: InteractionKind,
) -> Result<Vec<Interaction>, ExportError> {
    table.require(&[DATE])?;
    let rows: Vec<Interaction> = table
        .rows()
        .filter_map(|row| row.get(DATE).and_then(parse_datetime))
        .map(|at| Interaction { at, kind })
        .collect();
    log_dropped(table, rows.len());
    Ok(rows)
}

pub fn load_connections(table: &RawTable) -> Result<Vec<Connection>, ExportError> {
    table.require(&[CONNECTED_ON])?;
    let mut rows: Vec<Connection> = table
        .rows()
        .filter_map(|row| {
            let connected_on = row.get(CONNECTED_ON).and_then(parse_date)?;
            Some(Connection {
                first_name: row.text("First Name"),
                last_name: row.text("Last Name"),
                company: row.text("Company"),
                position: row.text("Position"),
                connected_on,
                sector: row.get(SECTOR).map(str::to_string),
            })
        })
        .collect();
    log_dropped(table, rows.len());
    rows.sort_by_key(|c| c.connected_on);
    Ok(rows)
}

pub fn load_saved_jobs(table: &RawTable) -> Result<Vec<SavedJob>, ExportError> {
    table.require(&[SAVED_DATE])?;
    let mut rows: Vec<SavedJob> = table
        .rows()
        .filter_map(|row| {
            let saved_at = row.get(SAVED_DATE).and_then(parse_datetime)?;
            Some(SavedJob {
                saved_at,
                title: row.text(JOB_TITLE),
                company: row.text(COMPANY_NAME),
                url: row.text(JOB_URL),
            })
        })
        .collect();
    log_dropped(table, rows.len());
    rows.sort_by_key(|j| j.saved_at);
    Ok(rows)
}

/// Positions keep unparsed dates as `None`; the career analysis decides
/// what to drop.
pub fn load_positions(table: &RawTable) -> Vec<Position> {
    table
        .rows()
        .map(|row| Position {
            company: row.text(COMPANY_NAME),
            title: row.text(TITLE),
            started_on: row.get(STARTED_ON).and_then(parse_date),
            finished_on: row.get(FINISHED_ON).and_then(parse_date),
        })
        .collect()
}

pub fn career_events(positions: &[Position]) -> Vec<CareerEvent> {
    positions
        .iter()
        .filter_map(|p| {
            let date = p.started_on?;
            let title = if p.title.is_empty() {
                "Position"
            } else {
                p.title.as_str()
            };
            Some(CareerEvent {
                date,
                label: format!("Started: {title}"),
            })
        })
        .collect()
}

fn log_dropped(table: &RawTable, kept: usize) {
    let dropped = table.len() - kept;
    if dropped > 0 {
        log::debug!("{}: dropped {dropped} rows with unparseable dates", table.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, rel: &str, text: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = detect_and_load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ExportError::MissingDataDir(_)));
    }

    #[test]
    fn empty_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = detect_and_load(dir.path()).unwrap();
        assert!(bundle.is_empty());
        assert_eq!(bundle.files.len(), ExportSource::ALL.len());
        assert!(bundle.files.iter().all(|(_, present)| !present));
        assert!(bundle.problems.is_empty());
    }

    #[test]
    fn merges_and_sorts_interactions() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "Reactions.csv",
            "Date,Type,Link\n2024-03-05 14:00:00,LIKE,x\nbad,LIKE,y\n2024-01-01 09:00:00,LIKE,z\n",
        );
        write(
            dir.path(),
            "Comments.csv",
            "\u{feff}Date,Link,Message\n2024-02-10 20:00:00,x,hello\n",
        );
        let bundle = detect_and_load(dir.path()).unwrap();

        assert_eq!(bundle.interactions.len(), 3);
        assert_eq!(bundle.count_of(InteractionKind::Reaction), 2);
        assert_eq!(bundle.count_of(InteractionKind::Comment), 1);
        let kinds: Vec<_> = bundle.interactions.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InteractionKind::Reaction,
                InteractionKind::Comment,
                InteractionKind::Reaction
            ]
        );
        assert!(bundle.is_present(ExportSource::Reactions));
        assert!(!bundle.is_present(ExportSource::Messages));
    }

    #[test]
    fn missing_date_column_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Reactions.csv", "When,Type\n2024-01-01,LIKE\n");
        write(
            dir.path(),
            "Comments.csv",
            "Date,Message\n2024-01-02 10:00:00,hi\n",
        );
        let bundle = detect_and_load(dir.path()).unwrap();
        assert_eq!(bundle.interactions.len(), 1);
        assert_eq!(bundle.problems.len(), 1);
        assert!(bundle.problems[0].contains("'Date'"));
    }

    #[test]
    fn unreadable_file_is_reported_and_others_still_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Reactions.csv"),
            b"Date,Type\n2024-01-01 09:00:00,\xff\xfeLIKE\n",
        )
        .unwrap();
        write(
            dir.path(),
            "Comments.csv",
            "Date,Message\n2024-01-02 10:00:00,hi\n",
        );
        let bundle = detect_and_load(dir.path()).unwrap();

        assert_eq!(bundle.problems.len(), 1);
        assert!(bundle.problems[0].contains("Reactions.csv"));
        assert_eq!(bundle.count_of(InteractionKind::Reaction), 0);
        assert_eq!(bundle.count_of(InteractionKind::Comment), 1);
        assert!(bundle.is_present(ExportSource::Reactions));
    }

    #[test]
    fn connections_skip_notes_preamble() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "Connections.csv",
            "Notes:\n\"When exporting your connection data, you may notice missing emails.\"\n\n\
             First Name,Last Name,URL,Email Address,Company,Position,Connected On\n\
             Ada,Lovelace,u,,Analytical,Engineer,10 Feb 2024\n\
             Alan,Turing,u,,Bletchley,Researcher,05 Jan 2024\n",
        );
        let bundle = detect_and_load(dir.path()).unwrap();
        assert_eq!(bundle.connections.len(), 2);
        assert_eq!(bundle.connections[0].first_name, "Alan");
        assert_eq!(bundle.connections[1].company, "Analytical");
        assert!(bundle.connections_table.is_some());
    }

    #[test]
    fn saved_jobs_live_in_jobs_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "jobs/Saved Jobs.csv",
            "Saved Date,Job Url,Job Title,Company Name\n\"3/5/24, 10:07 PM\",u,Data Analyst,Acme\n",
        );
        let bundle = detect_and_load(dir.path()).unwrap();
        assert_eq!(bundle.saved_jobs.len(), 1);
        assert_eq!(bundle.saved_jobs[0].company, "Acme");
        assert!(bundle.is_present(ExportSource::SavedJobs));
    }

    #[test]
    fn positions_produce_career_events() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "Positions.csv",
            "Company Name,Title,Description,Location,Started On,Finished On\n\
             Acme,Engineer,,Paris,Mar 2021,\n\
             Initech,,,Lyon,Jan 2018,Feb 2021\n\
             Bogus,Intern,,,,\n",
        );
        let bundle = detect_and_load(dir.path()).unwrap();
        assert_eq!(bundle.positions.len(), 3);
        assert_eq!(bundle.positions[0].finished_on, None);
        assert_eq!(bundle.events.len(), 2);
        assert_eq!(bundle.events[0].label, "Started: Engineer");
        assert_eq!(bundle.events[1].label, "Started: Position");
    }
}
