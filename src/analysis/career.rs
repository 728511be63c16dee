use chrono::NaiveDate;

use super::{first_max, first_min};
use crate::data::loader::{COMPANY_NAME, FINISHED_ON, STARTED_ON, TITLE};
use crate::data::model::Position;
use crate::data::table::RawTable;
use crate::error::AnalysisError;

/// Average month length used to express durations in months.
pub const DAYS_PER_MONTH: f64 = 30.44;

/// A position with both ends resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Tenure {
    pub title: String,
    pub company: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// No finish date in the export; `end` is today.
    pub ongoing: bool,
}

impl Tenure {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn months(&self) -> f64 {
        self.days() as f64 / DAYS_PER_MONTH
    }

    pub fn label(&self) -> String {
        format!("{} – {}", self.title, self.company)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CareerReport {
    /// Sorted by start date.
    pub tenures: Vec<Tenure>,
    pub mean_months: f64,
    pub longest: Tenure,
    pub shortest: Tenure,
}

impl CareerReport {
    /// Tenures drawable on a timeline (strictly positive length).
    pub fn timeline(&self) -> impl Iterator<Item = &Tenure> {
        self.tenures.iter().filter(|t| t.days() > 0)
    }
}

pub fn career_report(
    positions: &[Position],
    table: Option<&RawTable>,
    today: NaiveDate,
) -> Result<CareerReport, AnalysisError> {
    let table = table.ok_or(AnalysisError::MissingFile("Positions.csv"))?;
    table.require(&[STARTED_ON, FINISHED_ON, TITLE, COMPANY_NAME])?;

    let mut tenures: Vec<Tenure> = positions
        .iter()
        .filter_map(|p| {
            let start = p.started_on?;
            Some(Tenure {
                title: p.title.clone(),
                company: p.company.clone(),
                start,
                end: p.finished_on.unwrap_or(today),
                ongoing: p.finished_on.is_none(),
            })
        })
        .collect();
    tenures.sort_by_key(|t| t.start);

    let no_data = AnalysisError::NoData("no position with a valid start date");
    let (longest, _) =
        first_max(tenures.iter().map(|t| (t, t.months()))).ok_or(no_data.clone())?;
    let (shortest, _) = first_min(tenures.iter().map(|t| (t, t.months()))).ok_or(no_data)?;
    let (longest, shortest) = (longest.clone(), shortest.clone());

    let mean_months = tenures.iter().map(Tenure::months).sum::<f64>() / tenures.len() as f64;

    Ok(CareerReport {
        tenures,
        mean_months,
        longest,
        shortest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_positions;

    const CSV: &str = "Company Name,Title,Description,Location,Started On,Finished On\n\
        Acme,Lead Engineer,,Paris,Mar 2022,\n\
        Initech,Engineer,,Lyon,Jan 2019,Jan 2022\n\
        Globex,Intern,,Nantes,Jun 2018,Sep 2018\n\
        Hooli,Ghost,,,,Jan 2020\n";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn report() -> CareerReport {
        let table = RawTable::from_reader(CSV.as_bytes(), "Positions.csv", None).unwrap();
        let positions = load_positions(&table);
        career_report(&positions, Some(&table), today()).unwrap()
    }

    #[test]
    fn drops_undated_and_sorts_by_start() {
        let r = report();
        let titles: Vec<_> = r.tenures.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Intern", "Engineer", "Lead Engineer"]);
    }

    #[test]
    fn ongoing_position_ends_today() {
        let r = report();
        let lead = r.tenures.last().unwrap();
        assert!(lead.ongoing);
        assert_eq!(lead.end, today());
    }

    #[test]
    fn indicators() {
        let r = report();
        assert_eq!(r.longest.title, "Engineer");
        assert_eq!(r.shortest.title, "Intern");
        // Jun 1 → Sep 1 2018 is 92 days.
        assert!((r.shortest.months() - 92.0 / DAYS_PER_MONTH).abs() < 1e-9);
        let expected =
            r.tenures.iter().map(|t| t.days() as f64).sum::<f64>() / 3.0 / DAYS_PER_MONTH;
        assert!((r.mean_months - expected).abs() < 1e-9);
        assert_eq!(r.shortest.label(), "Intern – Globex");
    }

    #[test]
    fn timeline_skips_non_positive_durations() {
        let table = RawTable::from_reader(CSV.as_bytes(), "Positions.csv", None).unwrap();
        let mut positions = load_positions(&table);
        positions[1].finished_on = positions[1].started_on;
        let r = career_report(&positions, Some(&table), today()).unwrap();
        assert_eq!(r.tenures.len(), 3);
        assert_eq!(r.timeline().count(), 2);
    }

    #[test]
    fn required_columns() {
        let table =
            RawTable::from_reader("Title,Started On\n".as_bytes(), "Positions.csv", None).unwrap();
        assert_eq!(
            career_report(&[], Some(&table), today()),
            Err(AnalysisError::MissingColumn {
                file: "Positions.csv".to_string(),
                column: "Finished On".to_string()
            })
        );
        assert_eq!(
            career_report(&[], None, today()),
            Err(AnalysisError::MissingFile("Positions.csv"))
        );
    }
}
