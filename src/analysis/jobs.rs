use super::{count_by_month, first_max, value_counts};
use crate::data::dates::YearMonth;
use crate::data::loader::{COMPANY_NAME, JOB_TITLE, SAVED_DATE};
use crate::data::model::SavedJob;
use crate::data::table::RawTable;
use crate::error::AnalysisError;

/// Job-search metrics derived from saved job offers.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedJobsReport {
    pub total: usize,
    pub monthly: Vec<(YearMonth, usize)>,
    pub busiest_month: (YearMonth, usize),
    /// Most saved companies, at most `top_n`.
    pub top_companies: Vec<(String, usize)>,
    /// Most frequent job titles, at most `top_n`.
    pub top_titles: Vec<(String, usize)>,
}

impl SavedJobsReport {
    pub fn top_company(&self) -> Option<&str> {
        self.top_companies.first().map(|(c, _)| c.as_str())
    }

    pub fn top_title(&self) -> Option<&str> {
        self.top_titles.first().map(|(t, _)| t.as_str())
    }
}

pub fn saved_jobs_report(
    jobs: &[SavedJob],
    table: Option<&RawTable>,
    top_n: usize,
) -> Result<SavedJobsReport, AnalysisError> {
    let table = table.ok_or(AnalysisError::MissingFile("Saved Jobs.csv"))?;
    table.require(&[SAVED_DATE, COMPANY_NAME, JOB_TITLE])?;
    if jobs.is_empty() {
        return Err(AnalysisError::NoData("no saved job with a valid date"));
    }

    let monthly = count_by_month(jobs.iter().map(|j| j.saved_at));
    let busiest_month = first_max(monthly.iter().copied())
        .ok_or(AnalysisError::NoData("no saved job with a valid date"))?;

    let mut top_companies = value_counts(jobs.iter().map(|j| j.company.as_str()));
    top_companies.truncate(top_n);
    let mut top_titles = value_counts(jobs.iter().map(|j| j.title.as_str()));
    top_titles.truncate(top_n);

    Ok(SavedJobsReport {
        total: jobs.len(),
        monthly,
        busiest_month,
        top_companies,
        top_titles,
    })
}
