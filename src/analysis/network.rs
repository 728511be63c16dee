use super::{count_by_month, first_max, first_min, value_counts};
use crate::data::dates::YearMonth;
use crate::data::loader::SECTOR;
use crate::data::model::Connection;
use crate::data::table::RawTable;
use crate::error::AnalysisError;

const NO_CONNECTIONS: AnalysisError = AnalysisError::NoData("no connection with a valid date");

/// Network-growth metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkGrowth {
    pub total: usize,
    /// New connections per month, present months only.
    pub monthly: Vec<(YearMonth, usize)>,
    pub busiest_month: (YearMonth, usize),
    pub quietest_month: (YearMonth, usize),
    /// Mean of `monthly`.
    pub mean_per_month: f64,
}

impl NetworkGrowth {
    /// Network size at the end of each month, for the cumulative curve.
    pub fn cumulative(&self) -> Vec<(YearMonth, usize)> {
        let mut running = 0;
        self.monthly
            .iter()
            .map(|(m, c)| {
                running += c;
                (*m, running)
            })
            .collect()
    }
}

pub fn network_growth(connections: &[Connection]) -> Result<NetworkGrowth, AnalysisError> {
    if connections.is_empty() {
        return Err(NO_CONNECTIONS);
    }
    let monthly = count_by_month(connections.iter().map(|c| c.connected_on));
    let busiest_month = first_max(monthly.iter().copied()).ok_or(NO_CONNECTIONS)?;
    let quietest_month = first_min(monthly.iter().copied()).ok_or(NO_CONNECTIONS)?;
    let mean_per_month = connections.len() as f64 / monthly.len() as f64;

    Ok(NetworkGrowth {
        total: connections.len(),
        monthly,
        busiest_month,
        quietest_month,
        mean_per_month,
    })
}

/// Share of each sector among connections, descending.
///
/// Requires the optional `Sector` column; connections without a sector are
/// left out of the denominator.
pub fn sector_breakdown(
    connections: &[Connection],
    table: Option<&RawTable>,
) -> Result<Vec<(String, f64)>, AnalysisError> {
    let table = table.ok_or(AnalysisError::MissingFile("Connections.csv"))?;
    table.require(&[SECTOR])?;

    let counts = value_counts(connections.iter().filter_map(|c| c.sector.as_deref()));
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Err(AnalysisError::NoData("no connection has a sector"));
    }
    Ok(counts
        .into_iter()
        .map(|(sector, n)| (sector, n as f64 / total as f64 * 100.0))
        .collect())
}
