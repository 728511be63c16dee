use std::fmt;

use chrono::{Datelike, Timelike, Weekday};

use super::first_max;
use crate::data::model::Interaction;
use crate::error::AnalysisError;

const NO_INTERACTIONS: AnalysisError = AnalysisError::NoData("no reactions or comments");

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ---------------------------------------------------------------------------
// DayPeriod – coarse time-of-day bucket
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
        DayPeriod::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            17..=21 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
            DayPeriod::Night => "Night",
        })
    }
}

// ---------------------------------------------------------------------------
// Time of day
// ---------------------------------------------------------------------------

/// Interaction counts per [`DayPeriod`], in [`DayPeriod::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub counts: [(DayPeriod, usize); 4],
}

impl TimeOfDay {
    pub fn dominant(&self) -> Option<(DayPeriod, usize)> {
        first_max(self.counts)
    }
}

pub fn time_of_day(interactions: &[Interaction]) -> Result<TimeOfDay, AnalysisError> {
    if interactions.is_empty() {
        return Err(NO_INTERACTIONS);
    }
    let mut counts = DayPeriod::ALL.map(|p| (p, 0usize));
    for i in interactions {
        counts[DayPeriod::from_hour(i.at.hour()).index()].1 += 1;
    }
    Ok(TimeOfDay { counts })
}

// ---------------------------------------------------------------------------
// Heatmap: day period × weekday
// ---------------------------------------------------------------------------

/// Counts indexed `[period][weekday]`, weekday 0 = Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heatmap {
    pub cells: [[usize; 7]; 4],
}

impl Heatmap {
    pub fn get(&self, period: DayPeriod, day: Weekday) -> usize {
        self.cells[period.index()][day.num_days_from_monday() as usize]
    }

    pub fn max_cell(&self) -> usize {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn busiest_day(&self) -> Option<(Weekday, usize)> {
        first_max(
            WEEKDAYS
                .iter()
                .map(|&d| (d, DayPeriod::ALL.iter().map(|&p| self.get(p, d)).sum::<usize>())),
        )
    }

    pub fn busiest_period(&self) -> Option<(DayPeriod, usize)> {
        first_max(
            DayPeriod::ALL
                .iter()
                .map(|&p| (p, self.cells[p.index()].iter().sum::<usize>())),
        )
    }
}

pub fn heatmap(interactions: &[Interaction]) -> Result<Heatmap, AnalysisError> {
    if interactions.is_empty() {
        return Err(NO_INTERACTIONS);
    }
    let mut cells = [[0usize; 7]; 4];
    for i in interactions {
        let row = DayPeriod::from_hour(i.at.hour()).index();
        let col = i.at.weekday().num_days_from_monday() as usize;
        cells[row][col] += 1;
    }
    Ok(Heatmap { cells })
}

// ---------------------------------------------------------------------------
// Seasonality: calendar month of year
// ---------------------------------------------------------------------------

/// Counts per calendar month, index 0 = January.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seasonality {
    pub counts: [usize; 12],
}

impl Seasonality {
    /// Busiest month as `(month number 1..=12, count)`.
    pub fn peak(&self) -> Option<(u32, usize)> {
        first_max(self.counts.iter().enumerate().map(|(i, &c)| (i as u32 + 1, c)))
    }
}

pub fn seasonality(interactions: &[Interaction]) -> Result<Seasonality, AnalysisError> {
    if interactions.is_empty() {
        return Err(NO_INTERACTIONS);
    }
    let mut counts = [0usize; 12];
    for i in interactions {
        counts[i.at.month0() as usize] += 1;
    }
    Ok(Seasonality { counts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::InteractionKind;
    use chrono::NaiveDate;

    fn at(m: u32, d: u32, h: u32) -> Interaction {
        Interaction {
            at: NaiveDate::from_ymd_opt(2024, m, d)
                .unwrap()
                .and_hms_opt(h, 30, 0)
                .unwrap(),
            kind: InteractionKind::Comment,
        }
    }

    #[test]
    fn day_period_boundaries() {
        assert_eq!(DayPeriod::from_hour(4), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(5), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(11), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_hour(12), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_hour(17), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(21), DayPeriod::Evening);
        assert_eq!(DayPeriod::from_hour(22), DayPeriod::Night);
        assert_eq!(DayPeriod::from_hour(0), DayPeriod::Night);
    }

    #[test]
    fn time_of_day_counts_in_canonical_order() {
        let data = vec![at(1, 1, 9), at(1, 2, 13), at(1, 3, 14), at(1, 4, 23)];
        let tod = time_of_day(&data).unwrap();
        assert_eq!(
            tod.counts,
            [
                (DayPeriod::Morning, 1),
                (DayPeriod::Afternoon, 2),
                (DayPeriod::Evening, 0),
                (DayPeriod::Night, 1)
            ]
        );
        assert_eq!(tod.dominant(), Some((DayPeriod::Afternoon, 2)));
    }

    #[test]
    fn heatmap_places_by_weekday_and_period() {
        // 2024-01-01 is a Monday, 2024-01-06 a Saturday.
        let data = vec![at(1, 1, 9), at(1, 1, 10), at(1, 6, 19), at(1, 8, 9)];
        let map = heatmap(&data).unwrap();
        assert_eq!(map.get(DayPeriod::Morning, Weekday::Mon), 3);
        assert_eq!(map.get(DayPeriod::Evening, Weekday::Sat), 1);
        assert_eq!(map.get(DayPeriod::Night, Weekday::Sun), 0);
        assert_eq!(map.max_cell(), 3);
        assert_eq!(map.busiest_day(), Some((Weekday::Mon, 3)));
        assert_eq!(map.busiest_period(), Some((DayPeriod::Morning, 3)));
    }

    #[test]
    fn seasonality_is_zero_filled() {
        let data = vec![at(3, 1, 9), at(3, 2, 9), at(11, 5, 9)];
        let s = seasonality(&data).unwrap();
        assert_eq!(s.counts.iter().sum::<usize>(), 3);
        assert_eq!(s.counts[2], 2);
        assert_eq!(s.counts[10], 1);
        assert_eq!(s.counts[0], 0);
        assert_eq!(s.peak(), Some((3, 2)));
    }

    #[test]
    fn empty_input_is_no_data() {
        assert!(time_of_day(&[]).is_err());
        assert!(heatmap(&[]).is_err());
        assert!(seasonality(&[]).is_err());
    }
}
