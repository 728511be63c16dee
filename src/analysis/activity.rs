use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::{first_max, first_min};
use crate::data::dates::{week_start, YearMonth};
use crate::data::model::{Interaction, InteractionKind};
use crate::error::AnalysisError;

const NO_INTERACTIONS: AnalysisError = AnalysisError::NoData("no reactions or comments");

// ---------------------------------------------------------------------------
// Per-bucket counts
// ---------------------------------------------------------------------------

/// Reaction and comment counts inside one time bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub reactions: usize,
    pub comments: usize,
}

impl KindCounts {
    pub fn add(&mut self, kind: InteractionKind) {
        match kind {
            InteractionKind::Reaction => self.reactions += 1,
            InteractionKind::Comment => self.comments += 1,
        }
    }

    pub fn get(&self, kind: InteractionKind) -> usize {
        match kind {
            InteractionKind::Reaction => self.reactions,
            InteractionKind::Comment => self.comments,
        }
    }

    pub fn total(&self) -> usize {
        self.reactions + self.comments
    }
}

fn bucket<K, F>(interactions: &[Interaction], key: F) -> BTreeMap<K, KindCounts>
where
    K: Ord,
    F: Fn(&Interaction) -> K,
{
    let mut map: BTreeMap<K, KindCounts> = BTreeMap::new();
    for i in interactions {
        map.entry(key(i)).or_default().add(i.kind);
    }
    map
}

// ---------------------------------------------------------------------------
// Monthly activity
// ---------------------------------------------------------------------------

/// Counts per month that has at least one interaction, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyActivity {
    pub months: Vec<(YearMonth, KindCounts)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    None,
    Low,
    Moderate,
    High,
}

impl ActivityLevel {
    /// Classify by the busiest month's total.
    pub fn from_peak(total: usize) -> Self {
        match total {
            0 => ActivityLevel::None,
            1..=9 => ActivityLevel::Low,
            10..=29 => ActivityLevel::Moderate,
            _ => ActivityLevel::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySummary {
    pub best: (YearMonth, usize),
    pub worst: (YearMonth, usize),
    pub level: ActivityLevel,
}

pub fn monthly_activity(interactions: &[Interaction]) -> Result<MonthlyActivity, AnalysisError> {
    if interactions.is_empty() {
        return Err(NO_INTERACTIONS);
    }
    let months = bucket(interactions, |i| YearMonth::of(&i.at))
        .into_iter()
        .collect();
    Ok(MonthlyActivity { months })
}

impl MonthlyActivity {
    pub fn totals(&self) -> impl Iterator<Item = (YearMonth, usize)> + '_ {
        self.months.iter().map(|(m, c)| (*m, c.total()))
    }

    pub fn summary(&self) -> Option<MonthlySummary> {
        let best = first_max(self.totals())?;
        let worst = first_min(self.totals())?;
        Some(MonthlySummary {
            best,
            worst,
            level: ActivityLevel::from_peak(best.1),
        })
    }

    /// Totals for every month between the first and last active month,
    /// with empty months as zero.
    pub fn contiguous_totals(&self) -> Vec<(YearMonth, usize)> {
        let (Some(first), Some(last)) = (self.months.first(), self.months.last()) else {
            return Vec::new();
        };
        let lookup: BTreeMap<YearMonth, usize> = self.totals().collect();
        let mut out = Vec::new();
        let mut m = first.0;
        while m <= last.0 {
            out.push((m, lookup.get(&m).copied().unwrap_or(0)));
            m = m.succ();
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Regularity of monthly activity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regularity {
    VeryRegular,
    FairlyRegular,
    Variable,
    VeryIrregular,
}

impl Regularity {
    pub fn from_mean_variation(mean: f64) -> Self {
        if mean < 5.0 {
            Regularity::VeryRegular
        } else if mean < 15.0 {
            Regularity::FairlyRegular
        } else if mean < 30.0 {
            Regularity::Variable
        } else {
            Regularity::VeryIrregular
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularityReport {
    /// Mean absolute change of the monthly total from one month to the next.
    pub mean_variation: f64,
    pub level: Regularity,
}

pub fn regularity(monthly: &MonthlyActivity) -> Result<RegularityReport, AnalysisError> {
    let totals = monthly.contiguous_totals();
    if totals.len() < 2 {
        return Err(AnalysisError::NoData(
            "at least two months of activity are needed",
        ));
    }
    let diffs: Vec<f64> = totals
        .windows(2)
        .map(|w| (w[1].1 as f64 - w[0].1 as f64).abs())
        .collect();
    let mean_variation = diffs.iter().sum::<f64>() / diffs.len() as f64;
    Ok(RegularityReport {
        mean_variation,
        level: Regularity::from_mean_variation(mean_variation),
    })
}

// ---------------------------------------------------------------------------
// Cumulative activity
// ---------------------------------------------------------------------------

/// Running totals at each distinct interaction timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeActivity {
    pub points: Vec<(NaiveDateTime, KindCounts)>,
}

pub fn cumulative_activity(
    interactions: &[Interaction],
) -> Result<CumulativeActivity, AnalysisError> {
    if interactions.is_empty() {
        return Err(NO_INTERACTIONS);
    }
    let mut running = KindCounts::default();
    let points = bucket(interactions, |i| i.at)
        .into_iter()
        .map(|(at, c)| {
            running.reactions += c.reactions;
            running.comments += c.comments;
            (at, running)
        })
        .collect();
    Ok(CumulativeActivity { points })
}

impl CumulativeActivity {
    /// Counts per kind over the whole period.
    pub fn final_counts(&self) -> KindCounts {
        self.points.last().map(|(_, c)| *c).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Activity peaks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peak<K> {
    pub key: K,
    pub counts: KindCounts,
}

/// Busiest day, week (keyed by its Monday) and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityPeaks {
    pub day: Peak<NaiveDate>,
    pub week: Peak<NaiveDate>,
    pub month: Peak<YearMonth>,
}

fn peak<K, F>(interactions: &[Interaction], key: F) -> Option<Peak<K>>
where
    K: Ord + Copy,
    F: Fn(&Interaction) -> K,
{
    let map = bucket(interactions, key);
    let (key, _) = first_max(map.iter().map(|(k, c)| (*k, c.total())))?;
    Some(Peak {
        key,
        counts: map.get(&key).copied().unwrap_or_default(),
    })
}

pub fn activity_peaks(interactions: &[Interaction]) -> Result<ActivityPeaks, AnalysisError> {
    let day = peak(interactions, |i| i.at.date()).ok_or(NO_INTERACTIONS)?;
    let week = peak(interactions, |i| week_start(i.at.date())).ok_or(NO_INTERACTIONS)?;
    let month = peak(interactions, |i| YearMonth::of(&i.at)).ok_or(NO_INTERACTIONS)?;
    Ok(ActivityPeaks { day, week, month })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakTier {
    Calm,
    Strong,
    Exceptional,
}

impl PeakTier {
    pub fn from_total(total: usize) -> Self {
        if total >= 40 {
            PeakTier::Exceptional
        } else if total >= 15 {
            PeakTier::Strong
        } else {
            PeakTier::Calm
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, kind: InteractionKind) -> Interaction {
        Interaction {
            at: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
            kind,
        }
    }

    use InteractionKind::{Comment as C, Reaction as R};

    fn sample() -> Vec<Interaction> {
        vec![
            at(2024, 1, 3, 9, R),
            at(2024, 1, 3, 9, C),
            at(2024, 1, 20, 18, R),
            at(2024, 3, 4, 10, R),
            at(2024, 3, 5, 10, R),
            at(2024, 3, 5, 11, C),
            at(2024, 3, 10, 22, C),
        ]
    }

    #[test]
    fn monthly_counts_skip_empty_months() {
        let monthly = monthly_activity(&sample()).unwrap();
        assert_eq!(
            monthly.months,
            vec![
                (YearMonth::new(2024, 1), KindCounts { reactions: 2, comments: 1 }),
                (YearMonth::new(2024, 3), KindCounts { reactions: 2, comments: 2 }),
            ]
        );
    }

    #[test]
    fn monthly_summary_finds_extremes() {
        let summary = monthly_activity(&sample()).unwrap().summary().unwrap();
        assert_eq!(summary.best, (YearMonth::new(2024, 3), 4));
        assert_eq!(summary.worst, (YearMonth::new(2024, 1), 3));
        assert_eq!(summary.level, ActivityLevel::Low);
    }

    #[test]
    fn activity_levels() {
        assert_eq!(ActivityLevel::from_peak(0), ActivityLevel::None);
        assert_eq!(ActivityLevel::from_peak(9), ActivityLevel::Low);
        assert_eq!(ActivityLevel::from_peak(10), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_peak(29), ActivityLevel::Moderate);
        assert_eq!(ActivityLevel::from_peak(30), ActivityLevel::High);
    }

    #[test]
    fn empty_input_is_no_data() {
        assert!(matches!(monthly_activity(&[]), Err(AnalysisError::NoData(_))));
        assert!(matches!(cumulative_activity(&[]), Err(AnalysisError::NoData(_))));
        assert!(matches!(activity_peaks(&[]), Err(AnalysisError::NoData(_))));
    }

    #[test]
    fn regularity_counts_gap_months_as_zero() {
        // Jan 3, Feb 0, Mar 4 → |0-3| + |4-0| = 7 over 2 steps.
        let monthly = monthly_activity(&sample()).unwrap();
        let report = regularity(&monthly).unwrap();
        assert!((report.mean_variation - 3.5).abs() < 1e-9);
        assert_eq!(report.level, Regularity::VeryRegular);
    }

    #[test]
    fn regularity_needs_two_months() {
        let monthly = monthly_activity(&sample()[..3]).unwrap();
        assert!(regularity(&monthly).is_err());
    }

    #[test]
    fn regularity_thresholds() {
        assert_eq!(Regularity::from_mean_variation(4.9), Regularity::VeryRegular);
        assert_eq!(Regularity::from_mean_variation(5.0), Regularity::FairlyRegular);
        assert_eq!(Regularity::from_mean_variation(15.0), Regularity::Variable);
        assert_eq!(Regularity::from_mean_variation(30.0), Regularity::VeryIrregular);
    }

    #[test]
    fn cumulative_merges_identical_timestamps() {
        let cumulative = cumulative_activity(&sample()).unwrap();
        assert_eq!(cumulative.points.len(), 6);
        assert_eq!(
            cumulative.points[0].1,
            KindCounts { reactions: 1, comments: 1 }
        );
        assert_eq!(
            cumulative.final_counts(),
            KindCounts { reactions: 4, comments: 3 }
        );
    }

    #[test]
    fn peaks_by_day_week_and_month() {
        let peaks = activity_peaks(&sample()).unwrap();
        // Jan 3 and Mar 5 both have two interactions; the earlier wins.
        assert_eq!(peaks.day.key, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(peaks.day.counts, KindCounts { reactions: 1, comments: 1 });
        // Week of Monday Mar 4 holds Mar 4, 5, 5, 10.
        assert_eq!(peaks.week.key, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(peaks.week.counts.total(), 4);
        assert_eq!(peaks.month.key, YearMonth::new(2024, 3));
    }

    #[test]
    fn peak_tiers() {
        assert_eq!(PeakTier::from_total(14), PeakTier::Calm);
        assert_eq!(PeakTier::from_total(15), PeakTier::Strong);
        assert_eq!(PeakTier::from_total(40), PeakTier::Exceptional);
    }
}
