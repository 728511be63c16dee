use chrono::{Duration, NaiveDateTime};

use super::{first_max, first_min};
use crate::data::model::Interaction;
use crate::error::AnalysisError;

const TOO_FEW: AnalysisError = AnalysisError::NoData("at least two interactions are needed");

/// Summary of the gaps between consecutive interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalStats {
    pub count: usize,
    pub mean: Duration,
    pub median: Duration,
    pub max: Duration,
    pub min: Duration,
}

/// One gap between two consecutive interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub length: Duration,
}

/// The longest silence and the tightest burst of activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtremePeriods {
    pub longest: Gap,
    pub shortest: Gap,
}

/// Gaps between consecutive interactions of any kind, in time order.
fn gaps(interactions: &[Interaction]) -> Vec<Gap> {
    let mut times: Vec<NaiveDateTime> = interactions.iter().map(|i| i.at).collect();
    times.sort();
    times
        .windows(2)
        .map(|w| Gap {
            start: w[0],
            end: w[1],
            length: w[1] - w[0],
        })
        .collect()
}

pub fn interval_stats(interactions: &[Interaction]) -> Result<IntervalStats, AnalysisError> {
    let gaps = gaps(interactions);
    if gaps.is_empty() {
        return Err(TOO_FEW);
    }

    let mut millis: Vec<i64> = gaps.iter().map(|g| g.length.num_milliseconds()).collect();
    millis.sort_unstable();

    let n = millis.len();
    let mean = millis.iter().map(|&m| m as i128).sum::<i128>() / n as i128;
    let median = if n % 2 == 1 {
        millis[n / 2]
    } else {
        (millis[n / 2 - 1] + millis[n / 2]) / 2
    };

    Ok(IntervalStats {
        count: n,
        mean: Duration::milliseconds(mean as i64),
        median: Duration::milliseconds(median),
        max: Duration::milliseconds(millis[n - 1]),
        min: Duration::milliseconds(millis[0]),
    })
}

pub fn extreme_periods(interactions: &[Interaction]) -> Result<ExtremePeriods, AnalysisError> {
    let gaps = gaps(interactions);
    let (longest, _) = first_max(gaps.iter().map(|g| (*g, g.length))).ok_or(TOO_FEW)?;
    let (shortest, _) = first_min(gaps.iter().map(|g| (*g, g.length))).ok_or(TOO_FEW)?;
    Ok(ExtremePeriods { longest, shortest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::InteractionKind;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> Interaction {
        Interaction {
            at: NaiveDate::from_ymd_opt(2024, 4, d)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
            kind: InteractionKind::Reaction,
        }
    }

    #[test]
    fn stats_over_unsorted_input() {
        // Sorted: 1 08:00, 1 08:10, 2 08:10, 5 08:10 → gaps 10m, 1d, 3d.
        let data = vec![at(2, 8, 10), at(1, 8, 0), at(5, 8, 10), at(1, 8, 10)];
        let stats = interval_stats(&data).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, Duration::minutes(10));
        assert_eq!(stats.median, Duration::days(1));
        assert_eq!(stats.max, Duration::days(3));
        let expected_mean = (Duration::minutes(10) + Duration::days(4)).num_milliseconds() / 3;
        assert_eq!(stats.mean, Duration::milliseconds(expected_mean));
    }

    #[test]
    fn even_count_median_is_midpoint() {
        let data = vec![at(1, 0, 0), at(1, 1, 0), at(1, 4, 0)];
        // gaps: 1h, 3h → median 2h
        assert_eq!(interval_stats(&data).unwrap().median, Duration::hours(2));
    }

    #[test]
    fn needs_two_interactions() {
        assert!(interval_stats(&[at(1, 0, 0)]).is_err());
        assert!(extreme_periods(&[]).is_err());
    }

    #[test]
    fn extreme_periods_locate_gaps() {
        let data = vec![at(1, 8, 0), at(1, 8, 10), at(2, 8, 10), at(5, 8, 10)];
        let periods = extreme_periods(&data).unwrap();
        assert_eq!(periods.longest.start, at(2, 8, 10).at);
        assert_eq!(periods.longest.end, at(5, 8, 10).at);
        assert_eq!(periods.longest.length, Duration::days(3));
        assert_eq!(periods.shortest.start, at(1, 8, 0).at);
        assert_eq!(periods.shortest.length, Duration::minutes(10));
    }

    #[test]
    fn simultaneous_interactions_give_zero_gap() {
        let data = vec![at(1, 8, 0), at(1, 8, 0), at(3, 8, 0)];
        let periods = extreme_periods(&data).unwrap();
        assert_eq!(periods.shortest.length, Duration::zero());
    }
}
