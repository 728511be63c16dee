//! Turns analysis results into what the UI and the summary printer show:
//! chart data, indicator rows and a short commentary.

pub mod format;

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::activity::{
    activity_peaks, cumulative_activity, monthly_activity, regularity, ActivityLevel, KindCounts,
    Peak, PeakTier, Regularity,
};
use crate::analysis::career::career_report;
use crate::analysis::intervals::{extreme_periods, interval_stats};
use crate::analysis::jobs::saved_jobs_report;
use crate::analysis::network::{network_growth, sector_breakdown};
use crate::analysis::rhythm::{heatmap, seasonality, time_of_day, Heatmap};
use crate::data::dates::{datetime_number, day_number, YearMonth};
use crate::data::model::{CareerEvent, ExportBundle, ExportSource, Interaction, InteractionKind};
use crate::error::AnalysisError;
use format::{
    format_date, format_datetime, format_duration, format_month, month_name, plural, weekday_name,
};

// ---------------------------------------------------------------------------
// Analysis catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Analysis {
    MonthlyActivity,
    CumulativeActivity,
    ActivityPeaks,
    Intervals,
    ExtremePeriods,
    TimeOfDay,
    Heatmap,
    Seasonality,
    SavedJobs,
    Career,
    Sectors,
    NetworkGrowth,
}

impl Analysis {
    /// Menu order.
    pub const ALL: [Analysis; 12] = [
        Analysis::MonthlyActivity,
        Analysis::CumulativeActivity,
        Analysis::ActivityPeaks,
        Analysis::Intervals,
        Analysis::ExtremePeriods,
        Analysis::TimeOfDay,
        Analysis::Heatmap,
        Analysis::Seasonality,
        Analysis::SavedJobs,
        Analysis::Career,
        Analysis::Sectors,
        Analysis::NetworkGrowth,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Analysis::MonthlyActivity => "Monthly activity",
            Analysis::CumulativeActivity => "Cumulative activity",
            Analysis::ActivityPeaks => "Activity peaks",
            Analysis::Intervals => "Interaction regularity",
            Analysis::ExtremePeriods => "Extreme periods (silence / hyper-activity)",
            Analysis::TimeOfDay => "Activity by time of day",
            Analysis::Heatmap => "Heatmap: weekday × time slot",
            Analysis::Seasonality => "Seasonality (activity per month)",
            Analysis::SavedJobs => "Saved job offers",
            Analysis::Career => "Professional journey",
            Analysis::Sectors => "Connection sectors",
            Analysis::NetworkGrowth => "Network growth",
        }
    }

    /// Whether the analysis works on the (filtered) interactions.
    pub fn uses_interactions(&self) -> bool {
        !matches!(
            self,
            Analysis::SavedJobs | Analysis::Career | Analysis::Sectors | Analysis::NetworkGrowth
        )
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Chart data – plain numbers, independent of the plotting library
// ---------------------------------------------------------------------------

/// A named line. `x` is a day number (see [`day_number`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// One bar of a timeline: `[start, end]` in day numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    /// Time series, with optional dated markers.
    Lines {
        series: Vec<Series>,
        markers: Vec<(f64, String)>,
        filled: bool,
    },
    /// Category bars, in display order.
    Bars {
        bars: Vec<(String, f64)>,
        horizontal: bool,
    },
    Heatmap(Heatmap),
    Timeline(Vec<Span>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Everything displayed for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub analysis: Analysis,
    pub title: &'static str,
    /// `(indicator, value)` rows for the key-figures table.
    pub indicators: Vec<(String, String)>,
    pub commentary: String,
    #[serde(skip)]
    pub charts: Vec<Chart>,
}

impl Outcome {
    fn new(analysis: Analysis) -> Self {
        Outcome {
            analysis,
            title: analysis.title(),
            indicators: Vec::new(),
            commentary: String::new(),
            charts: Vec::new(),
        }
    }

    fn indicator(mut self, label: &str, value: impl fmt::Display) -> Self {
        self.indicators.push((label.to_string(), value.to_string()));
        self
    }

    fn chart(mut self, chart: Chart) -> Self {
        self.charts.push(chart);
        self
    }

    fn commentary(mut self, text: impl Into<String>) -> Self {
        self.commentary = text.into();
        self
    }
}

/// Inputs shared by every analysis run.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    pub bundle: &'a ExportBundle,
    /// Interactions after the side-panel filter.
    pub interactions: &'a [Interaction],
    pub top_n: usize,
    /// Used as the end of ongoing positions.
    pub today: NaiveDate,
}

/// Run every analysis of `selected`, in menu order.
pub fn run_all(
    selected: impl IntoIterator<Item = Analysis>,
    ctx: &RunContext<'_>,
) -> Vec<(Analysis, Result<Outcome, AnalysisError>)> {
    let mut selected: Vec<Analysis> = selected.into_iter().collect();
    selected.sort();
    selected.dedup();
    selected
        .into_iter()
        .map(|a| {
            let result = run(a, ctx);
            match &result {
                Ok(_) => log::info!("Analysis done: {a}"),
                Err(e) => log::error!("Analysis '{a}' skipped: {e}"),
            }
            (a, result)
        })
        .collect()
}

pub fn run(analysis: Analysis, ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    match analysis {
        Analysis::MonthlyActivity => monthly(ctx),
        Analysis::CumulativeActivity => cumulative(ctx),
        Analysis::ActivityPeaks => peaks(ctx),
        Analysis::Intervals => intervals(ctx),
        Analysis::ExtremePeriods => extremes(ctx),
        Analysis::TimeOfDay => day_periods(ctx),
        Analysis::Heatmap => weekly_heatmap(ctx),
        Analysis::Seasonality => seasons(ctx),
        Analysis::SavedJobs => saved_jobs(ctx),
        Analysis::Career => career(ctx),
        Analysis::Sectors => sectors(ctx),
        Analysis::NetworkGrowth => growth(ctx),
    }
}

// ---------------------------------------------------------------------------
// Summary – machine-readable report of a whole run
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SummaryEntry<'a> {
    Done(&'a Outcome),
    Failed {
        analysis: Analysis,
        title: &'static str,
        error: String,
    },
}

/// What `--summary --json` prints: the detected files, load problems,
/// career events and one entry per analysis.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub files: &'a [(ExportSource, bool)],
    pub problems: &'a [String],
    pub events: &'a [CareerEvent],
    pub analyses: Vec<SummaryEntry<'a>>,
}

impl<'a> Summary<'a> {
    pub fn new(
        bundle: &'a ExportBundle,
        results: &'a [(Analysis, Result<Outcome, AnalysisError>)],
    ) -> Self {
        Summary {
            files: &bundle.files,
            problems: &bundle.problems,
            events: &bundle.events,
            analyses: results
                .iter()
                .map(|(analysis, result)| match result {
                    Ok(outcome) => SummaryEntry::Done(outcome),
                    Err(e) => SummaryEntry::Failed {
                        analysis: *analysis,
                        title: analysis.title(),
                        error: e.to_string(),
                    },
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn month_points(months: &[(YearMonth, usize)]) -> Vec<[f64; 2]> {
    months
        .iter()
        .map(|(m, c)| [m.plot_x(), *c as f64])
        .collect()
}

/// Career events dated within `[start, end)`, both in day numbers.
fn markers(ctx: &RunContext<'_>, start: f64, end: f64) -> Vec<(f64, String)> {
    ctx.bundle
        .events
        .iter()
        .map(|e| (day_number(e.date), e.label.clone()))
        .filter(|(x, _)| *x >= start && *x < end)
        .collect()
}

fn kind_series<F>(points: &[(f64, KindCounts)], name: F) -> Vec<Series>
where
    F: Fn(InteractionKind) -> String,
{
    InteractionKind::ALL
        .iter()
        .filter(|&&k| points.iter().any(|(_, c)| c.get(k) > 0))
        .map(|&k| Series {
            name: name(k),
            points: points.iter().map(|(x, c)| [*x, c.get(k) as f64]).collect(),
        })
        .collect()
}

fn peak_summary<K>(peak: &Peak<K>, when: String) -> String {
    format!(
        "{when}: {}, {} ({} total)",
        plural(peak.counts.reactions, "reaction"),
        plural(peak.counts.comments, "comment"),
        peak.counts.total()
    )
}

/// Deterministic choice among phrasings, varying with the month.
fn pick<'a>(options: &[&'a str], month: YearMonth) -> &'a str {
    options[(month.month as usize) % options.len()]
}

// ---------------------------------------------------------------------------
// Interaction analyses
// ---------------------------------------------------------------------------

fn monthly(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let monthly = monthly_activity(ctx.interactions)?;
    let summary = monthly
        .summary()
        .ok_or(AnalysisError::NoData("no reactions or comments"))?;

    let points: Vec<(f64, KindCounts)> =
        monthly.months.iter().map(|(m, c)| (m.plot_x(), *c)).collect();
    let series = kind_series(&points, |k| k.plural().to_string());
    // Monthly points sit on the first day; the last month runs to its end.
    let markers = match (monthly.months.first(), monthly.months.last()) {
        (Some((first, _)), Some((last, _))) => markers(ctx, first.plot_x(), last.succ().plot_x()),
        _ => Vec::new(),
    };

    let (best, best_n) = summary.best;
    let (worst, worst_n) = summary.worst;
    let level = match summary.level {
        ActivityLevel::None => "You had no activity over the whole period.",
        ActivityLevel::Low => "Your activity is low overall, but steady.",
        ActivityLevel::Moderate => "Your activity is decent, with a few interesting peaks.",
        ActivityLevel::High => "Great activity! You had a particularly dynamic month.",
    };
    let totals: KindCounts = monthly.months.iter().fold(KindCounts::default(), |acc, (_, c)| {
        KindCounts {
            reactions: acc.reactions + c.reactions,
            comments: acc.comments + c.comments,
        }
    });

    Ok(Outcome::new(Analysis::MonthlyActivity)
        .chart(Chart {
            title: "Evolution of my activity".into(),
            x_label: "Month",
            y_label: "Interactions",
            kind: ChartKind::Lines {
                series,
                markers,
                filled: false,
            },
        })
        .indicator(
            "Most active month",
            format!("{} ({})", format_month(best), plural(best_n, "interaction")),
        )
        .indicator(
            "Least active month",
            format!("{} ({})", format_month(worst), plural(worst_n, "interaction")),
        )
        .indicator("Reactions", totals.reactions)
        .indicator("Comments", totals.comments)
        .commentary(format!(
            "Most active month: {} ({}).\nLeast active month: {} ({}).\n\n{level}",
            format_month(best),
            plural(best_n, "interaction"),
            format_month(worst),
            plural(worst_n, "interaction"),
        )))
}

fn cumulative(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let cumulative = cumulative_activity(ctx.interactions)?;
    let monthly = monthly_activity(ctx.interactions)?;

    let points: Vec<(f64, KindCounts)> = cumulative
        .points
        .iter()
        .map(|(at, c)| (datetime_number(*at), *c))
        .collect();
    let series = kind_series(&points, |k| format!("{} (cumulative)", k.plural()));
    let markers = match (cumulative.points.first(), cumulative.points.last()) {
        (Some((first, _)), Some((last, _))) => {
            markers(ctx, day_number(first.date()), day_number(last.date()) + 1.0)
        }
        _ => Vec::new(),
    };
    let totals = cumulative.final_counts();

    let mut outcome = Outcome::new(Analysis::CumulativeActivity)
        .chart(Chart {
            title: "Cumulative activity".into(),
            x_label: "Date",
            y_label: "Total interactions",
            kind: ChartKind::Lines {
                series,
                markers,
                filled: false,
            },
        })
        .indicator("Total reactions", totals.reactions)
        .indicator("Total comments", totals.comments);

    let mut text = String::new();
    if let Some(summary) = monthly.summary() {
        text.push_str(&format!(
            "Most active month: {} ({}).\nLeast active month: {} ({}).\n\n",
            format_month(summary.best.0),
            plural(summary.best.1, "interaction"),
            format_month(summary.worst.0),
            plural(summary.worst.1, "interaction"),
        ));
    }
    match regularity(&monthly) {
        Ok(report) => {
            outcome = outcome.indicator(
                "Mean month-to-month variation",
                format!("{:.1} interactions", report.mean_variation),
            );
            text.push_str(match report.level {
                Regularity::VeryRegular => {
                    "Your activity is very regular: you interact steadily every month."
                }
                Regularity::FairlyRegular => {
                    "Your activity is fairly regular, with a few normal variations."
                }
                Regularity::Variable => {
                    "Your activity shows large variations: you alternate between quiet and busy periods."
                }
                Regularity::VeryIrregular => {
                    "Your activity is very irregular, with strong swings from one month to the next."
                }
            });
        }
        Err(_) => text.push_str("A single month of activity is not enough to judge regularity."),
    }

    Ok(outcome.commentary(text))
}

fn peaks(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let peaks = activity_peaks(ctx.interactions)?;
    let month = peaks.month.key;
    let month_str = format_month(month);

    let text = match PeakTier::from_total(peaks.month.counts.total()) {
        PeakTier::Exceptional => [
            format!("Wow, impressive! {month_str} was your most active month. Superb momentum!"),
            format!("Outstanding performance in {month_str}. Your engagement was at its best!"),
            format!("Remarkable activity in {month_str}. You really shone!"),
        ],
        PeakTier::Strong => [
            format!("A fine month of activity in {month_str}. Keep it up!"),
            format!("Nice pace in {month_str}. You are on the right track!"),
            format!("Good energy in {month_str}. One more push and you will reach a new high!"),
        ],
        PeakTier::Calm => [
            format!("{month_str} was your most active month, but your pace remains calm. You could easily increase your presence."),
            format!("A little activity in {month_str}. Every interaction counts, you are on the right track."),
            format!("{month_str} shows the start of your engagement. No rush, you can progress at your own pace."),
        ],
    };
    let choices: Vec<&str> = text.iter().map(String::as_str).collect();

    Ok(Outcome::new(Analysis::ActivityPeaks)
        .indicator(
            "Most active day",
            peak_summary(&peaks.day, format_date(peaks.day.key)),
        )
        .indicator(
            "Most active week",
            peak_summary(&peaks.week, format!("week of {}", format_date(peaks.week.key))),
        )
        .indicator("Most active month", peak_summary(&peaks.month, month_str.clone()))
        .commentary(pick(&choices, month)))
}

fn intervals(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let stats = interval_stats(ctx.interactions)?;
    Ok(Outcome::new(Analysis::Intervals)
        .indicator("Mean time between interactions", format_duration(stats.mean))
        .indicator("Median time", format_duration(stats.median))
        .indicator("Longest period without interaction", format_duration(stats.max))
        .indicator("Shortest period (hyper-activity)", format_duration(stats.min))
        .commentary(format!(
            "Across {}, you usually interact again within {}.",
            plural(stats.count, "gap"),
            format_duration(stats.median)
        )))
}

fn extremes(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let periods = extreme_periods(ctx.interactions)?;
    let monthly = monthly_activity(ctx.interactions)?;
    let summary = monthly
        .summary()
        .ok_or(AnalysisError::NoData("no reactions or comments"))?;

    let peak = format_month(summary.best.0);
    let low = format_month(summary.worst.0);
    let text = match PeakTier::from_total(summary.best.1) {
        PeakTier::Exceptional => format!(
            "Your most active period is {peak}, while the quietest one is {low}. \
             Your activity shows particularly sustained momentum."
        ),
        PeakTier::Strong => format!(
            "Your most active period is {peak}, and the quietest {low}. \
             Your pace is balanced, with natural variations."
        ),
        PeakTier::Calm => format!(
            "Your most active period is {peak}, and the quietest {low}. \
             Your activity remains moderate, but it evolves steadily."
        ),
    };

    let longest = periods.longest;
    let shortest = periods.shortest;
    Ok(Outcome::new(Analysis::ExtremePeriods)
        .indicator(
            "Longest period without activity",
            format!(
                "{} → {} ({})",
                format_date(longest.start.date()),
                format_date(longest.end.date()),
                format_duration(longest.length)
            ),
        )
        .indicator(
            "Hyper-activity period",
            format!(
                "{} → {} ({})",
                format_datetime(shortest.start),
                format_datetime(shortest.end),
                format_duration(shortest.length)
            ),
        )
        .commentary(text))
}

fn day_periods(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let tod = time_of_day(ctx.interactions)?;
    let total: usize = tod.counts.iter().map(|(_, n)| n).sum();
    let (dominant, n) = tod
        .dominant()
        .ok_or(AnalysisError::NoData("no reactions or comments"))?;

    let mut outcome = Outcome::new(Analysis::TimeOfDay).chart(Chart {
        title: "Activity by time of day".into(),
        x_label: "Time of day",
        y_label: "Interactions",
        kind: ChartKind::Bars {
            bars: tod
                .counts
                .iter()
                .map(|(p, n)| (p.to_string(), *n as f64))
                .collect(),
            horizontal: false,
        },
    });
    for (period, count) in tod.counts {
        outcome = outcome.indicator(&period.to_string(), count);
    }
    Ok(outcome.commentary(format!(
        "Most of your interactions happen in the {} ({n} of {total}).",
        dominant.to_string().to_lowercase()
    )))
}

fn weekly_heatmap(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let map = heatmap(ctx.interactions)?;
    let no_data = AnalysisError::NoData("no reactions or comments");
    let (day, day_n) = map.busiest_day().ok_or(no_data.clone())?;
    let (period, period_n) = map.busiest_period().ok_or(no_data)?;

    Ok(Outcome::new(Analysis::Heatmap)
        .chart(Chart {
            title: "Activity by weekday × time slot".into(),
            x_label: "Weekday",
            y_label: "Time slot",
            kind: ChartKind::Heatmap(map),
        })
        .indicator("Busiest weekday", format!("{} ({day_n})", weekday_name(day)))
        .indicator("Busiest time slot", format!("{period} ({period_n})"))
        .commentary(format!(
            "Your activity is highest on {}, and peaks during the “{period}” time slot. \
             These are your most engaged moments.",
            weekday_name(day)
        )))
}

fn seasons(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let s = seasonality(ctx.interactions)?;
    let (month, n) = s
        .peak()
        .ok_or(AnalysisError::NoData("no reactions or comments"))?;

    Ok(Outcome::new(Analysis::Seasonality)
        .chart(Chart {
            title: "Seasonality: activity per month".into(),
            x_label: "Month",
            y_label: "Interactions",
            kind: ChartKind::Bars {
                bars: s
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (month_name(i as u32 + 1).to_string(), *c as f64))
                    .collect(),
                horizontal: false,
            },
        })
        .indicator("Busiest calendar month", format!("{} ({n})", month_name(month)))
        .commentary(format!(
            "Across all years, {} is your busiest month ({}).",
            month_name(month),
            plural(n, "interaction")
        )))
}

// ---------------------------------------------------------------------------
// Job search, career and network analyses
// ---------------------------------------------------------------------------

fn saved_jobs(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let report = saved_jobs_report(
        &ctx.bundle.saved_jobs,
        ctx.bundle.saved_jobs_table.as_ref(),
        ctx.top_n,
    )?;
    let (month, n) = report.busiest_month;
    let company = report.top_company().unwrap_or("-").to_string();
    let title = report.top_title().unwrap_or("-").to_string();

    let bars = |rows: &[(String, usize)]| -> Vec<(String, f64)> {
        rows.iter().map(|(k, v)| (k.clone(), *v as f64)).collect()
    };

    Ok(Outcome::new(Analysis::SavedJobs)
        .chart(Chart {
            title: "Saved job offers per month".into(),
            x_label: "Month",
            y_label: "Saved offers",
            kind: ChartKind::Lines {
                series: vec![Series {
                    name: "Saved offers".into(),
                    points: month_points(&report.monthly),
                }],
                markers: Vec::new(),
                filled: true,
            },
        })
        .chart(Chart {
            title: "Most targeted companies".into(),
            x_label: "Saved offers",
            y_label: "",
            kind: ChartKind::Bars {
                bars: bars(&report.top_companies),
                horizontal: true,
            },
        })
        .chart(Chart {
            title: "Most frequent job titles".into(),
            x_label: "Frequency",
            y_label: "",
            kind: ChartKind::Bars {
                bars: bars(&report.top_titles),
                horizontal: true,
            },
        })
        .indicator("Total saved offers", report.total)
        .indicator(
            "Most active month",
            format!("{} ({})", format_month(month), plural(n, "offer")),
        )
        .indicator("Most targeted company", &company)
        .indicator("Most frequent title", &title)
        .commentary(format!(
            "Your job-saving activity peaks in {}. You seem to pay particular attention to \
             opportunities from {company}, and “{title}” roles come back regularly in your \
             selection. Together these point to a clear direction in your search.",
            format_month(month)
        )))
}

fn career(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let report = career_report(
        &ctx.bundle.positions,
        ctx.bundle.positions_table.as_ref(),
        ctx.today,
    )?;
    let spans = report
        .timeline()
        .map(|t| Span {
            label: t.label(),
            start: day_number(t.start),
            end: day_number(t.end),
        })
        .collect();

    Ok(Outcome::new(Analysis::Career)
        .chart(Chart {
            title: "Career timeline".into(),
            x_label: "Date",
            y_label: "",
            kind: ChartKind::Timeline(spans),
        })
        .indicator("Average position length", format!("{:.1} months", report.mean_months))
        .indicator(
            "Longest experience",
            format!("{} ({:.1} months)", report.longest.label(), report.longest.months()),
        )
        .indicator(
            "Shortest experience",
            format!("{} ({:.1} months)", report.shortest.label(), report.shortest.months()),
        )
        .indicator("Number of experiences", report.tenures.len())
        .commentary(format!(
            "Over {}, you stayed {:.1} months on average. Your longest experience was {}.",
            plural(report.tenures.len(), "position"),
            report.mean_months,
            report.longest.label()
        )))
}

fn sectors(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let shares = sector_breakdown(
        &ctx.bundle.connections,
        ctx.bundle.connections_table.as_ref(),
    )?;
    let top = shares
        .first()
        .map(|(s, _)| s.clone())
        .ok_or(AnalysisError::NoData("no connection has a sector"))?;

    let mut outcome = Outcome::new(Analysis::Sectors).chart(Chart {
        title: "Sectors among connections".into(),
        x_label: "Share (%)",
        y_label: "Sector",
        kind: ChartKind::Bars {
            bars: shares.clone(),
            horizontal: true,
        },
    });
    for (sector, pct) in &shares {
        outcome = outcome.indicator(sector, format!("{pct:.1}%"));
    }
    Ok(outcome.commentary(format!(
        "Your network shows a particular affinity with the “{top}” sector. \
         It is clearly a field that draws your attention and reflects your current interests."
    )))
}

fn growth(ctx: &RunContext<'_>) -> Result<Outcome, AnalysisError> {
    let growth = network_growth(&ctx.bundle.connections)?;
    let (best, best_n) = growth.busiest_month;
    let (low, low_n) = growth.quietest_month;

    Ok(Outcome::new(Analysis::NetworkGrowth)
        .chart(Chart {
            title: "Network growth".into(),
            x_label: "Month",
            y_label: "New connections",
            kind: ChartKind::Lines {
                series: vec![Series {
                    name: "New connections".into(),
                    points: month_points(&growth.monthly),
                }],
                markers: Vec::new(),
                filled: true,
            },
        })
        .chart(Chart {
            title: "Network size".into(),
            x_label: "Month",
            y_label: "Connections",
            kind: ChartKind::Lines {
                series: vec![Series {
                    name: "Total connections".into(),
                    points: month_points(&growth.cumulative()),
                }],
                markers: Vec::new(),
                filled: false,
            },
        })
        .indicator("Total connections", growth.total)
        .indicator(
            "Most active month",
            format!("{} ({})", format_month(best), plural(best_n, "connection")),
        )
        .indicator(
            "Quietest month",
            format!("{} ({})", format_month(low), plural(low_n, "connection")),
        )
        .indicator(
            "Average monthly growth",
            format!("{:.1} connections/month", growth.mean_per_month),
        )
        .commentary(format!(
            "Your network had its strongest momentum in {}. Getting back to the pace of that \
             period could further strengthen your professional dynamic.",
            format_month(best)
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Connection;

    fn at(y: i32, m: u32, d: u32, h: u32, kind: InteractionKind) -> Interaction {
        Interaction {
            at: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
            kind,
        }
    }

    fn bundle() -> ExportBundle {
        let mut interactions = Vec::new();
        for d in 1..=20 {
            interactions.push(at(2024, 2, d, 9, InteractionKind::Reaction));
        }
        interactions.push(at(2024, 3, 2, 20, InteractionKind::Comment));
        interactions.push(at(2024, 3, 3, 23, InteractionKind::Comment));
        ExportBundle {
            interactions,
            connections: vec![Connection {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                company: "Analytical".into(),
                position: "Engineer".into(),
                connected_on: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                sector: None,
            }],
            events: vec![
                CareerEvent {
                    date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                    label: "Started: Engineer".into(),
                },
                CareerEvent {
                    date: NaiveDate::from_ymd_opt(2010, 1, 1).unwrap(),
                    label: "Started: Intern".into(),
                },
            ],
            ..Default::default()
        }
    }

    fn ctx(bundle: &ExportBundle) -> RunContext<'_> {
        RunContext {
            bundle,
            interactions: &bundle.interactions,
            top_n: 5,
            today: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn monthly_outcome_has_chart_and_commentary() {
        let b = bundle();
        let outcome = run(Analysis::MonthlyActivity, &ctx(&b)).unwrap();
        assert_eq!(outcome.charts.len(), 1);
        assert!(outcome.commentary.starts_with("Most active month: February 2024 (20 interactions)."));
        assert!(outcome.commentary.contains("decent"));
        match &outcome.charts[0].kind {
            ChartKind::Lines { series, markers, .. } => {
                assert_eq!(series.len(), 2);
                // The 2010 event lies outside the plotted months.
                assert_eq!(markers.len(), 1);
            }
            other => panic!("unexpected chart {other:?}"),
        }
    }

    #[test]
    fn cumulative_outcome_keeps_in_range_markers() {
        let b = bundle();
        let outcome = run(Analysis::CumulativeActivity, &ctx(&b)).unwrap();
        match &outcome.charts[0].kind {
            ChartKind::Lines { markers, .. } => {
                assert_eq!(markers.len(), 1);
                assert_eq!(markers[0].1, "Started: Engineer");
            }
            other => panic!("unexpected chart {other:?}"),
        }
        assert!(outcome
            .indicators
            .iter()
            .any(|(k, v)| k == "Total reactions" && v == "20"));
    }

    #[test]
    fn marker_late_in_the_last_month_is_kept() {
        let mut b = ExportBundle {
            interactions: vec![
                at(2024, 3, 1, 9, InteractionKind::Reaction),
                at(2024, 3, 5, 9, InteractionKind::Reaction),
                at(2024, 3, 28, 9, InteractionKind::Comment),
            ],
            ..Default::default()
        };
        b.events.push(CareerEvent {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            label: "Started: Analyst".into(),
        });
        b.events.push(CareerEvent {
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            label: "Started: Lead".into(),
        });

        let outcome = run(Analysis::MonthlyActivity, &ctx(&b)).unwrap();
        match &outcome.charts[0].kind {
            ChartKind::Lines { markers, .. } => {
                let labels: Vec<&str> = markers.iter().map(|(_, l)| l.as_str()).collect();
                assert_eq!(labels, vec!["Started: Analyst"]);
            }
            other => panic!("unexpected chart {other:?}"),
        }
    }

    #[test]
    fn cumulative_keeps_marker_on_first_day() {
        let mut b = bundle();
        b.events.push(CareerEvent {
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            label: "Started: Mentor".into(),
        });
        let outcome = run(Analysis::CumulativeActivity, &ctx(&b)).unwrap();
        match &outcome.charts[0].kind {
            ChartKind::Lines { markers, .. } => {
                assert!(markers.iter().any(|(_, l)| l == "Started: Mentor"));
            }
            other => panic!("unexpected chart {other:?}"),
        }
    }

    #[test]
    fn summary_lists_files_events_and_failures() {
        let mut b = bundle();
        b.files = vec![(ExportSource::Reactions, true), (ExportSource::Positions, false)];
        let c = ctx(&b);
        let results = run_all([Analysis::MonthlyActivity, Analysis::Career], &c);
        let json = serde_json::to_value(Summary::new(&b, &results)).unwrap();

        assert_eq!(json["files"][0][0], "Reactions");
        assert_eq!(json["files"][1][1], false);
        assert_eq!(json["events"][0]["date"], "2024-02-10");
        assert_eq!(json["events"][0]["label"], "Started: Engineer");
        assert_eq!(json["analyses"][0]["analysis"], "MonthlyActivity");
        assert!(json["analyses"][0]["commentary"].is_string());
        assert_eq!(json["analyses"][1]["analysis"], "Career");
        assert_eq!(
            json["analyses"][1]["error"],
            "Positions.csv was not found in the export"
        );
    }

    #[test]
    fn peaks_commentary_is_deterministic() {
        let b = bundle();
        let first = run(Analysis::ActivityPeaks, &ctx(&b)).unwrap();
        let second = run(Analysis::ActivityPeaks, &ctx(&b)).unwrap();
        assert_eq!(first.commentary, second.commentary);
        assert!(first.commentary.contains("February 2024"));
        assert_eq!(first.indicators.len(), 3);
    }

    #[test]
    fn missing_inputs_become_errors_not_panics() {
        let b = ExportBundle::default();
        let results = run_all(Analysis::ALL, &ctx(&b));
        assert_eq!(results.len(), Analysis::ALL.len());
        assert!(results.iter().all(|(_, r)| r.is_err()));
        let career = results
            .iter()
            .find(|(a, _)| *a == Analysis::Career)
            .map(|(_, r)| r.clone().unwrap_err())
            .unwrap();
        assert_eq!(career, AnalysisError::MissingFile("Positions.csv"));
    }

    #[test]
    fn run_all_follows_menu_order_without_duplicates() {
        let b = bundle();
        let order: Vec<Analysis> = run_all(
            [Analysis::NetworkGrowth, Analysis::TimeOfDay, Analysis::NetworkGrowth],
            &ctx(&b),
        )
        .into_iter()
        .map(|(a, _)| a)
        .collect();
        assert_eq!(order, vec![Analysis::TimeOfDay, Analysis::NetworkGrowth]);
    }

    #[test]
    fn time_of_day_and_heatmap_commentary() {
        let b = bundle();
        let tod = run(Analysis::TimeOfDay, &ctx(&b)).unwrap();
        assert!(tod.commentary.contains("morning (20 of 22)"));
        let heat = run(Analysis::Heatmap, &ctx(&b)).unwrap();
        assert!(heat.commentary.contains("“Morning”"));
    }

    #[test]
    fn growth_outcome() {
        let b = bundle();
        let outcome = run(Analysis::NetworkGrowth, &ctx(&b)).unwrap();
        assert_eq!(outcome.charts.len(), 2);
        assert_eq!(outcome.indicators[0], ("Total connections".into(), "1".into()));
    }

    #[test]
    fn outcome_serializes_without_charts() {
        let b = bundle();
        let outcome = run(Analysis::Seasonality, &ctx(&b)).unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["analysis"], "Seasonality");
        assert!(json.get("charts").is_none());
        assert!(json["commentary"].as_str().unwrap().contains("February"));
    }
}
