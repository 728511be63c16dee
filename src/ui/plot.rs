use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Polygon, Text,
    VLine,
};

use crate::analysis::rhythm::{DayPeriod, Heatmap, WEEKDAYS};
use crate::color::{generate_palette, heat_color, ColorMap};
use crate::data::dates::date_from_number;
use crate::report::format::weekday_name;
use crate::report::{Chart, ChartKind, Series, Span};

const CHART_HEIGHT: f32 = 320.0;
const MARKER_COLOR: Color32 = Color32::from_rgb(200, 80, 80);

// ---------------------------------------------------------------------------
// Axis formatters
// ---------------------------------------------------------------------------

fn date_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    date_from_number(mark.value)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// Labels integer grid marks with `labels[i]`, leaves the others blank.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

fn base_plot(id: &str, chart: &Chart) -> Plot<'static> {
    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_label)
        .y_axis_label(chart.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
}

// ---------------------------------------------------------------------------
// Chart dispatch
// ---------------------------------------------------------------------------

/// Render one chart of an analysis outcome. `id` must be unique per frame.
pub fn chart(ui: &mut Ui, id: &str, chart: &Chart, colors: &ColorMap) {
    ui.label(RichText::new(&chart.title).strong());
    match &chart.kind {
        ChartKind::Lines {
            series,
            markers,
            filled,
        } => lines(ui, id, chart, series, markers, *filled, colors),
        ChartKind::Bars { bars, horizontal } => category_bars(ui, id, chart, bars, *horizontal),
        ChartKind::Heatmap(map) => heatmap(ui, id, chart, map),
        ChartKind::Timeline(spans) => timeline(ui, id, chart, spans),
    }
    ui.add_space(8.0);
}

fn lines(
    ui: &mut Ui,
    id: &str,
    chart: &Chart,
    series: &[Series],
    markers: &[(f64, String)],
    filled: bool,
    colors: &ColorMap,
) {
    let top = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p[1]))
        .fold(0.0_f64, f64::max);

    base_plot(id, chart)
        .x_axis_formatter(date_axis)
        .show(ui, |plot_ui| {
            for s in series {
                let points: PlotPoints = s.points.iter().copied().collect();
                let mut line = Line::new(points)
                    .name(&s.name)
                    .color(colors.color_for(&s.name))
                    .width(2.0);
                if filled {
                    line = line.fill(0.0);
                }
                plot_ui.line(line);
            }

            for (x, label) in markers {
                plot_ui.vline(
                    VLine::new(*x)
                        .color(MARKER_COLOR)
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(*x, top), RichText::new(label).small())
                        .color(MARKER_COLOR),
                );
            }
        });
}

fn category_bars(ui: &mut Ui, id: &str, chart: &Chart, bars: &[(String, f64)], horizontal: bool) {
    let palette = generate_palette(bars.len());
    let items: Vec<Bar> = bars
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, ((label, value), color))| {
            Bar::new(i as f64, *value)
                .name(label)
                .fill(color)
                .width(0.7)
        })
        .collect();
    let labels: Vec<String> = bars.iter().map(|(l, _)| l.clone()).collect();

    let mut bar_chart = BarChart::new(items).name(&chart.title);
    let mut plot = base_plot(id, chart);
    if horizontal {
        bar_chart = bar_chart.horizontal();
        plot = plot.y_axis_formatter(category_axis(labels));
    } else {
        plot = plot.x_axis_formatter(category_axis(labels));
    }
    plot.show(ui, |plot_ui| plot_ui.bar_chart(bar_chart));
}

/// Weekdays left to right, day periods top to bottom.
fn heatmap(ui: &mut Ui, id: &str, chart: &Chart, map: &Heatmap) {
    let max = map.max_cell().max(1) as f32;
    let rows = DayPeriod::ALL.len();
    let day_labels: Vec<String> = WEEKDAYS.iter().map(|d| weekday_name(*d).to_string()).collect();
    let period_labels: Vec<String> = DayPeriod::ALL
        .iter()
        .rev()
        .map(|p| p.to_string())
        .collect();

    base_plot(id, chart)
        .legend(Legend::default().position(egui_plot::Corner::RightBottom))
        .show_grid(false)
        .data_aspect(1.0)
        .x_axis_formatter(category_axis(day_labels))
        .y_axis_formatter(category_axis(period_labels))
        .show(ui, |plot_ui| {
            for (row, period) in DayPeriod::ALL.iter().enumerate() {
                let y = (rows - 1 - row) as f64;
                for (col, day) in WEEKDAYS.iter().enumerate() {
                    let x = col as f64;
                    let count = map.get(*period, *day);
                    let cell = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(cell))
                            .fill_color(heat_color(count as f32 / max))
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, y), count.to_string()).color(Color32::BLACK),
                    );
                }
            }
        });
}

/// One horizontal bar per position, from its start to its end date.
fn timeline(ui: &mut Ui, id: &str, chart: &Chart, spans: &[Span]) {
    let palette = generate_palette(spans.len());
    let items: Vec<Bar> = spans
        .iter()
        .zip(palette)
        .enumerate()
        .map(|(i, (span, color))| {
            Bar::new(i as f64, span.end - span.start)
                .base_offset(span.start)
                .name(&span.label)
                .fill(color)
                .width(0.6)
        })
        .collect();
    let labels: Vec<String> = spans.iter().map(|s| s.label.clone()).collect();

    base_plot(id, chart)
        .x_axis_formatter(date_axis)
        .y_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(items).horizontal().name(&chart.title));
        });
}
