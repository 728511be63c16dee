use chrono::{Local, NaiveDate};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, DatePickerButton, TableBuilder};

use crate::data::model::{ExportSource, InteractionKind};
use crate::error::AnalysisError;
use crate::report::{Analysis, Outcome};
use crate::state::AppState;
use crate::ui::plot;

const OK_COLOR: Color32 = Color32::from_rgb(60, 160, 90);

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Left side panel – export files, filters and analysis selection
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            detected_files(ui, state);
            ui.separator();
            interaction_filters(ui, state);
            ui.separator();
            analysis_selection(ui, state);
        });
}

fn detected_files(ui: &mut Ui, state: &AppState) {
    egui::CollapsingHeader::new(RichText::new("Detected files").strong())
        .id_salt("detected_files")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            for source in ExportSource::ALL {
                let present = state.bundle.is_present(source);
                let (mark, color) = if present {
                    ("✔", OK_COLOR)
                } else {
                    ("✖", Color32::GRAY)
                };
                ui.label(RichText::new(format!("{mark} {source}")).color(color));
            }
            for problem in &state.bundle.problems {
                ui.label(RichText::new(problem).color(Color32::RED).small());
            }
        });
}

fn interaction_filters(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Interactions");
    for kind in InteractionKind::ALL {
        let mut checked = state.filter.kinds.contains(&kind);
        let label = format!("{} ({})", kind.plural(), state.bundle.count_of(kind));
        if ui.checkbox(&mut checked, label).changed() {
            state.filter.toggle_kind(kind);
        }
    }

    let fallback = today();
    egui::Grid::new("date_range")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("From");
            let before = state.filter.from.unwrap_or(fallback);
            let mut from = before;
            ui.add(DatePickerButton::new(&mut from).id_salt("filter_from"));
            if from != before {
                state.filter.from = Some(from);
            }
            ui.end_row();

            ui.label("To");
            let before = state.filter.to.unwrap_or(fallback);
            let mut to = before;
            ui.add(DatePickerButton::new(&mut to).id_salt("filter_to"));
            if to != before {
                state.filter.to = Some(to);
            }
            ui.end_row();
        });

    if let (Some(from), Some(to)) = (state.filter.from, state.filter.to) {
        if from > to {
            ui.label(RichText::new("The start date is after the end date.").color(Color32::RED));
        }
    }
}

fn analysis_selection(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Analyses");
    let mut all = state.all_selected();
    if ui.checkbox(&mut all, "Analyse everything").changed() {
        state.set_all_selected(all);
    }
    ui.add_space(4.0);

    let mut previous_uses_interactions = true;
    for analysis in Analysis::ALL {
        if previous_uses_interactions && !analysis.uses_interactions() {
            ui.add_space(4.0);
            ui.label(RichText::new("Job search, career and network").small());
        }
        previous_uses_interactions = analysis.uses_interactions();

        let mut checked = state.selected.contains(&analysis);
        if ui.checkbox(&mut checked, analysis.title()).changed() {
            state.toggle_analysis(analysis);
        }
    }

    ui.add_space(8.0);
    let button = egui::Button::new(RichText::new("Run analysis").strong());
    if ui
        .add_enabled(!state.selected.is_empty(), button)
        .clicked()
    {
        state.request_run(today());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open export folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Refresh").clicked() {
                state.refresh();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!("{}", state.data_dir.display()));
        ui.separator();

        let b = &state.bundle;
        ui.label(format!(
            "{} reactions, {} comments, {} connections, {} saved jobs, {} positions",
            b.count_of(InteractionKind::Reaction),
            b.count_of(InteractionKind::Comment),
            b.connections.len(),
            b.saved_jobs.len(),
            b.positions.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open export folder")
        .set_directory(&state.data_dir)
        .pick_folder();

    if let Some(path) = folder {
        state.load_dir(&path);
    }
}

// ---------------------------------------------------------------------------
// Central panel – one tab per analysis
// ---------------------------------------------------------------------------

pub fn results_panel(ui: &mut Ui, state: &mut AppState) {
    if state.results.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Pick analyses on the left, then press “Run analysis”.");
        });
        return;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (analysis, result) in &state.results {
            let text = match result {
                Ok(_) => RichText::new(analysis.title()),
                Err(_) => RichText::new(analysis.title()).color(Color32::GRAY),
            };
            ui.selectable_value(&mut state.active_tab, Some(*analysis), text);
        }
    });
    ui.separator();

    let Some(result) = state.active_result() else {
        return;
    };
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match result {
            Ok(outcome) => outcome_view(ui, outcome, state),
            Err(e) => error_view(ui, e),
        });
}

fn outcome_view(ui: &mut Ui, outcome: &Outcome, state: &AppState) {
    ui.heading(outcome.title);
    ui.add_space(4.0);

    for (i, chart) in outcome.charts.iter().enumerate() {
        let id = format!("{:?}_{i}", outcome.analysis);
        plot::chart(ui, &id, chart, &state.color_map);
    }

    if !outcome.indicators.is_empty() {
        ui.strong("Key figures");
        indicator_table(ui, &outcome.indicators);
        ui.add_space(8.0);
    }

    if !outcome.commentary.is_empty() {
        ui.strong("Commentary");
        ui.label(&outcome.commentary);
    }
}

fn indicator_table(ui: &mut Ui, rows: &[(String, String)]) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(180.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Indicator");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (label, value) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(label);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(value);
                    });
                });
            }
        });
}

fn error_view(ui: &mut Ui, err: &AnalysisError) {
    ui.label(RichText::new(format!("This analysis could not be produced: {err}")).color(Color32::RED));
}
