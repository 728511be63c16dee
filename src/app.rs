use chrono::Local;
use eframe::egui;

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyReachApp {
    pub state: AppState,
}

impl RustyReachApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }

    fn consent_window(&mut self, ctx: &egui::Context) {
        if !self.state.consent_prompt_open {
            return;
        }
        egui::Window::new("Personal data")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(
                    "The analyses read the CSV files of your export and compute statistics \
                     about your activity, connections, saved jobs and positions.",
                );
                ui.label(
                    "Everything is computed on this computer. No data is sent anywhere and \
                     nothing is kept after the window is closed.",
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("I agree").clicked() {
                        self.state.accept_consent(Local::now().date_naive());
                    }
                    if ui.button("Cancel").clicked() {
                        self.state.refuse_consent();
                    }
                });
            });
    }
}

impl eframe::App for RustyReachApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: files, filters, analyses ----
        egui::SidePanel::left("side_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: analysis tabs ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::results_panel(ui, &mut self.state);
        });

        self.consent_window(ctx);
    }
}
