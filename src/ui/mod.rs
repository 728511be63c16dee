/// Presentation layer: egui panels and egui_plot charts.
pub mod panels;
pub mod plot;
