use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::config::Settings;
use crate::data::filter::{filtered_interactions, FilterState};
use crate::data::loader::detect_and_load;
use crate::data::model::{ExportBundle, InteractionKind};
use crate::error::AnalysisError;
use crate::report::{run_all, Analysis, Outcome, RunContext};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Directory the current bundle was loaded from.
    pub data_dir: PathBuf,

    /// Loaded export (empty until a directory loads).
    pub bundle: ExportBundle,

    /// Interaction filter from the side panel.
    pub filter: FilterState,

    /// Analyses ticked in the side panel.
    pub selected: BTreeSet<Analysis>,

    /// Whether the user agreed to the local processing notice.
    pub consent_given: bool,

    /// Consent window currently displayed.
    pub consent_prompt_open: bool,

    /// Results of the last run, in menu order.
    pub results: Vec<(Analysis, Result<Outcome, AnalysisError>)>,

    /// Tab shown in the central panel.
    pub active_tab: Option<Analysis>,

    /// Series colours shared by every chart.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let data_dir = settings.data_dir.clone();
        let mut state = Self {
            consent_given: settings.assume_consent,
            settings,
            data_dir: data_dir.clone(),
            bundle: ExportBundle::default(),
            filter: FilterState::default(),
            selected: BTreeSet::new(),
            consent_prompt_open: false,
            results: Vec::new(),
            active_tab: None,
            color_map: ColorMap::new(InteractionKind::ALL.iter().map(|k| k.plural())),
            status_message: None,
        };
        state.load_dir(&data_dir);
        state
    }

    /// Load (or reload) an export directory, resetting filters and results.
    pub fn load_dir(&mut self, dir: &Path) {
        self.data_dir = dir.to_path_buf();
        self.results.clear();
        self.active_tab = None;

        match detect_and_load(dir) {
            Ok(bundle) => {
                log::info!(
                    "Loaded {} interactions, {} connections, {} saved jobs, {} positions from {}",
                    bundle.interactions.len(),
                    bundle.connections.len(),
                    bundle.saved_jobs.len(),
                    bundle.positions.len(),
                    dir.display()
                );
                self.filter = FilterState::spanning(&bundle);
                self.status_message = bundle
                    .is_empty()
                    .then(|| format!("No usable export file found in {}", dir.display()));
                self.bundle = bundle;
            }
            Err(e) => {
                log::error!("Failed to load export: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.filter = FilterState::default();
                self.bundle = ExportBundle::default();
            }
        }
    }

    pub fn refresh(&mut self) {
        let dir = self.data_dir.clone();
        self.load_dir(&dir);
    }

    // ---- Analysis selection ----

    pub fn toggle_analysis(&mut self, analysis: Analysis) {
        if !self.selected.remove(&analysis) {
            self.selected.insert(analysis);
        }
    }

    pub fn all_selected(&self) -> bool {
        self.selected.len() == Analysis::ALL.len()
    }

    pub fn set_all_selected(&mut self, all: bool) {
        if all {
            self.selected = Analysis::ALL.into_iter().collect();
        } else {
            self.selected.clear();
        }
    }

    // ---- Running ----

    /// Ask to run the selected analyses; opens the consent window first when
    /// consent has not been given yet.
    pub fn request_run(&mut self, today: NaiveDate) {
        if self.selected.is_empty() {
            self.status_message = Some("Select at least one analysis.".into());
            return;
        }
        if self.consent_given {
            self.run_selected(today);
        } else {
            self.consent_prompt_open = true;
        }
    }

    pub fn accept_consent(&mut self, today: NaiveDate) {
        log::info!("Consent given for local analysis");
        self.consent_given = true;
        self.consent_prompt_open = false;
        self.run_selected(today);
    }

    pub fn refuse_consent(&mut self) {
        log::info!("Consent refused, analysis cancelled");
        self.consent_prompt_open = false;
        self.status_message = Some("Analysis cancelled: consent is required.".into());
    }

    pub fn run_selected(&mut self, today: NaiveDate) {
        let interactions = filtered_interactions(&self.bundle, &self.filter);
        let ctx = RunContext {
            bundle: &self.bundle,
            interactions: &interactions,
            top_n: self.settings.top_n,
            today,
        };
        self.results = run_all(self.selected.iter().copied(), &ctx);

        let failed = self.results.iter().filter(|(_, r)| r.is_err()).count();
        self.status_message = (failed > 0).then(|| {
            format!(
                "{failed} of {} analyses could not be produced.",
                self.results.len()
            )
        });
        self.active_tab = self
            .results
            .iter()
            .find(|(_, r)| r.is_ok())
            .or(self.results.first())
            .map(|(a, _)| *a);
    }

    pub fn active_result(&self) -> Option<&Result<Outcome, AnalysisError>> {
        let tab = self.active_tab?;
        self.results.iter().find(|(a, _)| *a == tab).map(|(_, r)| r)
    }
}
