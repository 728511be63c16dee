use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{ExportBundle, Interaction, InteractionKind};

// ---------------------------------------------------------------------------
// Filter predicate: which interactions feed the activity analyses
// ---------------------------------------------------------------------------

/// Interaction selection made in the side panel.
///
/// An empty `kinds` set selects nothing. Date bounds are inclusive and
/// `None` means unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub kinds: BTreeSet<InteractionKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            kinds: InteractionKind::ALL.into_iter().collect(),
            from: None,
            to: None,
        }
    }
}

impl FilterState {
    /// Initialise the date bounds from the loaded interactions so the pickers
    /// start on the data's actual span.
    pub fn spanning(bundle: &ExportBundle) -> Self {
        Self {
            from: bundle.interactions.first().map(|i| i.at.date()),
            to: bundle.interactions.last().map(|i| i.at.date()),
            ..Default::default()
        }
    }

    pub fn accepts(&self, interaction: &Interaction) -> bool {
        if !self.kinds.contains(&interaction.kind) {
            return false;
        }
        let day = interaction.at.date();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        true
    }

    pub fn toggle_kind(&mut self, kind: InteractionKind) {
        if !self.kinds.remove(&kind) {
            self.kinds.insert(kind);
        }
    }
}

/// Return the interactions passing `filter`, in time order.
pub fn filtered_interactions(bundle: &ExportBundle, filter: &FilterState) -> Vec<Interaction> {
    bundle
        .interactions
        .iter()
        .filter(|i| filter.accepts(i))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, kind: InteractionKind) -> Interaction {
        Interaction {
            at: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            kind,
        }
    }

    fn bundle() -> ExportBundle {
        ExportBundle {
            interactions: vec![
                at(1, InteractionKind::Reaction),
                at(2, InteractionKind::Comment),
                at(3, InteractionKind::Reaction),
                at(4, InteractionKind::Comment),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn default_filter_keeps_everything() {
        let b = bundle();
        assert_eq!(filtered_interactions(&b, &FilterState::default()).len(), 4);
    }

    #[test]
    fn deselected_kind_is_removed() {
        let b = bundle();
        let mut f = FilterState::default();
        f.toggle_kind(InteractionKind::Comment);
        let kept = filtered_interactions(&b, &f);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|i| i.kind == InteractionKind::Reaction));

        f.toggle_kind(InteractionKind::Reaction);
        assert!(filtered_interactions(&b, &f).is_empty());
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let b = bundle();
        let f = FilterState {
            from: NaiveDate::from_ymd_opt(2024, 5, 2),
            to: NaiveDate::from_ymd_opt(2024, 5, 3),
            ..Default::default()
        };
        let days: Vec<_> = filtered_interactions(&b, &f)
            .iter()
            .map(|i| i.at.date())
            .collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
            ]
        );
    }

    #[test]
    fn spanning_uses_first_and_last_day() {
        let f = FilterState::spanning(&bundle());
        assert_eq!(f.from, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(f.to, NaiveDate::from_ymd_opt(2024, 5, 4));
    }
}
