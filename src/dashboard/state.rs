use crate::dashboard::*;

/// The dashboard state, reduced one action at a time.
///
/// `apply` never mutates in place: it returns the next state, with `version`
/// bumped exactly when the action was accepted. Rejected actions come back
/// as an identical state with the same version, so hosts can use the version
/// as a redraw signal.
#[derive(PartialEq, Debug, Clone)]
pub struct DashboardState {
    pub version: u64,
    pub datasets: Vec<Dataset>,
    pub hall_filter: String,
    pub trend_index: String,
    pub selected: Option<String>,
}

impl Default for DashboardState {
    fn default() -> DashboardState {
        DashboardState {
            version: 0,
            datasets: Vec::new(),
            hall_filter: HALL_FILTER_ALL.to_string(),
            trend_index: "satisfaction".to_string(),
            selected: None,
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum DashboardAction {
    AddDataset(Dataset),
    RemoveDataset(String),
    SelectDataset(String),
    SetHallFilter(String),
    SetTrendIndex(String),
}

impl DashboardState {
    pub fn apply(&self, action: DashboardAction) -> DashboardState {
        let mut next = self.clone();
        match action {
            DashboardAction::AddDataset(mut dataset) => {
                let unique = self.unique_id(&dataset.id);
                if unique != dataset.id {
                    warn!(
                        "apply: duplicate dataset id {}, stored as {}",
                        dataset.id, unique
                    );
                    dataset.id = unique;
                }
                next.datasets.push(dataset);
            }
            DashboardAction::RemoveDataset(id) => {
                let position = match self.datasets.iter().position(|d| d.id == id) {
                    Some(position) => position,
                    None => {
                        warn!("apply: no dataset {} to remove", id);
                        return self.clone();
                    }
                };
                if self.datasets[position].provenance == Provenance::Demo {
                    warn!("apply: dataset {} is the demo baseline, keeping it", id);
                    return self.clone();
                }
                next.datasets.remove(position);
                if next.selected.as_deref() == Some(id.as_str()) {
                    next.selected = None;
                }
            }
            DashboardAction::SelectDataset(id) => {
                if !self.datasets.iter().any(|d| d.id == id) {
                    warn!("apply: no dataset {} to select", id);
                    return self.clone();
                }
                next.selected = Some(id);
            }
            DashboardAction::SetHallFilter(value) => {
                next.hall_filter = value.trim().to_string();
            }
            DashboardAction::SetTrendIndex(key) => {
                if index_by_key(&key).is_none() {
                    warn!("apply: unknown trend index {}", key);
                    return self.clone();
                }
                next.trend_index = key;
            }
        }
        next.version = self.version + 1;
        next
    }

    fn unique_id(&self, id: &str) -> String {
        if !self.datasets.iter().any(|d| d.id == id) {
            return id.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", id, n);
            if !self.datasets.iter().any(|d| d.id == candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// The dataset the single-dataset views read: the explicit selection
    /// when it still resolves, the most recently added dataset otherwise.
    pub fn active_dataset(&self) -> Option<&Dataset> {
        if let Some(id) = &self.selected {
            if let Some(dataset) = self.datasets.iter().find(|d| d.id == *id) {
                return Some(dataset);
            }
        }
        self.datasets.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(id: &str) -> Dataset {
        DatasetBuilder::new("Spring 2026").id(id).build()
    }

    #[test]
    fn versions_bump_exactly_on_accepted_actions() {
        let state = DashboardState::default();
        assert_eq!(state.version, 0);
        let state = state.apply(DashboardAction::AddDataset(uploaded("a")));
        assert_eq!(state.version, 1);
        let state = state.apply(DashboardAction::SetTrendIndex("nope".to_string()));
        assert_eq!(state.version, 1);
        let state = state.apply(DashboardAction::SetTrendIndex("belonging".to_string()));
        assert_eq!(state.version, 2);
        assert_eq!(state.trend_index, "belonging");
    }

    #[test]
    fn the_demo_dataset_cannot_be_removed() {
        let demo = DatasetBuilder::demo("Demo").id("demo").build();
        let state = DashboardState::default().apply(DashboardAction::AddDataset(demo));
        let next = state.apply(DashboardAction::RemoveDataset("demo".to_string()));
        assert_eq!(next, state);
    }

    #[test]
    fn removing_an_unknown_id_changes_nothing() {
        let state = DashboardState::default().apply(DashboardAction::AddDataset(uploaded("a")));
        let next = state.apply(DashboardAction::RemoveDataset("b".to_string()));
        assert_eq!(next, state);
    }

    #[test]
    fn duplicate_ids_are_kept_apart() {
        let mut state = DashboardState::default();
        for _ in 0..3 {
            state = state.apply(DashboardAction::AddDataset(uploaded("spring-2026")));
        }
        let ids: Vec<&str> = state.datasets.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["spring-2026", "spring-2026-2", "spring-2026-3"]);
    }

    #[test]
    fn selection_falls_back_to_the_latest_dataset() {
        let mut state = DashboardState::default();
        state = state.apply(DashboardAction::AddDataset(uploaded("a")));
        state = state.apply(DashboardAction::AddDataset(uploaded("b")));
        assert_eq!(state.active_dataset().map(|d| d.id.as_str()), Some("b"));
        state = state.apply(DashboardAction::SelectDataset("a".to_string()));
        assert_eq!(state.active_dataset().map(|d| d.id.as_str()), Some("a"));
        state = state.apply(DashboardAction::RemoveDataset("a".to_string()));
        assert_eq!(state.selected, None);
        assert_eq!(state.active_dataset().map(|d| d.id.as_str()), Some("b"));
        // Selecting something unknown leaves the selection alone.
        let next = state.apply(DashboardAction::SelectDataset("zzz".to_string()));
        assert_eq!(next, state);
    }

    #[test]
    fn hall_filters_are_stored_trimmed() {
        let state = DashboardState::default()
            .apply(DashboardAction::SetHallFilter("  Pine Hall ".to_string()));
        assert_eq!(state.hall_filter, "Pine Hall");
    }
}
