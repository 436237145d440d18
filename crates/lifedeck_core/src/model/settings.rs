//! User-facing settings persisted alongside the taxonomy.

use serde::{Deserialize, Serialize};

/// Layout used when rendering category lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub view_mode: ViewMode,
    pub theme: Theme,
    pub has_completed_onboarding: bool,
}

/// Partial settings update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub view_mode: Option<ViewMode>,
    pub theme: Option<Theme>,
    pub has_completed_onboarding: Option<bool>,
}

impl Settings {
    pub fn patched(&self, patch: &SettingsPatch) -> Self {
        Self {
            view_mode: patch.view_mode.unwrap_or(self.view_mode),
            theme: patch.theme.unwrap_or(self.theme),
            has_completed_onboarding: patch
                .has_completed_onboarding
                .unwrap_or(self.has_completed_onboarding),
        }
    }
}
