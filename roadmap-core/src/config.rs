//! Structural contract between the page markup and the interaction layer.
//!
//! Every field has a default matching the roadmap page's conventional markup,
//! so a partial JSON document only needs to name what differs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid roadmap config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub scroll: String,
    pub roadmap: String,
    pub top_bar_wrapper: String,
    pub top_bar_inner: String,
    pub chip: String,
    pub card: String,
    pub stage: String,
    pub stage_header: String,
    pub stage_empty: String,
    pub nav_button: String,
    pub collapse_button: String,
    /// Element id, not a selector.
    pub search_input: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            scroll: ".roadmap-scroll".into(),
            roadmap: ".roadmap".into(),
            top_bar_wrapper: ".top-scrollbar-wrapper".into(),
            top_bar_inner: ".top-scrollbar".into(),
            chip: ".chip".into(),
            card: ".tcard".into(),
            stage: ".stage".into(),
            stage_header: ".stage-hd".into(),
            stage_empty: ".stage-empty--filtered".into(),
            nav_button: ".phase-nav-btn".into(),
            collapse_button: ".tcard-collapse-btn".into(),
            search_input: "tech-search".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classes {
    pub card_hidden: String,
    pub chip_active: String,
    pub nav_active: String,
    pub drawer_active: String,
    pub stage_active: String,
    pub stage_focused: String,
    pub stage_collapsed: String,
    pub card_preview: String,
}

impl Default for Classes {
    fn default() -> Self {
        Self {
            card_hidden: "is-hidden".into(),
            chip_active: "active".into(),
            nav_active: "is-active".into(),
            drawer_active: "is-active".into(),
            stage_active: "is-stage-active".into(),
            stage_focused: "is-stage-focused".into(),
            stage_collapsed: "is-stage-collapsed".into(),
            card_preview: "tcard--preview".into(),
        }
    }
}

/// Element ids for one side drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawerConfig {
    pub name: String,
    pub panel: String,
    pub overlay: String,
    pub open_button: String,
    pub close_button: String,
}

impl DrawerConfig {
    /// Ids following the `<prefix>-drawer`, `<prefix>-drawer-overlay`,
    /// `open-<prefix>-drawer`, `close-<prefix>-drawer` pattern.
    #[must_use]
    pub fn conventional(name: &str, prefix: &str) -> Self {
        Self {
            name: name.into(),
            panel: format!("{prefix}-drawer"),
            overlay: format!("{prefix}-drawer-overlay"),
            open_button: format!("open-{prefix}-drawer"),
            close_button: format!("close-{prefix}-drawer"),
        }
    }
}

fn default_drawers() -> Vec<DrawerConfig> {
    vec![
        DrawerConfig {
            // The about drawer's buttons predate the naming pattern.
            open_button: "open-drawer".into(),
            close_button: "close-drawer".into(),
            ..DrawerConfig::conventional("about", "about")
        },
        DrawerConfig::conventional("poc", "poc"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapConfig {
    pub selectors: Selectors,
    pub classes: Classes,
    pub drawers: Vec<DrawerConfig>,
    /// Visible fraction at which a stage's nav button lights up.
    pub nav_threshold: f64,
    /// `log` level name for the console logger.
    pub log_level: String,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            classes: Classes::default(),
            drawers: default_drawers(),
            nav_threshold: 0.5,
            log_level: "warn".into(),
        }
    }
}

impl RoadmapConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Self::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for blank selectors or class names, a
    /// threshold outside `(0, 1]`, an unknown log level, or drawers sharing a
    /// name or panel id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.selectors;
        let named = [
            ("selectors.scroll", &s.scroll),
            ("selectors.roadmap", &s.roadmap),
            ("selectors.top_bar_wrapper", &s.top_bar_wrapper),
            ("selectors.top_bar_inner", &s.top_bar_inner),
            ("selectors.chip", &s.chip),
            ("selectors.card", &s.card),
            ("selectors.stage", &s.stage),
            ("selectors.stage_header", &s.stage_header),
            ("selectors.stage_empty", &s.stage_empty),
            ("selectors.nav_button", &s.nav_button),
            ("selectors.collapse_button", &s.collapse_button),
            ("selectors.search_input", &s.search_input),
            ("classes.card_hidden", &self.classes.card_hidden),
            ("classes.chip_active", &self.classes.chip_active),
            ("classes.nav_active", &self.classes.nav_active),
            ("classes.drawer_active", &self.classes.drawer_active),
            ("classes.stage_active", &self.classes.stage_active),
            ("classes.stage_focused", &self.classes.stage_focused),
            ("classes.stage_collapsed", &self.classes.stage_collapsed),
            ("classes.card_preview", &self.classes.card_preview),
        ];
        if let Some((field, _)) = named.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("{field} must not be blank")));
        }

        if !(self.nav_threshold > 0.0 && self.nav_threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "nav_threshold must be within (0, 1], got {}",
                self.nav_threshold
            )));
        }

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level {:?}",
                self.log_level
            )));
        }

        let mut names = BTreeSet::new();
        let mut panels = BTreeSet::new();
        for drawer in &self.drawers {
            if !names.insert(drawer.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate drawer name {:?}",
                    drawer.name
                )));
            }
            if !panels.insert(drawer.panel.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "drawers share panel id {:?}",
                    drawer.panel
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Warn)
    }
}
