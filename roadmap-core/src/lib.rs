//! Roadmap Interaction Core
//!
//! Platform-agnostic interaction logic for the technology roadmap page.
//! Every component here is a plain state machine that talks to the page through
//! a narrow surface trait, so the web crate only has to translate DOM events in
//! and class toggles out.

pub mod config;
pub mod drawer;
pub mod filter;
pub mod focus;
pub mod hooks;
pub mod ids;
pub mod phase_nav;
pub mod preview;
pub mod scroll_mirror;

// Re-export commonly used types
pub use config::{Classes, ConfigError, DrawerConfig, RoadmapConfig, Selectors};
pub use drawer::{Drawer, DrawerEvent, DrawerState, DrawerSurface, ScrollLock};
pub use filter::{
    CardRecord, Category, FilterEngine, FilterState, FilterSurface, FilterSummary, SearchTerm,
    card_matches,
};
pub use focus::{FocusChange, FocusEvent, FocusMode, FocusSurface, StageFocus};
pub use hooks::{Clearable, FocusProbe, ModeWatch, Resettable};
pub use ids::{CardId, StageId};
pub use phase_nav::{NavHighlight, PhaseNav, ScrollRequest, Visibility};
pub use preview::{CardPreview, ClickOutcome, PreviewEvent, PreviewSurface};
pub use scroll_mirror::{ScrollMirror, ScrollRegion, Side};
