//! Scroll-synchronized motion for single-page portfolio sites.
//!
//! One [`FrameClock`] drives everything: an inertial [`SmoothScrollEngine`],
//! once-only reveal animations ([`ScrollAnimator`]), the navigation
//! highlight ([`ActiveSectionTracker`]), count-up stats ([`CounterAnimator`])
//! and the full-screen [`OverlayMenuController`]. The page itself stays behind
//! the [`Geometry`] and [`StyleSink`] traits, so the whole layer runs headless
//! against a [`MemoryDocument`].
//!
//! - Load and validate a [`MotionConfig`]
//! - [`Page::mount`] it over a document
//! - Call [`Page::frame`] from the host's frame callback
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod clock;
pub(crate) mod counter;
/// Host page seams.
pub mod document;
pub(crate) mod menu;
pub(crate) mod nav;
pub(crate) mod reveal;
pub(crate) mod scroll;

mod config;
mod page;
mod scenario;

pub use crate::foundation::core::{Circle, ElementId, Point, Rect, Vec2, Viewport};
pub use crate::foundation::error::{RevealError, RevealResult};
pub use crate::foundation::math::{EPSILON, clamp01};

pub use crate::animation::ease::Ease;
pub use crate::animation::timeline::{Direction, StaggeredTimeline, Timeline, TimelineEvent};
pub use crate::animation::tween::{Lerp, Props, Tween};
pub use crate::clock::frame_clock::{
    FrameClock, FrameScheduler, FrameTick, LagSmoothing, ManualScheduler,
};
pub use crate::clock::subscribers::{SubscriberList, Subscription, SubscriptionId};
pub use crate::config::{CounterConfig, MotionConfig, TrackerConfig};
pub use crate::counter::animator::{CounterAnimator, DEFAULT_COUNTER_DURATION_MS};
pub use crate::counter::state::CounterState;
pub use crate::document::memory::{AppliedStyle, MemoryDocument, MemoryElement};
pub use crate::document::{Document, Geometry, StyleSink};
pub use crate::menu::controller::{
    MenuConfig, MenuSelection, MenuState, MenuTarget, NavLink, OverlayMenuController,
    ToggleOutcome,
};
pub use crate::menu::geometry::{ClipConfig, ClipGeometry};
pub use crate::nav::throttle::Throttle;
pub use crate::nav::tracker::{ActiveSectionTracker, SectionBoundary, SectionChange, pick_active};
pub use crate::page::{CounterSpec, EVENT_LOG_CAPACITY, Page, PageEvents, PageSnapshot};
pub use crate::reveal::animator::{ElementEntry, RevealEvent, ScrollAnimator};
pub use crate::reveal::preset::{AnimationRule, Preset, PresetTable, RuleOverride};
pub use crate::scenario::{Input, MAX_SCENARIO_FRAMES, Scenario, ScenarioElement, ScenarioTrace, TimedInput};
pub use crate::scroll::lock::{ScrollLock, ScrollLockReader};
pub use crate::scroll::progress::{DEFAULT_PROGRESS_ELEMENT, ProgressIndicator};
pub use crate::scroll::smooth::{ScrollEvent, SmoothScrollConfig, SmoothScrollEngine};
pub use crate::scroll::state::{ScrollState, scroll_limit, scroll_progress};
