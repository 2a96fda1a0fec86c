use crate::{
    animation::{
        ease::Ease,
        timeline::{StaggeredTimeline, Timeline, TimelineEvent, eased_progress},
        tween::{Lerp, Props, Tween},
    },
    document::StyleSink,
    foundation::core::{ElementId, Viewport},
    menu::geometry::{ClipConfig, ClipGeometry},
    scroll::lock::{ScrollLock, ScrollLockReader},
};

/// Overlay lifecycle. Only the clip timeline moves it forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum MenuState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl MenuState {
    /// `true` while the clip timeline is running.
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// Result of a toggle request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ToggleOutcome {
    /// The toggle started a transition into the contained state.
    Accepted(MenuState),
    /// A transition was in flight; the toggle was dropped.
    Ignored(MenuState),
}

/// A labelled link; `#id` hrefs point at page sections.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_owned(),
            href: href.to_owned(),
        }
    }

    fn target(&self) -> MenuTarget {
        match self.href.strip_prefix('#') {
            Some(section) => MenuTarget::Section(ElementId::new(section)),
            None => MenuTarget::External(self.href.clone()),
        }
    }
}

/// Where a chosen overlay link leads.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum MenuTarget {
    Section(ElementId),
    External(String),
}

/// A chosen link and what the choice did to the overlay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MenuSelection {
    pub target: MenuTarget,
    pub outcome: ToggleOutcome,
}

/// Overlay contents and timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub overlay: ElementId,
    /// Header logo link. Not an overlay item, but choosing it closes the overlay.
    pub home: NavLink,
    pub links: Vec<NavLink>,
    /// Trailing link (the resume) that gets the same entrance as nav links.
    pub resume: NavLink,
    pub clip: ClipConfig,
    pub clip_duration_s: f64,
    pub clip_ease: Ease,
    pub item_from: Props,
    pub item_duration_s: f64,
    pub item_stagger_s: f64,
    pub item_ease: Ease,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            overlay: ElementId::new("nav-overlay"),
            home: NavLink::new("Home", "#home"),
            links: vec![
                NavLink::new("ABOUT", "#about"),
                NavLink::new("SKILLS", "#skills"),
                NavLink::new("PROJECTS", "#projects"),
                NavLink::new("CONTACT", "#contact"),
            ],
            resume: NavLink::new("Resume", "/Resume.pdf"),
            clip: ClipConfig::default(),
            clip_duration_s: 0.25,
            clip_ease: Ease::Power1Out,
            item_from: Props::IDENTITY.opacity(0.0).y(100.0).scale(0.8),
            item_duration_s: 0.5,
            item_stagger_s: 0.1,
            item_ease: Ease::BACK,
        }
    }
}

impl MenuConfig {
    /// Element ids of the overlay items: one per link, then the resume link.
    pub fn item_ids(&self) -> Vec<ElementId> {
        (0..=self.links.len())
            .map(|i| ElementId::new(format!("{}-item-{i}", self.overlay)))
            .collect()
    }
}

/// Full-screen navigation overlay: `Closed -> Opening -> Open -> Closing -> Closed`.
///
/// Two timelines run side by side: the clip circle and the staggered item
/// entrance. Only the clip timeline's completion moves the state machine, and
/// toggles that arrive mid-transition are ignored. The controller is the sole
/// owner of the page [`ScrollLock`].
#[derive(Debug)]
pub struct OverlayMenuController {
    config: MenuConfig,
    viewport: Viewport,
    state: MenuState,
    clip: Timeline,
    items: StaggeredTimeline<Props>,
    item_ids: Vec<ElementId>,
    lock: ScrollLock,
    overlay_displayed: bool,
}

impl OverlayMenuController {
    pub fn new(config: MenuConfig, viewport: Viewport) -> Self {
        let item_ids = config.item_ids();
        let items = StaggeredTimeline::new(
            Tween::new(
                config.item_from,
                Props::IDENTITY,
                config.item_duration_s,
                config.item_ease,
            ),
            config.item_stagger_s,
            item_ids.len(),
        );
        Self {
            clip: Timeline::new(config.clip_duration_s),
            items,
            item_ids,
            viewport,
            state: MenuState::Closed,
            lock: ScrollLock::new(),
            overlay_displayed: false,
            config,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_engaged()
    }

    pub fn scroll_lock(&self) -> ScrollLockReader {
        self.lock.reader()
    }

    pub fn is_overlay_displayed(&self) -> bool {
        self.overlay_displayed
    }

    pub fn item_ids(&self) -> &[ElementId] {
        &self.item_ids
    }

    /// Hamburger click. Only accepted from `Closed` or `Open`.
    pub fn toggle(&mut self) -> ToggleOutcome {
        match self.state {
            MenuState::Closed => {
                self.overlay_displayed = true;
                self.lock.engage();
                self.clip.play();
                self.items.play();
                self.transition(MenuState::Opening)
            }
            MenuState::Open => {
                self.clip.reverse();
                self.items.reverse();
                self.transition(MenuState::Closing)
            }
            MenuState::Opening | MenuState::Closing => {
                tracing::trace!(state = ?self.state, "toggle ignored mid-transition");
                ToggleOutcome::Ignored(self.state)
            }
        }
    }

    /// Nav link `index` was chosen; the resume link is `links.len()`.
    pub fn select_item(&mut self, index: usize) -> Option<MenuSelection> {
        let target = if index < self.config.links.len() {
            self.config.links[index].target()
        } else if index == self.config.links.len() {
            MenuTarget::External(self.config.resume.href.clone())
        } else {
            return None;
        };
        Some(self.select(target))
    }

    pub fn select_resume(&mut self) -> Option<MenuSelection> {
        self.select_item(self.config.links.len())
    }

    /// Logo click. Closes an open overlay like any other link.
    pub fn select_home(&mut self) -> MenuSelection {
        let target = self.config.home.target();
        self.select(target)
    }

    fn select(&mut self, target: MenuTarget) -> MenuSelection {
        let outcome = if self.state == MenuState::Open {
            self.toggle()
        } else {
            ToggleOutcome::Ignored(self.state)
        };
        MenuSelection { target, outcome }
    }

    /// Advance both timelines. Returns the new state when one was entered.
    pub fn advance(&mut self, dt_s: f64) -> Option<MenuState> {
        // Item completion does not gate the state machine.
        let _ = self.items.advance(dt_s);

        match (self.clip.advance(dt_s)?, self.state) {
            (TimelineEvent::Completed, MenuState::Opening) => {
                self.transition(MenuState::Open);
                Some(MenuState::Open)
            }
            (TimelineEvent::ReverseCompleted, MenuState::Closing) => {
                self.overlay_displayed = false;
                self.lock.release();
                self.transition(MenuState::Closed);
                Some(MenuState::Closed)
            }
            (event, state) => {
                tracing::trace!(?event, ?state, "clip timeline event without transition");
                None
            }
        }
    }

    /// Recompute the clip endpoints for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn clip_geometry(&self) -> ClipGeometry {
        let closed = ClipGeometry::closed(self.viewport, &self.config.clip);
        let open = ClipGeometry::open(self.viewport, &self.config.clip);
        let t = eased_progress(&self.clip, self.config.clip_ease);
        ClipGeometry::lerp(&closed, &open, t)
    }

    pub fn item_props(&self) -> Vec<Props> {
        self.items.items()
    }

    /// Push the current overlay state to the page.
    pub fn render(&self, sink: &mut dyn StyleSink) {
        sink.set_displayed(&self.config.overlay, self.overlay_displayed);
        sink.set_clip_path(&self.config.overlay, &self.clip_geometry().to_css());
        for (id, props) in self.item_ids.iter().zip(self.items.items()) {
            sink.apply(id, &props);
        }
        sink.set_scroll_locked(self.lock.is_engaged());
    }

    fn transition(&mut self, next: MenuState) -> ToggleOutcome {
        tracing::debug!(from = ?self.state, to = ?next, "overlay menu");
        self.state = next;
        ToggleOutcome::Accepted(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/menu/controller.rs"]
mod tests;
