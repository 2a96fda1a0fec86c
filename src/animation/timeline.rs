use crate::animation::{
    ease::Ease,
    tween::{Lerp, Tween},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Completion signal emitted by [`Timeline::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TimelineEvent {
    /// The play head reached the end while playing forward.
    Completed,
    /// The play head reached the start while reversing.
    ReverseCompleted,
}

/// A paused-by-default, reversible play head over `[0, duration]`.
///
/// The timeline owns no values; callers map [`Timeline::progress`] onto
/// whatever they animate. Time only moves through [`Timeline::advance`].
#[derive(Clone, Debug)]
pub struct Timeline {
    duration_s: f64,
    position_s: f64,
    direction: Direction,
    playing: bool,
    started: bool,
}

impl Timeline {
    pub fn new(duration_s: f64) -> Self {
        Self {
            duration_s: duration_s.max(0.0),
            position_s: 0.0,
            direction: Direction::Forward,
            playing: false,
            started: false,
        }
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.playing = true;
        self.started = true;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Reverse;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    pub fn position_s(&self) -> f64 {
        self.position_s
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_s <= 0.0 {
            let at_end = self.started && self.direction == Direction::Forward;
            return if at_end { 1.0 } else { 0.0 };
        }
        (self.position_s / self.duration_s).clamp(0.0, 1.0)
    }

    /// Move the play head by `dt_s`. Returns an event on the tick the head
    /// hits the boundary it is travelling toward.
    pub fn advance(&mut self, dt_s: f64) -> Option<TimelineEvent> {
        if !self.playing {
            return None;
        }
        let dt_s = dt_s.max(0.0);
        match self.direction {
            Direction::Forward => {
                self.position_s = (self.position_s + dt_s).min(self.duration_s);
                if self.position_s >= self.duration_s {
                    self.playing = false;
                    return Some(TimelineEvent::Completed);
                }
            }
            Direction::Reverse => {
                self.position_s = (self.position_s - dt_s).max(0.0);
                if self.position_s <= 0.0 {
                    self.playing = false;
                    return Some(TimelineEvent::ReverseCompleted);
                }
            }
        }
        None
    }
}

/// `count` identical tweens on one play head, item `i` offset by `i * stagger`.
#[derive(Clone, Debug)]
pub struct StaggeredTimeline<T> {
    tween: Tween<T>,
    stagger_s: f64,
    count: usize,
    head: Timeline,
}

impl<T> StaggeredTimeline<T>
where
    T: Lerp + Clone,
{
    pub fn new(tween: Tween<T>, stagger_s: f64, count: usize) -> Self {
        let stagger_s = stagger_s.max(0.0);
        let tail = stagger_s * count.saturating_sub(1) as f64;
        let head = Timeline::new(tween.end_s() + tail);
        Self {
            tween,
            stagger_s,
            count,
            head,
        }
    }

    pub fn head(&self) -> &Timeline {
        &self.head
    }

    pub fn play(&mut self) {
        self.head.play();
    }

    pub fn reverse(&mut self) {
        self.head.reverse();
    }

    pub fn advance(&mut self, dt_s: f64) -> Option<TimelineEvent> {
        self.head.advance(dt_s)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current value of item `index`, or `None` when out of range.
    pub fn item(&self, index: usize) -> Option<T> {
        if index >= self.count {
            return None;
        }
        let local = self.head.position_s() - self.stagger_s * index as f64;
        Some(self.tween.sample(local))
    }

    pub fn items(&self) -> Vec<T> {
        (0..self.count).filter_map(|i| self.item(i)).collect()
    }
}

/// Convenience for a single eased scalar timeline.
pub fn eased_progress(head: &Timeline, ease: Ease) -> f64 {
    ease.apply(head.progress())
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
