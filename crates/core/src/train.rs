//! Train module - cyclic waypoint-to-waypoint traversal of the rail path
//!
//! The navigator is a two-state machine. While idle it counts down a wait
//! timer; when that expires it starts a hop towards the next waypoint. While in
//! flight it interpolates position and heading (cubic ease-out) until the hop
//! duration has elapsed, then goes idle again at the target waypoint.
//!
//! Time only advances through [`TrainNavigator::advance`], so freezing the
//! caller's clock (pause) freezes the train exactly where it is.

use std::f32::consts::{PI, TAU};

use crate::rail::RailPath;
use crate::types::{CoreEvent, Direction, GameConfig, DOCK_X, DOCK_Y, HEADING_OFFSET};

/// An animated move between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hop {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub from_heading: f32,
    /// Heading delta along the shortest arc.
    pub turn: f32,
    pub target: usize,
    pub elapsed_ms: u32,
    pub duration_ms: u32,
}

impl Hop {
    /// Normalised progress in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed_ms as f32 / self.duration_ms as f32).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainPhase {
    Idle { wait_ms: u32 },
    InFlight(Hop),
}

/// Token that travels the rail path forever.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainNavigator {
    x: f32,
    y: f32,
    heading: f32,
    path_index: usize,
    phase: TrainPhase,
}

impl TrainNavigator {
    /// A train parked at the dock, ready to hop on the first advance.
    pub fn new() -> Self {
        Self {
            x: DOCK_X,
            y: DOCK_Y,
            heading: 0.0,
            path_index: 0,
            phase: TrainPhase::Idle { wait_ms: 0 },
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Heading in radians: travel angle plus `HEADING_OFFSET` (0 = moving down the screen).
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn path_index(&self) -> usize {
        self.path_index
    }

    pub fn phase(&self) -> &TrainPhase {
        &self.phase
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, TrainPhase::InFlight(_))
    }

    /// Waypoint index the current hop is heading for.
    pub fn target_index(&self) -> Option<usize> {
        match self.phase {
            TrainPhase::InFlight(hop) => Some(hop.target),
            TrainPhase::Idle { .. } => None,
        }
    }

    /// Try to begin a hop from the current position.
    ///
    /// Returns `false` if a hop is already in flight or the path is empty. An
    /// empty path parks the train at the dock and schedules a retry after the
    /// dock poll interval.
    pub fn start_hop(&mut self, path: &RailPath, config: &GameConfig) -> bool {
        if self.is_in_flight() {
            return false;
        }

        if path.is_empty() {
            self.x = DOCK_X;
            self.y = DOCK_Y;
            self.phase = TrainPhase::Idle {
                wait_ms: config.dock_poll_ms,
            };
            return false;
        }

        let len = path.len();
        self.path_index %= len;
        let target = (self.path_index + 1) % len;
        let Some(wp) = path.get(target) else {
            return false;
        };

        let dx = wp.x - self.x;
        let dy = wp.y - self.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let travel_ms = (distance / config.train_speed_px_per_s * 1000.0) as u32;
        let duration_ms = travel_ms.max(config.min_hop_ms).max(1);

        let to_heading = if distance > f32::EPSILON {
            dy.atan2(dx) + HEADING_OFFSET
        } else {
            self.heading
        };

        log::trace!(
            "train hop {} -> {} ({:.1}px, {}ms)",
            self.path_index,
            target,
            distance,
            duration_ms
        );

        self.phase = TrainPhase::InFlight(Hop {
            from: (self.x, self.y),
            to: (wp.x, wp.y),
            from_heading: self.heading,
            turn: shortest_turn(self.heading, to_heading),
            target,
            elapsed_ms: 0,
            duration_ms,
        });
        true
    }

    /// Advance the navigator by `elapsed_ms`, queueing a `TrainArrived` event
    /// for every completed hop.
    pub fn advance(
        &mut self,
        elapsed_ms: u32,
        path: &RailPath,
        config: &GameConfig,
        events: &mut Vec<CoreEvent>,
    ) {
        let mut budget = elapsed_ms;
        loop {
            match self.phase {
                TrainPhase::Idle { wait_ms } => {
                    if wait_ms > budget {
                        self.phase = TrainPhase::Idle {
                            wait_ms: wait_ms - budget,
                        };
                        return;
                    }
                    budget -= wait_ms;
                    if !self.start_hop(path, config) {
                        // Docked: the poll interval starts now.
                        if let TrainPhase::Idle { wait_ms } = &mut self.phase {
                            *wait_ms = wait_ms.saturating_sub(budget);
                        }
                        return;
                    }
                }
                TrainPhase::InFlight(mut hop) => {
                    let total = hop.elapsed_ms.saturating_add(budget);
                    if total < hop.duration_ms {
                        hop.elapsed_ms = total;
                        self.phase = TrainPhase::InFlight(hop);
                        self.interpolate(&hop);
                        return;
                    }
                    budget = total - hop.duration_ms;
                    self.finish_hop(&hop, config, events);
                }
            }
        }
    }

    fn interpolate(&mut self, hop: &Hop) {
        let e = ease_out_cubic(hop.progress());
        self.x = hop.from.0 + (hop.to.0 - hop.from.0) * e;
        self.y = hop.from.1 + (hop.to.1 - hop.from.1) * e;
        self.heading = hop.from_heading + hop.turn * e;
    }

    fn finish_hop(&mut self, hop: &Hop, config: &GameConfig, events: &mut Vec<CoreEvent>) {
        self.x = hop.to.0;
        self.y = hop.to.1;
        self.heading = normalize_angle(hop.from_heading + hop.turn);
        self.path_index = hop.target;

        let wait_ms = if hop.target == 0 {
            config.loop_pause_ms
        } else {
            config.hop_pause_ms
        };
        self.phase = TrainPhase::Idle { wait_ms };
        events.push(CoreEvent::TrainArrived {
            path_index: hop.target,
        });
    }
}

impl Default for TrainNavigator {
    fn default() -> Self {
        Self::new()
    }
}

/// Angle of a waypoint direction tag, in screen radians.
pub fn direction_heading(direction: Direction) -> f32 {
    direction.angle()
}

/// Cubic ease-out: fast start, gentle arrival.
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Wrap an angle into (-PI, PI].
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Signed rotation from `from` to `to` along the shorter way round.
pub fn shortest_turn(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}
