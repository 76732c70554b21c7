//! Plain data row types written by output backends.

/// One agent's kinematic state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRow {
    pub tick:      u64,
    /// Simulated seconds since tick 0.
    pub time_secs: f64,
    pub agent_id:  u32,
    pub x:         f32,
    pub y:         f32,
    pub vx:        f32,
    pub vy:        f32,
}

/// One route event (waypoint reached, sequence completed, crossing reached…).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub tick:       u64,
    pub agent_id:   u32,
    /// Stable label from `RouteEvent::as_str`.
    pub kind:       &'static str,
    /// Path/behaviour index or geometry id; `u32::MAX` when none.
    pub detail:     u32,
    /// Waypoint within the behaviour; `u32::MAX` when none.
    pub sub_detail: u32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub time_secs:  f64,
    pub active:     u64,
    pub retired:    u64,
    pub events:     u64,
    pub no_target:  u64,
    pub mean_speed: f32,
}
