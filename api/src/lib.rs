pub mod client;
pub mod espn;
pub mod normalize;

use serde::Serialize;
use std::fmt;

pub use normalize::normalize;

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// Coarse game state for the configured team.
///
/// `Pre`/`In`/`Post` come straight from the upstream event status; `Bye` and
/// `NotFound` are derived when the team has no event this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Pre,
    In,
    Post,
    Bye,
    NotFound,
}

impl GameState {
    /// Parse the upstream `status.type.state` value ("pre" | "in" | "post").
    /// Anything else is treated the same as an absent state.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pre" => Some(GameState::Pre),
            "in" => Some(GameState::In),
            "post" => Some(GameState::Post),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Pre => "PRE",
            GameState::In => "IN",
            GameState::Post => "POST",
            GameState::Bye => "BYE",
            GameState::NotFound => "NOT_FOUND",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, GameState::In)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One poll cycle's worth of normalized game state for the configured team.
///
/// The record is flat and fixed-shape: every field is always present, each
/// defaults to `None` when the upstream feed doesn't carry it, and the whole
/// record is replaced wholesale on every cycle rather than patched in place.
/// Competitor index 0 maps to the `home_` side, index 1 to `away_`, per
/// upstream convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameRecord {
    // State & schedule
    pub state: Option<GameState>,
    pub detailed_state: Option<String>,
    pub game_status: Option<String>,
    pub date: Option<String>,
    pub kickoff_in: Option<String>,
    // Reserved upstream of a game-length calculation that never shipped.
    pub game_end_time: Option<String>,
    pub game_length: Option<String>,
    pub week_number: Option<u16>,
    pub attendance: Option<u32>,
    pub event_name: Option<String>,
    pub event_short_name: Option<String>,
    pub event_type: Option<String>,
    pub game_notes: Option<String>,
    pub series_summary: Option<String>,

    // Venue & broadcast context
    pub venue_name: Option<String>,
    pub venue_city: Option<String>,
    pub venue_state: Option<String>,
    pub venue_capacity: Option<u32>,
    pub venue_indoor: Option<bool>,
    pub tv_network: Option<String>,
    pub odds: Option<String>,
    pub overunder: Option<f64>,
    pub home_team_odds_win_pct: Option<f64>,
    pub away_team_odds_win_pct: Option<f64>,
    pub headlines: Option<String>,
    pub weather_conditions: Option<String>,
    pub weather_temp: Option<i32>,

    // Home side (competitor 0)
    pub home_team_abbr: Option<String>,
    pub home_team_id: Option<String>,
    pub home_team_city: Option<String>,
    pub home_team_name: Option<String>,
    pub home_team_logo: Option<String>,
    pub home_team_score: Option<u16>,
    pub home_team_colors: Option<[String; 2]>,
    pub home_team_ls_1: Option<f64>,
    pub home_team_ls_2: Option<f64>,
    pub home_team_ls_3: Option<f64>,
    pub home_team_ls_4: Option<f64>,
    pub home_team_record: Option<String>,

    // Away side (competitor 1)
    pub away_team_abbr: Option<String>,
    pub away_team_id: Option<String>,
    pub away_team_city: Option<String>,
    pub away_team_name: Option<String>,
    pub away_team_logo: Option<String>,
    pub away_team_score: Option<u16>,
    pub away_team_colors: Option<[String; 2]>,
    pub away_team_ls_1: Option<f64>,
    pub away_team_ls_2: Option<f64>,
    pub away_team_ls_3: Option<f64>,
    pub away_team_ls_4: Option<f64>,
    pub away_team_record: Option<String>,

    // In-game situation (null unless state is IN; timeouts assume a full
    // allotment of 3 outside live play)
    pub quarter: Option<u8>,
    pub clock: Option<String>,
    pub last_play: Option<String>,
    pub down_distance_text: Option<String>,
    pub possession: Option<String>,
    pub home_team_timeouts: Option<u8>,
    pub away_team_timeouts: Option<u8>,
    pub home_team_win_probability: Option<f64>,
    pub away_team_win_probability: Option<f64>,

    // Published-but-never-populated attributes carried for schema
    // compatibility with the host's attribute set. The scoreboard feed does
    // not carry leader or drive data; the summary endpoint that does is not
    // polled here.
    pub home_team_passing_leader_name: Option<String>,
    pub home_team_passing_leader_stats: Option<String>,
    pub home_team_rushing_leader_name: Option<String>,
    pub home_team_rushing_leader_stats: Option<String>,
    pub home_team_receiving_leader_name: Option<String>,
    pub home_team_receiving_leader_stats: Option<String>,
    pub away_team_passing_leader_name: Option<String>,
    pub away_team_passing_leader_stats: Option<String>,
    pub away_team_rushing_leader_name: Option<String>,
    pub away_team_rushing_leader_stats: Option<String>,
    pub away_team_receiving_leader_name: Option<String>,
    pub away_team_receiving_leader_stats: Option<String>,
    pub post_game_passing_leader_name: Option<String>,
    pub post_game_passing_leader_stats: Option<String>,
    pub post_game_rushing_leader_name: Option<String>,
    pub post_game_rushing_leader_stats: Option<String>,
    pub post_game_receiving_leader_name: Option<String>,
    pub post_game_receiving_leader_stats: Option<String>,
    pub current_drive_summary: Option<String>,
    pub current_drive_start_position: Option<String>,
    pub current_drive_elapsed_time: Option<String>,
    pub down: Option<u8>,
    pub yard_line: Option<u16>,
    pub distance_to_go: Option<u8>,
    pub short_down_distance_text: Option<String>,
    pub in_red_zone: Option<bool>,

    // Identity & bookkeeping
    pub my_team_abbr: Option<String>,
    pub last_update: Option<String>,
    pub private_fast_refresh: bool,
}
