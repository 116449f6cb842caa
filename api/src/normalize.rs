//! Scoreboard-to-record normalization.
//!
//! Every field extraction is independent and best-effort: a missing key or a
//! wrong-typed value nulls that field alone and never aborts the rest of the
//! record. This is deliberate tolerance of upstream schema drift.

use crate::espn::{Event, Scoreboard};
use crate::{GameRecord, GameState};
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use log::debug;

/// Kickoff proximity (seconds) that switches polling to the fast interval.
const FAST_REFRESH_WINDOW_SECS: i64 = 1200;
/// Timeout allotment assumed outside live play.
const FULL_TIMEOUTS: u8 = 3;
/// W3C-style timestamp for `last_update`, local offset included.
const LAST_UPDATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// League-navy pair used when the home side carries no colors upstream.
const HOME_FALLBACK_COLORS: [&str; 2] = ["#013369", "#013369"];
/// League-red pair used when the away side carries no colors upstream.
const AWAY_FALLBACK_COLORS: [&str; 2] = ["#D50A0A", "#D50A0A"];

/// Build the full game record for `team_abbr` from a fetched scoreboard.
///
/// With no document, or no event mentioning the team, falls back to the
/// bye-week lookup and then to a not-found record. `now` is injected so the
/// fast-refresh window and `last_update` stamp are testable.
pub fn normalize(doc: Option<&Scoreboard>, team_abbr: &str, now: DateTime<Utc>) -> GameRecord {
    let Some(event) = doc.and_then(|d| d.find_event(team_abbr)) else {
        return off_week_record(doc, team_abbr, now);
    };

    let team_is_home =
        event.str_at("/competitions/0/competitors/0/team/abbreviation") == Some(team_abbr);
    debug!(
        "found event for {team_abbr} ({} side), parsing",
        if team_is_home { "home" } else { "away" }
    );

    let mut rec = GameRecord {
        my_team_abbr: Some(team_abbr.to_owned()),
        last_update: Some(stamp(now)),
        ..GameRecord::default()
    };

    rec.state = event.str_at("/status/type/state").and_then(GameState::from_wire);
    rec.detailed_state = event.string_at("/status/type/name");
    rec.game_status = event.string_at("/status/type/shortDetail");
    rec.date = event.string_at("/date");
    rec.attendance = to_u32(event.u64_at("/competitions/0/attendance"));
    rec.event_name = event.string_at("/name");
    rec.event_short_name = event.string_at("/shortName");
    rec.event_type = event.string_at("/competitions/0/type/abbreviation");
    rec.game_notes = event.string_at("/competitions/0/notes/0/headline");
    rec.series_summary = event.string_at("/competitions/0/series/summary");

    rec.venue_name = event.string_at("/competitions/0/venue/fullName");
    rec.venue_city = event.string_at("/competitions/0/venue/address/city");
    rec.venue_state = event.string_at("/competitions/0/venue/address/state");
    rec.venue_capacity = to_u32(event.u64_at("/competitions/0/venue/capacity"));
    rec.venue_indoor = event.bool_at("/competitions/0/venue/indoor");
    rec.tv_network = event.string_at("/competitions/0/broadcasts/0/names/0");
    rec.odds = event.string_at("/competitions/0/odds/0/details");
    rec.overunder = event.f64_at("/competitions/0/odds/0/overUnder");
    rec.home_team_odds_win_pct = event.f64_at("/competitions/0/odds/1/homeTeamOdds/winPercentage");
    rec.away_team_odds_win_pct = event.f64_at("/competitions/0/odds/1/awayTeamOdds/winPercentage");
    rec.headlines = event.string_at("/competitions/0/headlines/0/shortLinkText");
    rec.weather_conditions = event.string_at("/weather/displayValue");
    rec.weather_temp = event.i64_at("/weather/temperature").and_then(|n| i32::try_from(n).ok());

    let home = side_fields(&event, 0, HOME_FALLBACK_COLORS);
    rec.home_team_abbr = home.abbr;
    rec.home_team_id = home.id;
    rec.home_team_city = home.city;
    rec.home_team_name = home.name;
    rec.home_team_logo = home.logo;
    rec.home_team_score = home.score;
    rec.home_team_colors = Some(home.colors);
    [rec.home_team_ls_1, rec.home_team_ls_2, rec.home_team_ls_3, rec.home_team_ls_4] =
        home.linescores;
    rec.home_team_record = home.record;

    let away = side_fields(&event, 1, AWAY_FALLBACK_COLORS);
    rec.away_team_abbr = away.abbr;
    rec.away_team_id = away.id;
    rec.away_team_city = away.city;
    rec.away_team_name = away.name;
    rec.away_team_logo = away.logo;
    rec.away_team_score = away.score;
    rec.away_team_colors = Some(away.colors);
    [rec.away_team_ls_1, rec.away_team_ls_2, rec.away_team_ls_3, rec.away_team_ls_4] =
        away.linescores;
    rec.away_team_record = away.record;

    let kickoff = event.str_at("/date").and_then(parse_event_date);
    rec.kickoff_in = kickoff.map(|k| humanize_delta(k - now));

    if rec.state.is_some_and(|s| s.is_live()) {
        rec.quarter = event.u64_at("/status/period").and_then(|n| u8::try_from(n).ok());
        rec.clock = event.string_at("/status/displayClock");
        rec.last_play = event.string_at("/competitions/0/situation/lastPlay/text");
        rec.down_distance_text = event.string_at("/competitions/0/situation/downDistanceText");
        rec.possession = event.string_at("/competitions/0/situation/possession");
        rec.home_team_timeouts = to_u8(event.u64_at("/competitions/0/situation/homeTimeouts"));
        rec.away_team_timeouts = to_u8(event.u64_at("/competitions/0/situation/awayTimeouts"));
        rec.home_team_win_probability =
            event.f64_at("/competitions/0/situation/lastPlay/probability/homeWinPercentage");
        rec.away_team_win_probability =
            event.f64_at("/competitions/0/situation/lastPlay/probability/awayWinPercentage");
    } else {
        rec.home_team_timeouts = Some(FULL_TIMEOUTS);
        rec.away_team_timeouts = Some(FULL_TIMEOUTS);
    }

    rec.private_fast_refresh = match rec.state {
        Some(GameState::In) => true,
        Some(GameState::Pre) => {
            kickoff.is_some_and(|k| (k - now).num_seconds() < FAST_REFRESH_WINDOW_SECS)
        }
        _ => false,
    };
    if rec.private_fast_refresh {
        debug!("fast refresh active for {team_abbr}");
    }

    rec
}

/// Minimal record for a team with no event this week: a bye entry when the
/// week list has one, a not-found record otherwise.
fn off_week_record(doc: Option<&Scoreboard>, team_abbr: &str, now: DateTime<Utc>) -> GameRecord {
    let mut rec = GameRecord {
        my_team_abbr: Some(team_abbr.to_owned()),
        last_update: Some(stamp(now)),
        ..GameRecord::default()
    };

    match doc.and_then(|d| d.find_bye(team_abbr)) {
        Some(bye) => {
            debug!("no event for {team_abbr}, bye week confirmed");
            rec.state = Some(GameState::Bye);
            rec.home_team_abbr = bye.abbreviation();
            rec.home_team_name = bye.short_display_name();
            rec.home_team_logo = bye.logo();
        }
        None => {
            debug!("{team_abbr} not found in events or the bye list");
            rec.state = Some(GameState::NotFound);
        }
    }
    rec
}

struct SideFields {
    abbr: Option<String>,
    id: Option<String>,
    city: Option<String>,
    name: Option<String>,
    logo: Option<String>,
    score: Option<u16>,
    colors: [String; 2],
    linescores: [Option<f64>; 4],
    record: Option<String>,
}

fn side_fields(event: &Event<'_>, index: usize, fallback_colors: [&str; 2]) -> SideFields {
    let at = |suffix: &str| format!("/competitions/0/competitors/{index}/{suffix}");

    let colors = match (
        event.str_at(&at("team/color")),
        event.str_at(&at("team/alternateColor")),
    ) {
        (Some(color), Some(alt)) => [format!("#{color}"), format!("#{alt}")],
        _ => fallback_colors.map(str::to_owned),
    };

    SideFields {
        abbr: event.string_at(&at("team/abbreviation")),
        id: event.string_at(&at("team/id")),
        city: event.string_at(&at("team/location")),
        name: event.string_at(&at("team/name")),
        logo: event.string_at(&at("team/logo")),
        score: event.score_at(&at("score")),
        colors,
        linescores: [0, 1, 2, 3].map(|q| event.f64_at(&at(&format!("linescores/{q}/value")))),
        record: event.string_at(&at("records/0/summary")),
    }
}

fn to_u32(n: Option<u64>) -> Option<u32> {
    n.and_then(|n| u32::try_from(n).ok())
}

fn to_u8(n: Option<u64>) -> Option<u8> {
    n.and_then(|n| u8::try_from(n).ok())
}

fn stamp(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local).format(LAST_UPDATE_FORMAT).to_string()
}

/// Event dates usually carry minute precision ("2024-01-07T18:00Z");
/// accept full RFC 3339 as well.
fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|n| n.and_utc())
}

/// Approximate, human-facing rendering of the time to or since kickoff
/// ("in 2 hours", "a day ago", "just now").
fn humanize_delta(delta: chrono::Duration) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 3600;
    const DAY: i64 = 86_400;
    const WEEK: i64 = 7 * DAY;

    let secs = delta.num_seconds();
    let magnitude = secs.abs();
    if magnitude < 45 {
        return "just now".to_owned();
    }

    let phrase = if magnitude < 90 {
        "a minute".to_owned()
    } else if magnitude < 45 * MINUTE {
        format!("{} minutes", (magnitude + MINUTE / 2) / MINUTE)
    } else if magnitude < 90 * MINUTE {
        "an hour".to_owned()
    } else if magnitude < 22 * HOUR {
        format!("{} hours", (magnitude + HOUR / 2) / HOUR)
    } else if magnitude < 36 * HOUR {
        "a day".to_owned()
    } else if magnitude < 6 * DAY + DAY / 2 {
        format!("{} days", (magnitude + DAY / 2) / DAY)
    } else if magnitude < 11 * DAY {
        "a week".to_owned()
    } else {
        format!("{} weeks", (magnitude + WEEK / 2) / WEEK)
    };

    if secs >= 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}
