//! ESPN scoreboard wire handling.
//!
//! The scoreboard body is kept as raw `serde_json::Value` and individual
//! fields are plucked through JSON Pointer lookups. The upstream schema is
//! irregular and partially optional, so a missing or wrong-typed sub-field
//! must degrade to `None` for that field alone instead of failing the whole
//! document; typed serde structs would reject the entire response over one
//! drifted field.

use serde_json::Value;

/// A scoreboard document with the expected top-level shape
/// (`{"events": [...], "week": {"teamsOnBye": [...]}}`).
#[derive(Debug, Clone)]
pub struct Scoreboard(Value);

impl Scoreboard {
    /// Accept a parsed body only when it carries an `events` array.
    /// Anything else is the "no data" case, not an error.
    pub fn from_value(value: Value) -> Option<Self> {
        if value.get("events").is_some_and(Value::is_array) {
            Some(Scoreboard(value))
        } else {
            None
        }
    }

    pub fn events(&self) -> &[Value] {
        self.0
            .get("events")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find the event whose short name ("NYG @ TEN") mentions the team.
    pub fn find_event(&self, team_abbr: &str) -> Option<Event<'_>> {
        self.events()
            .iter()
            .find(|e| str_at(e, "/shortName").is_some_and(|s| s.contains(team_abbr)))
            .map(Event)
    }

    /// Look the team up in `week.teamsOnBye`. Abbreviations are matched
    /// case-insensitively; the bye list has drifted case in the past.
    pub fn find_bye(&self, team_abbr: &str) -> Option<ByeTeam<'_>> {
        self.0
            .pointer("/week/teamsOnBye")?
            .as_array()?
            .iter()
            .find(|t| {
                str_at(t, "/abbreviation").is_some_and(|a| a.eq_ignore_ascii_case(team_abbr))
            })
            .map(ByeTeam)
    }
}

/// One event (game) from the scoreboard `events` array.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a>(&'a Value);

impl<'a> Event<'a> {
    pub fn str_at(&self, ptr: &str) -> Option<&'a str> {
        str_at(self.0, ptr)
    }

    pub fn string_at(&self, ptr: &str) -> Option<String> {
        self.str_at(ptr).map(str::to_owned)
    }

    pub fn u64_at(&self, ptr: &str) -> Option<u64> {
        self.0.pointer(ptr).and_then(Value::as_u64)
    }

    pub fn i64_at(&self, ptr: &str) -> Option<i64> {
        self.0.pointer(ptr).and_then(Value::as_i64)
    }

    pub fn f64_at(&self, ptr: &str) -> Option<f64> {
        self.0.pointer(ptr).and_then(Value::as_f64)
    }

    pub fn bool_at(&self, ptr: &str) -> Option<bool> {
        self.0.pointer(ptr).and_then(Value::as_bool)
    }

    /// Scores arrive as string-encoded integers ("24"); tolerate bare
    /// numbers as well.
    pub fn score_at(&self, ptr: &str) -> Option<u16> {
        match self.0.pointer(ptr)? {
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_u64().and_then(|x| u16::try_from(x).ok()),
            _ => None,
        }
    }
}

/// One entry from `week.teamsOnBye`.
#[derive(Debug, Clone, Copy)]
pub struct ByeTeam<'a>(&'a Value);

impl ByeTeam<'_> {
    pub fn abbreviation(&self) -> Option<String> {
        str_at(self.0, "/abbreviation").map(str::to_owned)
    }

    pub fn short_display_name(&self) -> Option<String> {
        str_at(self.0, "/shortDisplayName").map(str::to_owned)
    }

    pub fn logo(&self) -> Option<String> {
        str_at(self.0, "/logo").map(str::to_owned)
    }
}

fn str_at<'a>(v: &'a Value, ptr: &str) -> Option<&'a str> {
    v.pointer(ptr).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_requires_events_array() {
        assert!(Scoreboard::from_value(json!({"events": []})).is_some());
        assert!(Scoreboard::from_value(json!({"events": {"not": "a list"}})).is_none());
        assert!(Scoreboard::from_value(json!({"leagues": []})).is_none());
        assert!(Scoreboard::from_value(json!("plain string")).is_none());
    }

    #[test]
    fn find_event_matches_short_name_substring() {
        let sb = Scoreboard::from_value(json!({
            "events": [
                {"shortName": "KC @ DET"},
                {"shortName": "NYG @ TEN"},
            ]
        }))
        .unwrap();

        let event = sb.find_event("TEN").expect("event should match");
        assert_eq!(event.str_at("/shortName"), Some("NYG @ TEN"));
        assert!(sb.find_event("SEA").is_none());
    }

    #[test]
    fn find_bye_is_case_insensitive() {
        let sb = Scoreboard::from_value(json!({
            "events": [],
            "week": {"teamsOnBye": [
                {"abbreviation": "min", "shortDisplayName": "Vikings"}
            ]}
        }))
        .unwrap();

        let bye = sb.find_bye("MIN").expect("bye should match");
        assert_eq!(bye.abbreviation().as_deref(), Some("min"));
        assert_eq!(bye.short_display_name().as_deref(), Some("Vikings"));
        assert_eq!(bye.logo(), None);
        assert!(sb.find_bye("GB").is_none());
    }

    #[test]
    fn find_bye_tolerates_missing_week_block() {
        let sb = Scoreboard::from_value(json!({"events": []})).unwrap();
        assert!(sb.find_bye("MIN").is_none());
    }

    #[test]
    fn plucks_degrade_to_none_on_wrong_types() {
        let doc = json!({"events": [{
            "shortName": "NYG @ TEN",
            "date": 42,
            "competitions": [{"attendance": "lots"}],
        }]});
        let sb = Scoreboard::from_value(doc).unwrap();
        let event = sb.find_event("NYG").unwrap();

        assert_eq!(event.str_at("/date"), None);
        assert_eq!(event.u64_at("/competitions/0/attendance"), None);
        assert_eq!(event.bool_at("/shortName"), None);
        assert_eq!(event.f64_at("/missing/entirely"), None);
    }

    #[test]
    fn score_at_accepts_strings_and_numbers() {
        let doc = json!({"events": [{
            "shortName": "NYG @ TEN",
            "competitions": [{"competitors": [
                {"score": "24"},
                {"score": 17},
                {"score": "not a score"},
            ]}],
        }]});
        let sb = Scoreboard::from_value(doc).unwrap();
        let event = sb.find_event("NYG").unwrap();

        assert_eq!(event.score_at("/competitions/0/competitors/0/score"), Some(24));
        assert_eq!(event.score_at("/competitions/0/competitors/1/score"), Some(17));
        assert_eq!(event.score_at("/competitions/0/competitors/2/score"), None);
    }
}
