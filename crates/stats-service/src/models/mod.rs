//! Data models.
//!
//! Database row types, display helpers (player names, season labels,
//! compound figures), and API request/response types with validation.

pub mod figures;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use figures::{BowlingFigures, HighScore, Overs, BALLS_PER_OVER, MAX_WICKETS};

/// Maximum length of player name fields.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a grade name.
pub const MAX_GRADE_NAME_LENGTH: usize = 50;

// ============================================================================
// Database rows
// ============================================================================

/// Player database row.
#[derive(Debug, Clone)]
pub struct PlayerRow {
    pub player_id: i64,
    pub first_name: String,
    pub nickname: String,
    pub middle_names: String,
    pub last_name: String,
    /// Optional unique squad number.
    pub squad_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerRow {
    /// Initials-and-surname form, e.g. "JH Smith".
    ///
    /// Falls back to "Mr." when no first or middle names are recorded.
    pub fn short_name(&self) -> String {
        let initials: String = [&self.first_name, &self.middle_names]
            .iter()
            .flat_map(|names| names.split_whitespace())
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect();

        if initials.is_empty() {
            format!("Mr. {}", self.last_name)
        } else {
            format!("{} {}", initials, self.last_name)
        }
    }

    /// Full name including nickname, e.g. "John (Smudge) Smith".
    pub fn long_name(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if self.first_name.is_empty() {
            parts.push("Mr.".to_string());
        } else {
            parts.push(self.first_name.clone());
        }
        if !self.middle_names.is_empty() {
            parts.push(self.middle_names.clone());
        }
        if !self.nickname.is_empty() {
            parts.push(format!("({})", self.nickname));
        }
        parts.push(self.last_name.clone());

        parts.join(" ")
    }
}

/// Season database row.
#[derive(Debug, Clone)]
pub struct SeasonRow {
    pub season_id: i64,
    /// Starting year of the season.
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeasonRow {
    /// Season label in "YYYY/YY" form, e.g. "2004/05".
    pub fn label(&self) -> String {
        season_label(self.year)
    }
}

/// Season label in "YYYY/YY" form for a starting year.
pub fn season_label(year: i32) -> String {
    format!("{}/{:02}", year, (year + 1) % 100)
}

/// Grade database row.
#[derive(Debug, Clone)]
pub struct GradeRow {
    pub grade_id: i64,
    pub name: String,
    /// Only senior grades count toward published reports.
    pub is_senior: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Statistic database row: one per (player, season, grade).
#[derive(Debug, Clone)]
pub struct StatisticRow {
    pub statistic_id: i64,
    pub player_id: i64,
    pub season_id: i64,
    pub grade_id: i64,

    pub matches: i32,

    pub batting_innings: i32,
    pub batting_runs: i32,
    pub batting_not_outs: i32,
    pub batting_fifties: i32,
    pub batting_ducks: i32,
    pub batting_fours: i32,
    pub batting_sixes: i32,
    pub batting_high_score_runs: i32,
    pub batting_high_score_not_out: bool,

    pub bowling_balls: i32,
    pub bowling_runs: i32,
    pub bowling_wickets: i32,
    pub bowling_maidens: i32,
    pub best_bowling_wickets: i32,
    pub best_bowling_runs: i32,

    pub fielding_catches: i32,
    pub keeping_catches: i32,
    pub fielding_run_outs: i32,
    pub fielding_throw_outs: i32,
    pub keeping_stumpings: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StatisticRow {
    /// High score in display form, e.g. "143*".
    pub fn high_score(&self) -> String {
        HighScore {
            runs: self.batting_high_score_runs,
            not_out: self.batting_high_score_not_out,
        }
        .to_string()
    }

    /// Best bowling figures in display form, e.g. "4/77".
    pub fn best_bowling(&self) -> String {
        BowlingFigures {
            wickets: self.best_bowling_wickets,
            runs: self.best_bowling_runs,
        }
        .to_string()
    }

    /// Overs bowled in display form, e.g. "47.3".
    pub fn overs(&self) -> String {
        Overs::from_balls(self.bowling_balls).to_string()
    }
}

/// Hundred database row (a single score of 100 or more).
#[derive(Debug, Clone)]
pub struct HundredRow {
    pub hundred_id: i64,
    pub statistic_id: i64,
    pub runs: i32,
    pub is_not_out: bool,
    pub is_in_final: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HundredRow {
    /// Score string with not-out (`*`) and final (`#`) markers, e.g. "143*#".
    pub fn score(&self) -> String {
        let not_out = if self.is_not_out { "*" } else { "" };
        let in_final = if self.is_in_final { "#" } else { "" };
        format!("{}{}{}", self.runs, not_out, in_final)
    }
}

/// Five-wicket-innings database row.
#[derive(Debug, Clone)]
pub struct FiveWicketInningRow {
    pub five_wicket_inning_id: i64,
    pub statistic_id: i64,
    pub wickets: i32,
    pub runs: i32,
    pub is_in_final: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FiveWicketInningRow {
    /// Figures string with the final (`#`) marker, e.g. "6/21#".
    pub fn figures(&self) -> String {
        let in_final = if self.is_in_final { "#" } else { "" };
        format!("{}/{}{}", self.wickets, self.runs, in_final)
    }
}

// ============================================================================
// Player API models
// ============================================================================

/// Request to create a player.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePlayerRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub middle_names: String,
    pub last_name: String,
    pub squad_number: Option<i32>,
}

impl CreatePlayerRequest {
    /// Validate the request fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.last_name.trim().is_empty() {
            return Err("Last name is required".to_string());
        }

        for (field, value) in [
            ("first_name", &self.first_name),
            ("nickname", &self.nickname),
            ("middle_names", &self.middle_names),
            ("last_name", &self.last_name),
        ] {
            if value.len() > MAX_NAME_LENGTH {
                return Err(format!("{} must be at most {} characters", field, MAX_NAME_LENGTH));
            }
        }

        if let Some(number) = self.squad_number {
            if number <= 0 {
                return Err("Squad number must be positive".to_string());
            }
        }

        Ok(())
    }
}

/// Request to update a player. Only provided fields are changed.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePlayerRequest {
    pub first_name: Option<String>,
    pub nickname: Option<String>,
    pub middle_names: Option<String>,
    pub last_name: Option<String>,
    /// `Some(None)` clears the squad number.
    #[serde(default, with = "double_option")]
    pub squad_number: Option<Option<i32>>,
}

/// Serde helper distinguishing an absent field from an explicit null.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(de: D) -> Result<Option<Option<i32>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<i32>::deserialize(de).map(Some)
    }
}

impl UpdatePlayerRequest {
    /// Check whether the request changes anything.
    pub fn has_changes(&self) -> bool {
        self.first_name.is_some()
            || self.nickname.is_some()
            || self.middle_names.is_some()
            || self.last_name.is_some()
            || self.squad_number.is_some()
    }

    /// Validate the request fields.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(last_name) = &self.last_name {
            if last_name.trim().is_empty() {
                return Err("Last name must not be empty".to_string());
            }
        }

        if let Some(Some(number)) = self.squad_number {
            if number <= 0 {
                return Err("Squad number must be positive".to_string());
            }
        }

        Ok(())
    }
}

/// Player as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResponse {
    pub player_id: i64,
    pub first_name: String,
    pub nickname: String,
    pub middle_names: String,
    pub last_name: String,
    pub squad_number: Option<i32>,
    /// Initials-and-surname form, e.g. "JH Smith".
    pub short_name: String,
    /// Full name including nickname.
    pub long_name: String,
}

impl From<PlayerRow> for PlayerResponse {
    fn from(row: PlayerRow) -> Self {
        let short_name = row.short_name();
        let long_name = row.long_name();
        Self {
            player_id: row.player_id,
            first_name: row.first_name,
            nickname: row.nickname,
            middle_names: row.middle_names,
            last_name: row.last_name,
            squad_number: row.squad_number,
            short_name,
            long_name,
        }
    }
}

// ============================================================================
// Season and grade API models
// ============================================================================

/// Request to create a season.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateSeasonRequest {
    /// Starting year, e.g. 2004 for the 2004/05 season.
    pub year: i32,
}

impl CreateSeasonRequest {
    /// Validate the request fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.year <= 1800 {
            return Err("Year must be after 1800".to_string());
        }
        Ok(())
    }
}

/// Season as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonResponse {
    pub season_id: i64,
    pub year: i32,
    /// "YYYY/YY" display label.
    pub label: String,
}

impl From<SeasonRow> for SeasonResponse {
    fn from(row: SeasonRow) -> Self {
        let label = row.label();
        Self {
            season_id: row.season_id,
            year: row.year,
            label,
        }
    }
}

/// Request to create a grade.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateGradeRequest {
    pub name: String,
    /// Defaults to true; only senior grades feed reports.
    pub is_senior: Option<bool>,
}

impl CreateGradeRequest {
    /// Validate the request fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Grade name is required".to_string());
        }
        if self.name.len() > MAX_GRADE_NAME_LENGTH {
            return Err(format!(
                "Grade name must be at most {} characters",
                MAX_GRADE_NAME_LENGTH
            ));
        }
        Ok(())
    }
}

/// Grade as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct GradeResponse {
    pub grade_id: i64,
    pub name: String,
    pub is_senior: bool,
}

impl From<GradeRow> for GradeResponse {
    fn from(row: GradeRow) -> Self {
        Self {
            grade_id: row.grade_id,
            name: row.name,
            is_senior: row.is_senior,
        }
    }
}

// ============================================================================
// Statistic API models
// ============================================================================

/// Statistic create/replace payload.
///
/// Compound figures arrive in display form and are parsed into the stored
/// columns: `high_score` ("143*"), `overs` ("47.3"), `best_bowling` ("4/77").
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatisticPayload {
    pub player_id: i64,
    pub season_id: i64,
    pub grade_id: i64,

    #[serde(default)]
    pub matches: i32,

    #[serde(default)]
    pub batting_innings: i32,
    #[serde(default)]
    pub batting_runs: i32,
    #[serde(default)]
    pub batting_not_outs: i32,
    #[serde(default)]
    pub batting_fifties: i32,
    #[serde(default)]
    pub batting_ducks: i32,
    #[serde(default)]
    pub batting_fours: i32,
    #[serde(default)]
    pub batting_sixes: i32,
    /// High score in display form, e.g. "143*".
    pub high_score: Option<String>,

    /// Overs bowled in display form, e.g. "47.3".
    pub overs: Option<String>,
    #[serde(default)]
    pub bowling_runs: i32,
    #[serde(default)]
    pub bowling_wickets: i32,
    #[serde(default)]
    pub bowling_maidens: i32,
    /// Best bowling figures in display form, e.g. "4/77".
    pub best_bowling: Option<String>,

    #[serde(default)]
    pub fielding_catches: i32,
    #[serde(default)]
    pub keeping_catches: i32,
    #[serde(default)]
    pub fielding_run_outs: i32,
    #[serde(default)]
    pub fielding_throw_outs: i32,
    #[serde(default)]
    pub keeping_stumpings: i32,
}

/// Parsed statistic columns ready for the database.
#[derive(Debug, Clone, Copy)]
pub struct StatisticColumns {
    pub matches: i32,

    pub batting_innings: i32,
    pub batting_runs: i32,
    pub batting_not_outs: i32,
    pub batting_fifties: i32,
    pub batting_ducks: i32,
    pub batting_fours: i32,
    pub batting_sixes: i32,
    pub batting_high_score_runs: i32,
    pub batting_high_score_not_out: bool,

    pub bowling_balls: i32,
    pub bowling_runs: i32,
    pub bowling_wickets: i32,
    pub bowling_maidens: i32,
    pub best_bowling_wickets: i32,
    pub best_bowling_runs: i32,

    pub fielding_catches: i32,
    pub keeping_catches: i32,
    pub fielding_run_outs: i32,
    pub fielding_throw_outs: i32,
    pub keeping_stumpings: i32,
}

impl StatisticPayload {
    /// Validate counting fields and parse the compound figures.
    pub fn columns(&self) -> Result<StatisticColumns, String> {
        for (field, value) in [
            ("matches", self.matches),
            ("batting_innings", self.batting_innings),
            ("batting_runs", self.batting_runs),
            ("batting_not_outs", self.batting_not_outs),
            ("batting_fifties", self.batting_fifties),
            ("batting_ducks", self.batting_ducks),
            ("batting_fours", self.batting_fours),
            ("batting_sixes", self.batting_sixes),
            ("bowling_runs", self.bowling_runs),
            ("bowling_wickets", self.bowling_wickets),
            ("bowling_maidens", self.bowling_maidens),
            ("fielding_catches", self.fielding_catches),
            ("keeping_catches", self.keeping_catches),
            ("fielding_run_outs", self.fielding_run_outs),
            ("fielding_throw_outs", self.fielding_throw_outs),
            ("keeping_stumpings", self.keeping_stumpings),
        ] {
            if value < 0 {
                return Err(format!("{} must be non-negative", field));
            }
        }

        if self.batting_not_outs > self.batting_innings {
            return Err("batting_not_outs must not exceed batting_innings".to_string());
        }

        if i64::from(self.bowling_wickets) > i64::from(self.matches) * i64::from(MAX_WICKETS) {
            return Err("bowling_wickets is implausible for the match count".to_string());
        }

        let high_score: HighScore = self
            .high_score
            .as_deref()
            .unwrap_or("0")
            .parse()
            .map_err(|e: figures::FigureError| e.to_string())?;

        let overs: Overs = self
            .overs
            .as_deref()
            .unwrap_or("0.0")
            .parse()
            .map_err(|e: figures::FigureError| e.to_string())?;

        let best_bowling: BowlingFigures = self
            .best_bowling
            .as_deref()
            .unwrap_or("0/0")
            .parse()
            .map_err(|e: figures::FigureError| e.to_string())?;

        Ok(StatisticColumns {
            matches: self.matches,
            batting_innings: self.batting_innings,
            batting_runs: self.batting_runs,
            batting_not_outs: self.batting_not_outs,
            batting_fifties: self.batting_fifties,
            batting_ducks: self.batting_ducks,
            batting_fours: self.batting_fours,
            batting_sixes: self.batting_sixes,
            batting_high_score_runs: high_score.runs,
            batting_high_score_not_out: high_score.not_out,
            bowling_balls: overs.total_balls(),
            bowling_runs: self.bowling_runs,
            bowling_wickets: self.bowling_wickets,
            bowling_maidens: self.bowling_maidens,
            best_bowling_wickets: best_bowling.wickets,
            best_bowling_runs: best_bowling.runs,
            fielding_catches: self.fielding_catches,
            keeping_catches: self.keeping_catches,
            fielding_run_outs: self.fielding_run_outs,
            fielding_throw_outs: self.fielding_throw_outs,
            keeping_stumpings: self.keeping_stumpings,
        })
    }
}

/// Statistic as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticResponse {
    pub statistic_id: i64,
    pub player_id: i64,
    pub season_id: i64,
    pub grade_id: i64,

    pub matches: i32,

    pub batting_innings: i32,
    pub batting_runs: i32,
    pub batting_not_outs: i32,
    pub batting_fifties: i32,
    pub batting_ducks: i32,
    pub batting_fours: i32,
    pub batting_sixes: i32,
    /// High score in display form, e.g. "143*".
    pub high_score: String,

    /// Overs bowled in display form, e.g. "47.3".
    pub overs: String,
    pub bowling_runs: i32,
    pub bowling_wickets: i32,
    pub bowling_maidens: i32,
    /// Best bowling figures in display form, e.g. "4/77".
    pub best_bowling: String,

    pub fielding_catches: i32,
    pub keeping_catches: i32,
    pub fielding_run_outs: i32,
    pub fielding_throw_outs: i32,
    pub keeping_stumpings: i32,
}

impl From<StatisticRow> for StatisticResponse {
    fn from(row: StatisticRow) -> Self {
        Self {
            statistic_id: row.statistic_id,
            player_id: row.player_id,
            season_id: row.season_id,
            grade_id: row.grade_id,
            matches: row.matches,
            batting_innings: row.batting_innings,
            batting_runs: row.batting_runs,
            batting_not_outs: row.batting_not_outs,
            batting_fifties: row.batting_fifties,
            batting_ducks: row.batting_ducks,
            batting_fours: row.batting_fours,
            batting_sixes: row.batting_sixes,
            high_score: row.high_score(),
            overs: row.overs(),
            bowling_runs: row.bowling_runs,
            bowling_wickets: row.bowling_wickets,
            bowling_maidens: row.bowling_maidens,
            best_bowling: row.best_bowling(),
            fielding_catches: row.fielding_catches,
            keeping_catches: row.keeping_catches,
            fielding_run_outs: row.fielding_run_outs,
            fielding_throw_outs: row.fielding_throw_outs,
            keeping_stumpings: row.keeping_stumpings,
        }
    }
}

// ============================================================================
// Milestone API models
// ============================================================================

/// Request to record a hundred against a statistic row.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateHundredRequest {
    pub runs: i32,
    #[serde(default)]
    pub is_not_out: bool,
    #[serde(default)]
    pub is_in_final: bool,
}

impl CreateHundredRequest {
    /// Validate the request fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.runs < 100 {
            return Err("A hundred requires at least 100 runs".to_string());
        }
        Ok(())
    }
}

/// Hundred as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct HundredResponse {
    pub hundred_id: i64,
    pub statistic_id: i64,
    pub runs: i32,
    pub is_not_out: bool,
    pub is_in_final: bool,
    /// Score string with markers, e.g. "143*#".
    pub score: String,
}

impl From<HundredRow> for HundredResponse {
    fn from(row: HundredRow) -> Self {
        let score = row.score();
        Self {
            hundred_id: row.hundred_id,
            statistic_id: row.statistic_id,
            runs: row.runs,
            is_not_out: row.is_not_out,
            is_in_final: row.is_in_final,
            score,
        }
    }
}

/// Request to record a five-wicket innings against a statistic row.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateFiveWicketInningRequest {
    pub wickets: i32,
    #[serde(default)]
    pub runs: i32,
    #[serde(default)]
    pub is_in_final: bool,
}

impl CreateFiveWicketInningRequest {
    /// Validate the request fields.
    pub fn validate(&self) -> Result<(), String> {
        if self.wickets < 5 {
            return Err("A five-wicket innings requires at least 5 wickets".to_string());
        }
        if self.wickets > MAX_WICKETS {
            return Err("Wickets must not exceed 10".to_string());
        }
        if self.runs < 0 {
            return Err("runs must be non-negative".to_string());
        }
        Ok(())
    }
}

/// Five-wicket innings as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct FiveWicketInningResponse {
    pub five_wicket_inning_id: i64,
    pub statistic_id: i64,
    pub wickets: i32,
    pub runs: i32,
    pub is_in_final: bool,
    /// Figures string with the final marker, e.g. "6/21#".
    pub figures: String,
}

impl From<FiveWicketInningRow> for FiveWicketInningResponse {
    fn from(row: FiveWicketInningRow) -> Self {
        let figures = row.figures();
        Self {
            five_wicket_inning_id: row.five_wicket_inning_id,
            statistic_id: row.statistic_id,
            wickets: row.wickets,
            runs: row.runs,
            is_in_final: row.is_in_final,
            figures,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn player(first: &str, nick: &str, middle: &str, last: &str) -> PlayerRow {
        PlayerRow {
            player_id: 1,
            first_name: first.to_string(),
            nickname: nick.to_string(),
            middle_names: middle.to_string(),
            last_name: last.to_string(),
            squad_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_short_name_with_initials() {
        let row = player("John", "", "Henry William", "Smith");
        assert_eq!(row.short_name(), "JHW Smith");
    }

    #[test]
    fn test_short_name_without_names() {
        let row = player("", "", "", "Smith");
        assert_eq!(row.short_name(), "Mr. Smith");
    }

    #[test]
    fn test_long_name_with_nickname() {
        let row = player("John", "Smudge", "", "Smith");
        assert_eq!(row.long_name(), "John (Smudge) Smith");
    }

    #[test]
    fn test_long_name_without_first_name() {
        let row = player("", "", "", "Smith");
        assert_eq!(row.long_name(), "Mr. Smith");
    }

    #[test]
    fn test_season_label() {
        assert_eq!(season_label(2004), "2004/05");
        assert_eq!(season_label(1999), "1999/00");
        assert_eq!(season_label(2009), "2009/10");
    }

    #[test]
    fn test_hundred_score_markers() {
        let row = HundredRow {
            hundred_id: 1,
            statistic_id: 1,
            runs: 143,
            is_not_out: true,
            is_in_final: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(row.score(), "143*#");
    }

    #[test]
    fn test_five_wicket_inning_figures() {
        let row = FiveWicketInningRow {
            five_wicket_inning_id: 1,
            statistic_id: 1,
            wickets: 6,
            runs: 21,
            is_in_final: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(row.figures(), "6/21");
    }

    #[test]
    fn test_create_player_request_requires_last_name() {
        let request = CreatePlayerRequest {
            first_name: "John".to_string(),
            nickname: String::new(),
            middle_names: String::new(),
            last_name: "   ".to_string(),
            squad_number: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_player_request_rejects_bad_squad_number() {
        let request = CreatePlayerRequest {
            first_name: String::new(),
            nickname: String::new(),
            middle_names: String::new(),
            last_name: "Smith".to_string(),
            squad_number: Some(0),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_player_request_has_changes() {
        let json = r#"{"nickname":"Smudge"}"#;
        let request: UpdatePlayerRequest = serde_json::from_str(json).unwrap();
        assert!(request.has_changes());

        let json = r#"{}"#;
        let request: UpdatePlayerRequest = serde_json::from_str(json).unwrap();
        assert!(!request.has_changes());
    }

    #[test]
    fn test_update_player_request_explicit_null_clears_squad_number() {
        let json = r#"{"squad_number":null}"#;
        let request: UpdatePlayerRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.squad_number, Some(None));
        assert!(request.has_changes());
    }

    #[test]
    fn test_create_season_request_rejects_ancient_year() {
        let request = CreateSeasonRequest { year: 1750 };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_grade_request_requires_name() {
        let request = CreateGradeRequest {
            name: "  ".to_string(),
            is_senior: None,
        };
        assert!(request.validate().is_err());
    }

    fn minimal_payload() -> StatisticPayload {
        serde_json::from_str(r#"{"player_id":1,"season_id":1,"grade_id":1}"#).unwrap()
    }

    #[test]
    fn test_statistic_payload_defaults() {
        let payload = minimal_payload();
        let columns = payload.columns().unwrap();

        assert_eq!(columns.matches, 0);
        assert_eq!(columns.batting_high_score_runs, 0);
        assert!(!columns.batting_high_score_not_out);
        assert_eq!(columns.bowling_balls, 0);
        assert_eq!(columns.best_bowling_wickets, 0);
    }

    #[test]
    fn test_statistic_payload_parses_compound_figures() {
        let mut payload = minimal_payload();
        payload.matches = 10;
        payload.batting_innings = 9;
        payload.high_score = Some("143*".to_string());
        payload.overs = Some("47.3".to_string());
        payload.best_bowling = Some("4/77".to_string());
        payload.bowling_wickets = 12;

        let columns = payload.columns().unwrap();
        assert_eq!(columns.batting_high_score_runs, 143);
        assert!(columns.batting_high_score_not_out);
        assert_eq!(columns.bowling_balls, 285);
        assert_eq!(columns.best_bowling_wickets, 4);
        assert_eq!(columns.best_bowling_runs, 77);
    }

    #[test]
    fn test_statistic_payload_rejects_negative_counts() {
        let mut payload = minimal_payload();
        payload.batting_runs = -1;
        assert!(payload.columns().is_err());
    }

    #[test]
    fn test_statistic_payload_rejects_not_outs_exceeding_innings() {
        let mut payload = minimal_payload();
        payload.batting_innings = 3;
        payload.batting_not_outs = 4;
        assert!(payload.columns().is_err());
    }

    #[test]
    fn test_statistic_payload_rejects_implausible_wickets() {
        let mut payload = minimal_payload();
        payload.matches = 2;
        payload.bowling_wickets = 21;
        assert!(payload.columns().is_err());
    }

    #[test]
    fn test_statistic_payload_wicket_check_survives_huge_match_counts() {
        let mut payload = minimal_payload();
        payload.matches = i32::MAX;
        payload.bowling_wickets = 5;
        assert!(payload.columns().is_ok());
    }

    #[test]
    fn test_statistic_payload_rejects_bad_figures() {
        let mut payload = minimal_payload();
        payload.best_bowling = Some("11/45".to_string());
        assert!(payload.columns().is_err());
    }

    #[test]
    fn test_create_hundred_request_rejects_under_100() {
        let request = CreateHundredRequest {
            runs: 99,
            is_not_out: false,
            is_in_final: false,
        };
        assert!(request.validate().is_err());

        let request = CreateHundredRequest {
            runs: 100,
            is_not_out: false,
            is_in_final: false,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_five_wicket_inning_request_bounds() {
        let request = CreateFiveWicketInningRequest {
            wickets: 4,
            runs: 30,
            is_in_final: false,
        };
        assert!(request.validate().is_err());

        let request = CreateFiveWicketInningRequest {
            wickets: 11,
            runs: 30,
            is_in_final: false,
        };
        assert!(request.validate().is_err());

        let request = CreateFiveWicketInningRequest {
            wickets: 7,
            runs: 30,
            is_in_final: true,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_statistic_response_from_row() {
        let row = StatisticRow {
            statistic_id: 5,
            player_id: 1,
            season_id: 2,
            grade_id: 3,
            matches: 10,
            batting_innings: 9,
            batting_runs: 400,
            batting_not_outs: 2,
            batting_fifties: 3,
            batting_ducks: 1,
            batting_fours: 40,
            batting_sixes: 5,
            batting_high_score_runs: 143,
            batting_high_score_not_out: true,
            bowling_balls: 285,
            bowling_runs: 310,
            bowling_wickets: 12,
            bowling_maidens: 8,
            best_bowling_wickets: 4,
            best_bowling_runs: 77,
            fielding_catches: 6,
            keeping_catches: 0,
            fielding_run_outs: 1,
            fielding_throw_outs: 1,
            keeping_stumpings: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = StatisticResponse::from(row);
        assert_eq!(response.high_score, "143*");
        assert_eq!(response.overs, "47.3");
        assert_eq!(response.best_bowling, "4/77");
    }
}
