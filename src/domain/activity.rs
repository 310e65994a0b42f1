use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Facile,
    Moyen,
    Difficile,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Facile => "Facile",
            Difficulty::Moyen => "Moyen",
            Difficulty::Difficile => "Difficile",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Facile" => Ok(Difficulty::Facile),
            "Moyen" => Ok(Difficulty::Moyen),
            "Difficile" => Ok(Difficulty::Difficile),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// One learning session of a child, as shown in the activity history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: i64,
    pub child_id: i64,
    #[serde(with = "activity_date")]
    pub date: NaiveDateTime,
    pub title: String,
    pub assistant: Option<String>,
    pub matiere: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub duration_minutes: Option<u32>,
    pub score: Option<u8>,
    pub comments: Option<String>,
}

impl ActivityRecord {
    pub fn new(id: i64, child_id: i64, date: NaiveDateTime, title: impl Into<String>) -> Self {
        Self {
            id,
            child_id,
            date,
            title: title.into(),
            assistant: None,
            matiere: None,
            difficulty: None,
            duration_minutes: None,
            score: None,
            comments: None,
        }
    }

    pub fn with_assistant(mut self, assistant: impl Into<String>) -> Self {
        self.assistant = Some(assistant.into());
        self
    }

    pub fn with_matiere(mut self, matiere: impl Into<String>) -> Self {
        self.matiere = Some(matiere.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = Some(score.min(100));
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

/// Parses `YYYY-MM-DD` (midnight) or `YYYY-MM-DDTHH:MM:SS[.fff]`.
pub fn parse_activity_date(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(chrono::NaiveTime::MIN)),
        Err(_) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"),
    }
}

mod activity_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_activity_date(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_date_only_is_midnight() {
        let parsed = parse_activity_date("2024-03-01").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn test_parse_date_time() {
        let parsed = parse_activity_date("2024-03-01T16:45:10").unwrap();
        assert_eq!(parsed.hour(), 16);
        assert_eq!(parsed.minute(), 45);
    }

    #[test]
    fn test_parse_invalid_date() {
        assert!(parse_activity_date("01/03/2024").is_err());
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Moyen".parse::<Difficulty>().unwrap(), Difficulty::Moyen);
        assert!("moyen".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_activity_deserialize_accepts_plain_date() {
        let json = r#"{
            "id": 1,
            "child_id": 7,
            "date": "2024-03-05",
            "title": "Fractions",
            "assistant": "J'Apprends",
            "matiere": null,
            "difficulty": "Difficile",
            "duration_minutes": 25,
            "score": 80,
            "comments": null
        }"#;

        let record: ActivityRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.date, parse_activity_date("2024-03-05").unwrap());
        assert_eq!(record.difficulty, Some(Difficulty::Difficile));
        assert_eq!(record.assistant.as_deref(), Some("J'Apprends"));
    }

    #[test]
    fn test_score_is_capped() {
        let record = ActivityRecord::new(1, 1, parse_activity_date("2024-03-05").unwrap(), "Quiz")
            .with_score(140);
        assert_eq!(record.score, Some(100));
    }
}
