use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{FieldError, UserSummary};
use crate::domains::matches::models::{Match, MatchStatus, MatchType, NewMatch};

pub const MAX_MESSAGE_LEN: usize = 1000;

/// Create request body. Fields stay raw so every problem can be reported per field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchInput {
    pub receiver_id: Option<String>,
    #[serde(rename = "type")]
    pub match_type: Option<String>,
    pub newcomer_id: Option<String>,
    pub message: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl CreateMatchInput {
    /// Structural validation. Runs before any database access.
    pub fn validate(&self, sender_id: Uuid) -> Result<NewMatch, Vec<FieldError>> {
        let mut errors = Vec::new();

        let receiver_id = match self.receiver_id.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new("receiverId", "receiverId is required"));
                None
            }
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FieldError::new("receiverId", "receiverId must be a valid id"));
                    None
                }
            },
        };

        let match_type = match self.match_type.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new("type", "type is required"));
                None
            }
            Some(raw) => match raw.parse::<MatchType>() {
                Ok(t) => Some(t),
                Err(_) => {
                    errors.push(FieldError::new(
                        "type",
                        "type must be one of NEWCOMER_MATCH, RELOCATION_SUPPORT, OFFICE_CONNECTION",
                    ));
                    None
                }
            },
        };

        let newcomer_id = match self.newcomer_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(FieldError::new("newcomerId", "newcomerId must be a valid id"));
                    None
                }
            },
        };

        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        if message
            .as_ref()
            .is_some_and(|m| m.chars().count() > MAX_MESSAGE_LEN)
        {
            errors.push(FieldError::new(
                "message",
                format!("message must be at most {} characters", MAX_MESSAGE_LEN),
            ));
        }

        let start_date = parse_date_field("startDate", self.start_date.as_deref(), &mut errors);
        let end_date = parse_date_field("endDate", self.end_date.as_deref(), &mut errors);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end <= start {
                errors.push(FieldError::new("endDate", "endDate must be after startDate"));
            }
        }

        match (receiver_id, match_type) {
            (Some(receiver_id), Some(match_type)) if errors.is_empty() => Ok(NewMatch {
                sender_id,
                receiver_id,
                newcomer_id,
                match_type,
                message,
                start_date,
                end_date,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_date_field(
    field: &str,
    raw: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
    match parse_date(raw) {
        Some(date) => Some(date),
        None => {
            errors.push(FieldError::new(
                field,
                format!("{} must be a valid date-time", field),
            ));
            None
        }
    }
}

/// RFC 3339 date-time, or a bare `YYYY-MM-DD` taken as midnight UTC
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Respond request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondInput {
    pub status: Option<String>,
    pub message: Option<String>,
}

impl RespondInput {
    /// Target status (ACCEPTED or REJECTED) and trimmed response message
    pub fn validate(&self) -> Result<(MatchStatus, Option<String>), Vec<FieldError>> {
        let mut errors = Vec::new();

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new("status", "status is required"));
                None
            }
            Some(raw) => match raw.parse::<MatchStatus>() {
                Ok(s) if s.is_response() => Some(s),
                _ => {
                    errors.push(FieldError::new(
                        "status",
                        "status must be ACCEPTED or REJECTED",
                    ));
                    None
                }
            },
        };

        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        if message
            .as_ref()
            .is_some_and(|m| m.chars().count() > MAX_MESSAGE_LEN)
        {
            errors.push(FieldError::new(
                "message",
                format!("message must be at most {} characters", MAX_MESSAGE_LEN),
            ));
        }

        match status {
            Some(status) if errors.is_empty() => Ok((status, message)),
            _ => Err(errors),
        }
    }
}

/// `GET /api/matches` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMatchesQuery {
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub match_type: Option<String>,
}

impl ListMatchesQuery {
    pub fn validate(&self) -> Result<(Option<MatchStatus>, Option<MatchType>), Vec<FieldError>> {
        let mut errors = Vec::new();

        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => raw
                .parse::<MatchStatus>()
                .map_err(|_| errors.push(FieldError::new("status", "invalid status filter")))
                .ok(),
        };
        let match_type = match self.match_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => raw
                .parse::<MatchType>()
                .map_err(|_| errors.push(FieldError::new("type", "invalid type filter")))
                .ok(),
        };

        if errors.is_empty() {
            Ok((status, match_type))
        } else {
            Err(errors)
        }
    }
}

/// Match plus denormalized participant display fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchData {
    #[serde(flatten)]
    pub record: Match,
    pub sender: Option<UserSummary>,
    pub receiver: Option<UserSummary>,
    pub newcomer: Option<UserSummary>,
}

impl MatchData {
    pub fn assemble(record: Match, users: &HashMap<Uuid, UserSummary>) -> Self {
        Self {
            sender: users.get(&record.sender_id).cloned(),
            receiver: users.get(&record.receiver_id).cloned(),
            newcomer: record.newcomer_id.and_then(|id| users.get(&id).cloned()),
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CreateMatchInput {
        CreateMatchInput {
            receiver_id: Some(Uuid::new_v4().to_string()),
            match_type: Some("NEWCOMER_MATCH".into()),
            ..Default::default()
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_minimal_input_is_valid() {
        let sender = Uuid::new_v4();
        let new_match = valid_input().validate(sender).unwrap();
        assert_eq!(new_match.sender_id, sender);
        assert_eq!(new_match.match_type, MatchType::NewcomerMatch);
        assert!(new_match.newcomer_id.is_none());
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let errors = CreateMatchInput::default().validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(fields(&errors), vec!["receiverId", "type"]);
    }

    #[test]
    fn test_invalid_enum_and_ids() {
        let input = CreateMatchInput {
            receiver_id: Some("not-a-uuid".into()),
            match_type: Some("MENTORSHIP".into()),
            newcomer_id: Some("also-bad".into()),
            ..Default::default()
        };
        let errors = input.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(fields(&errors), vec!["receiverId", "type", "newcomerId"]);
    }

    #[test]
    fn test_end_date_must_follow_start_date() {
        let mut input = valid_input();
        input.start_date = Some("2026-03-01".into());
        input.end_date = Some("2026-03-01T00:00:00Z".into());
        let errors = input.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(fields(&errors), vec!["endDate"]);

        input.end_date = Some("2026-06-01".into());
        assert!(input.validate(Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_unparseable_date() {
        let mut input = valid_input();
        input.start_date = Some("next tuesday".into());
        let errors = input.validate(Uuid::new_v4()).unwrap_err();
        assert_eq!(fields(&errors), vec!["startDate"]);
    }

    #[test]
    fn test_message_length_limit() {
        let mut input = valid_input();
        input.message = Some("x".repeat(MAX_MESSAGE_LEN + 1));
        assert!(input.validate(Uuid::new_v4()).is_err());

        input.message = Some("   ".into());
        assert!(input.validate(Uuid::new_v4()).unwrap().message.is_none());
    }

    #[test]
    fn test_parse_date_formats() {
        let dt = parse_date("2026-01-15T09:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-01-15T07:30:00+00:00");
        let day = parse_date("2026-01-15").unwrap();
        assert_eq!(day.to_rfc3339(), "2026-01-15T00:00:00+00:00");
        assert!(parse_date("15/01/2026").is_none());
    }

    #[test]
    fn test_respond_input_only_accepts_terminal_responses() {
        let ok = RespondInput {
            status: Some("ACCEPTED".into()),
            message: Some(" Happy to help ".into()),
        };
        let (status, message) = ok.validate().unwrap();
        assert_eq!(status, MatchStatus::Accepted);
        assert_eq!(message.as_deref(), Some("Happy to help"));

        for bad in ["PENDING", "COMPLETED", "accepted", ""] {
            let input = RespondInput {
                status: Some(bad.into()),
                message: None,
            };
            assert!(input.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_list_query_filters() {
        let q = ListMatchesQuery {
            status: Some("ACCEPTED".into()),
            match_type: None,
        };
        assert_eq!(q.validate().unwrap(), (Some(MatchStatus::Accepted), None));

        let bad = ListMatchesQuery {
            status: Some("DONE".into()),
            match_type: Some("NOPE".into()),
        };
        assert_eq!(bad.validate().unwrap_err().len(), 2);
    }
}
