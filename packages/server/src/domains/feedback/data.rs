use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{round2, FieldError};
use crate::domains::feedback::models::{FeedbackAverages, NewFeedback};

pub const MAX_COMMENT_LEN: usize = 2000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackInput {
    pub match_id: Option<String>,
    pub rating: Option<i64>,
    pub helpfulness: Option<i64>,
    pub communication: Option<i64>,
    pub comment: Option<String>,
}

impl SubmitFeedbackInput {
    pub fn validate(&self, user_id: Uuid) -> Result<NewFeedback, Vec<FieldError>> {
        let mut errors = Vec::new();

        let match_id = match self.match_id.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new("matchId", "matchId is required"));
                None
            }
            Some(raw) => Uuid::parse_str(raw)
                .map_err(|_| errors.push(FieldError::new("matchId", "matchId must be a valid id")))
                .ok(),
        };

        let rating = match self.rating {
            None => {
                errors.push(FieldError::new("rating", "rating is required"));
                None
            }
            Some(value) => score("rating", value, &mut errors),
        };
        let helpfulness = self
            .helpfulness
            .and_then(|v| score("helpfulness", v, &mut errors));
        let communication = self
            .communication
            .and_then(|v| score("communication", v, &mut errors));

        let comment = self
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        if comment
            .as_ref()
            .is_some_and(|c| c.chars().count() > MAX_COMMENT_LEN)
        {
            errors.push(FieldError::new(
                "comment",
                format!("comment must be at most {} characters", MAX_COMMENT_LEN),
            ));
        }

        match (match_id, rating) {
            (Some(match_id), Some(rating)) if errors.is_empty() => Ok(NewFeedback {
                match_id,
                user_id,
                rating,
                helpfulness,
                communication,
                comment,
            }),
            _ => Err(errors),
        }
    }
}

/// A 1-5 score
fn score(field: &str, value: i64, errors: &mut Vec<FieldError>) -> Option<i32> {
    if (1..=5).contains(&value) {
        Some(value as i32)
    } else {
        errors.push(FieldError::new(
            field,
            format!("{} must be between 1 and 5", field),
        ));
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub total_feedback: i64,
    pub average_rating: Option<f64>,
    pub average_helpfulness: Option<f64>,
    pub average_communication: Option<f64>,
}

impl From<FeedbackAverages> for FeedbackStats {
    fn from(row: FeedbackAverages) -> Self {
        Self {
            total_feedback: row.total,
            average_rating: row.avg_rating.map(round2),
            average_helpfulness: row.avg_helpfulness.map(round2),
            average_communication: row.avg_communication.map(round2),
        }
    }
}
