//! Notification activities
//!
//! Lifecycle operations call [`notify`] after their transition has committed.
//! Delivery is best-effort: a failed insert is logged and never undoes the
//! transition that caused it.

use anyhow::Result;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domains::matches::models::{Match, MatchStatus, MatchType};
use crate::domains::notifications::models::{NewNotification, Notification, NotificationKind};

/// Record a notification, logging instead of failing
pub async fn notify(input: NewNotification, pool: &PgPool) {
    match Notification::record(&input, pool).await {
        Ok(notification) => debug!(
            notification_id = %notification.id,
            user_id = %input.user_id,
            kind = %input.kind,
            "Notification recorded"
        ),
        Err(e) => warn!(
            user_id = %input.user_id,
            kind = %input.kind,
            match_id = ?input.match_id,
            error = %e,
            "Failed to record notification"
        ),
    }
}

fn describe_type(match_type: MatchType) -> &'static str {
    match match_type {
        MatchType::NewcomerMatch => "newcomer buddy",
        MatchType::RelocationSupport => "relocation support",
        MatchType::OfficeConnection => "office connection",
    }
}

/// New request, addressed to the receiver
pub fn request_notification(
    record: &Match,
    sender_name: &str,
    newcomer_name: Option<&str>,
) -> NewNotification {
    let body = match newcomer_name {
        Some(newcomer) => format!(
            "{} would like you to be the buddy of {}.",
            sender_name, newcomer
        ),
        None => format!(
            "{} sent you a {} request.",
            sender_name,
            describe_type(record.match_type)
        ),
    };

    NewNotification {
        user_id: record.receiver_id,
        kind: NotificationKind::MatchRequest,
        title: "New buddy request".to_string(),
        body,
        match_id: Some(record.id),
    }
}

/// Receiver's answer, addressed to the original sender
pub fn response_notification(record: &Match, receiver_name: &str) -> NewNotification {
    let (kind, title, verb) = if record.status == MatchStatus::Accepted {
        (NotificationKind::MatchAccepted, "Match request accepted", "accepted")
    } else {
        (NotificationKind::MatchRejected, "Match request declined", "declined")
    };

    let mut body = format!("{} {} your {} request.", receiver_name, verb, describe_type(record.match_type));
    if let Some(message) = &record.response_message {
        body.push_str(&format!(" Message: {}", message));
    }

    NewNotification {
        user_id: record.sender_id,
        kind,
        title: title.to_string(),
        body,
        match_id: Some(record.id),
    }
}

/// Completion, addressed to `recipient`
pub fn completion_notification(record: &Match, recipient: Uuid, completer_name: &str) -> NewNotification {
    NewNotification {
        user_id: recipient,
        kind: NotificationKind::MatchCompleted,
        title: "Match completed".to_string(),
        body: format!("{} marked your {} match as completed.", completer_name, describe_type(record.match_type)),
        match_id: Some(record.id),
    }
}

pub async fn list_notifications(user_id: Uuid, unread_only: bool, pool: &PgPool) -> Result<Vec<Notification>> {
    Notification::find_for_user(user_id, unread_only, pool).await
}

/// `None` when the notification does not exist or belongs to someone else
pub async fn mark_read(id: Uuid, user_id: Uuid, pool: &PgPool) -> Result<Option<Notification>> {
    let updated = Notification::mark_read(id, user_id, pool).await?;
    if updated.is_none() {
        debug!(notification_id = %id, user_id = %user_id, "Mark-read rejected: not found or not owned");
    }
    Ok(updated)
}
