//! What a presentation layer needs per card.
//!
//! The core resolves the author name and a human-readable time; turning a
//! [`Card`] into markup is the renderer's job. Admins additionally see the
//! publication status and the contact address.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use noor_shared::{Submission, SubmissionKind};
use serde::Serialize;

pub const DRAWING_ALT: &str = "Drawing submission";
pub const STATUS_PUBLISHED: &str = "Published";
pub const STATUS_PRIVATE: &str = "Private";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Who is looking at a card; decides which fields are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    /// Sees publication status and contact address.
    Admin,
    /// Archive visitor; author name, time and body only.
    Public,
}

/// The entry itself, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CardBody {
    /// Author markup, passed through untouched.
    Markup { html: String },
    /// A drawing, shown as an image of the data URL.
    Image { src: String, alt: &'static str },
}

/// One rendered entry in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Pseudonym, fallback or real name, per the display-name rules.
    pub author: String,
    /// Local time the entry was recorded.
    pub posted_at: String,
    /// `Published` or `Private`; admin only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    /// Contact address as submitted; admin only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub body: CardBody,
}

impl Card {
    pub fn new(submission: &Submission, role: ViewerRole) -> Self {
        Self::with_timezone(submission, role, &Local)
    }

    pub fn with_timezone<Tz>(submission: &Submission, role: ViewerRole, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let body = match submission.kind() {
            SubmissionKind::Text => CardBody::Markup {
                html: submission.content().to_string(),
            },
            SubmissionKind::Drawing => CardBody::Image {
                src: submission.content().to_string(),
                alt: DRAWING_ALT,
            },
        };

        let (status, email) = match role {
            ViewerRole::Admin => {
                let status = if submission.is_published() {
                    STATUS_PUBLISHED
                } else {
                    STATUS_PRIVATE
                };
                (Some(status), Some(submission.email().to_string()))
            }
            ViewerRole::Public => (None, None),
        };

        Self {
            author: submission.display_name().to_string(),
            posted_at: format_timestamp(submission.timestamp(), tz),
            status,
            email,
            body,
        }
    }
}

/// Cards for an already filtered and ordered listing.
pub fn cards(submissions: &[Submission], role: ViewerRole) -> Vec<Card> {
    submissions.iter().map(|s| Card::new(s, role)).collect()
}

/// Epoch milliseconds as `YYYY-MM-DD HH:MM:SS` in `tz`.
pub fn format_timestamp<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match DateTime::from_timestamp_millis(millis) {
        Some(utc) => utc.with_timezone(tz).format(TIME_FORMAT).to_string(),
        None => "unknown date".to_string(),
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.author, self.posted_at)?;
        if let Some(status) = self.status {
            write!(f, " | {status}")?;
        }
        match &self.body {
            CardBody::Markup { html } => write!(f, "\n{html}")?,
            CardBody::Image { src, alt } => {
                // data URLs are huge; show the media type only
                let media = src.split(';').next().unwrap_or(src);
                write!(f, "\n[{alt}: {media}]")?
            }
        }
        if let Some(email) = &self.email {
            write!(f, "\nEmail: {email}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use noor_shared::SubmissionDraft;
    use rand::thread_rng;

    fn submission(draft: SubmissionDraft) -> Submission {
        Submission::create(draft, 1_700_000_000_000, &mut thread_rng()).unwrap()
    }

    #[test]
    fn test_public_card_hides_admin_fields() {
        let sub = submission(
            SubmissionDraft::text("<p>hi</p>")
                .with_author("a@umn.edu", "Alice")
                .display(true),
        );
        let card = Card::with_timezone(&sub, ViewerRole::Public, &Utc);

        assert_eq!(card.author, "Alice");
        assert_eq!(card.posted_at, "2023-11-14 22:13:20");
        assert_eq!(card.status, None);
        assert_eq!(card.email, None);
        assert_eq!(
            card.body,
            CardBody::Markup {
                html: "<p>hi</p>".into()
            }
        );
    }

    #[test]
    fn test_admin_card_shows_status_and_email() {
        let sub = submission(SubmissionDraft::text("x").with_author("a@umn.edu", ""));
        let card = Card::with_timezone(&sub, ViewerRole::Admin, &Utc);

        assert_eq!(card.author, "Unknown");
        assert_eq!(card.status, Some(STATUS_PRIVATE));
        assert_eq!(card.email.as_deref(), Some("a@umn.edu"));
        assert!(card.to_string().ends_with("Email: a@umn.edu"));
    }

    #[test]
    fn test_anonymous_card_uses_pseudonym() {
        let sub = submission(
            SubmissionDraft::text("x")
                .with_author("a@umn.edu", "Alice")
                .anonymous(true),
        );
        for role in [ViewerRole::Admin, ViewerRole::Public] {
            let card = Card::new(&sub, role);
            assert_eq!(card.author, sub.pseudonym());
        }
    }

    #[test]
    fn test_drawing_card() {
        let sub = submission(SubmissionDraft::drawing("data:image/png;base64,iVBORw0KGgo="));
        let card = Card::with_timezone(&sub, ViewerRole::Public, &Utc);

        assert_eq!(
            card.body,
            CardBody::Image {
                src: "data:image/png;base64,iVBORw0KGgo=".into(),
                alt: DRAWING_ALT,
            }
        );
        assert!(card.to_string().contains("[Drawing submission: data:image/png]"));
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert_eq!(format_timestamp(i64::MAX, &Utc), "unknown date");
    }
}
