//! The submission record and the draft it is built from.
//!
//! A [`Submission`] is immutable once created: fields are private and only
//! readable through accessors. The timestamp (epoch milliseconds) doubles as
//! the record's identity; there is no separate id.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::Rng;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::{ANONYMOUS_FALLBACK, BASE64_MARKER, DRAWING_PREFIX, UNKNOWN_AUTHOR};
use crate::error::ValidationError;
use crate::pseudonym;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    /// Rich-text markup.
    Text,
    /// A `data:image/...;base64,` URL.
    Drawing,
}

impl std::fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Drawing => f.write_str("drawing"),
        }
    }
}

impl std::str::FromStr for SubmissionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "drawing" => Ok(Self::Drawing),
            other => Err(format!("unknown submission type: {other}")),
        }
    }
}

/// What the author hands over at submit time, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub email: String,
    pub name: String,
    pub anonymous: bool,
    pub display: bool,
    pub kind: SubmissionKind,
    pub content: String,
}

impl SubmissionDraft {
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(SubmissionKind::Text, content)
    }

    pub fn drawing(data_url: impl Into<String>) -> Self {
        Self::new(SubmissionKind::Drawing, data_url)
    }

    fn new(kind: SubmissionKind, content: impl Into<String>) -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            anonymous: false,
            display: false,
            kind,
            content: content.into(),
        }
    }

    pub fn with_author(mut self, email: impl Into<String>, name: impl Into<String>) -> Self {
        self.email = email.into();
        self.name = name.into();
        self
    }

    pub fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }

    pub fn display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Trim author fields and content, then check the content is usable.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let content = self.content.trim().to_string();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        if self.kind == SubmissionKind::Drawing {
            check_drawing(&content)?;
        }

        Ok(Self {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            content,
            ..self
        })
    }
}

fn check_drawing(content: &str) -> Result<(), ValidationError> {
    let Some(rest) = content.strip_prefix(DRAWING_PREFIX) else {
        return Err(ValidationError::InvalidDrawing(
            "missing data:image/ prefix".into(),
        ));
    };
    let Some((_, payload)) = rest.split_once(BASE64_MARKER) else {
        return Err(ValidationError::InvalidDrawing(
            "payload is not base64 encoded".into(),
        ));
    };
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| ValidationError::InvalidDrawing(e.to_string()))?;
    if bytes.is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}

/// One stored entry. Serialized with the same field names locally and on
/// the wire.
///
/// Decoding is lenient: missing or `null` text fields read as empty, missing
/// or `null` flags as `false`, and the timestamp may be any JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, deserialize_with = "null_as_default")]
    email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pseudonym: String,
    #[serde(default, deserialize_with = "null_as_default")]
    anonymous: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    display: bool,
    #[serde(rename = "type")]
    kind: SubmissionKind,
    #[serde(default, deserialize_with = "null_as_default")]
    content: String,
    #[serde(deserialize_with = "epoch_millis")]
    timestamp: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn epoch_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct Millis;

    impl<'de> Visitor<'de> for Millis {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("epoch milliseconds as a number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(E::custom)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_finite() && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
                Ok(v.trunc() as i64)
            } else {
                Err(E::custom(format!("timestamp out of range: {v}")))
            }
        }
    }

    deserializer.deserialize_any(Millis)
}

/// Records decoded from a JSON array, element by element.
#[derive(Debug, Default)]
pub struct DecodedList {
    pub submissions: Vec<Submission>,
    /// Elements that could not be read as a submission and were left out.
    pub skipped: usize,
}

impl DecodedList {
    pub fn from_values(items: Vec<Value>) -> Self {
        let mut decoded = Self::default();
        for item in items {
            match serde_json::from_value(item) {
                Ok(submission) => decoded.submissions.push(submission),
                Err(_) => decoded.skipped += 1,
            }
        }
        decoded
    }
}

impl Submission {
    /// Validate `draft` and build the record, generating a pseudonym from
    /// `rng` when the author asked to stay anonymous.
    pub fn create<R: Rng + ?Sized>(
        draft: SubmissionDraft,
        timestamp: i64,
        rng: &mut R,
    ) -> Result<Self, ValidationError> {
        let draft = draft.validate()?;
        let pseudonym = if draft.anonymous {
            pseudonym::generate(rng)
        } else {
            String::new()
        };

        Ok(Self {
            email: draft.email,
            name: draft.name,
            pseudonym,
            anonymous: draft.anonymous,
            display: draft.display,
            kind: draft.kind,
            content: draft.content,
            timestamp,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pseudonym(&self) -> &str {
        &self.pseudonym
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Whether the author allowed public display.
    pub fn is_published(&self) -> bool {
        self.display
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Creation time in epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Name shown on cards: the pseudonym for anonymous entries, the author
    /// name otherwise. Never the raw name of an anonymous author.
    pub fn display_name(&self) -> &str {
        if self.anonymous {
            if self.pseudonym.is_empty() {
                ANONYMOUS_FALLBACK
            } else {
                &self.pseudonym
            }
        } else if self.name.is_empty() {
            UNKNOWN_AUTHOR
        } else {
            &self.name
        }
    }
}
