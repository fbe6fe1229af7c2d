//! The persisted submission collection.
//!
//! The collection is one insertion-ordered JSON array stored under
//! [`SUBMISSIONS_KEY`]. It is always read whole and written whole. Elements
//! that do not decode are left out of [`SubmissionStore::load`] but kept in
//! the blob by [`SubmissionStore::append`].
//!
//! Concurrent writers are not coordinated: two handles doing read-modify-write
//! at the same time can silently drop each other's entry.

use noor_shared::constants::SUBMISSIONS_KEY;
use noor_shared::{DecodedList, Submission};
use serde_json::Value;

use crate::database::Database;
use crate::error::Result;

/// Load/save contract of the local submission store.
pub trait SubmissionStore {
    /// Read the whole collection.
    ///
    /// An absent key or a blob that does not parse yields an empty collection,
    /// and unreadable elements are skipped; only storage-level failures are
    /// errors.
    fn load(&self) -> Result<Vec<Submission>>;

    /// Replace the whole collection.
    fn save(&self, submissions: &[Submission]) -> Result<()>;

    /// Add one record at the end of the collection.
    fn append(&self, submission: &Submission) -> Result<()> {
        let mut submissions = self.load()?;
        submissions.push(submission.clone());
        self.save(&submissions)
    }
}

impl Database {
    /// Stored elements as raw JSON, or `None` when there is nothing usable.
    fn stored_elements(&self) -> Result<Option<Vec<Value>>> {
        let Some(json) = self.get_item(SUBMISSIONS_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(Value::Array(items)) => Ok(Some(items)),
            Ok(_) => {
                tracing::warn!("stored submissions are not a list, treating as empty");
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored submissions are malformed, treating as empty");
                Ok(None)
            }
        }
    }
}

impl SubmissionStore for Database {
    fn load(&self) -> Result<Vec<Submission>> {
        let Some(items) = self.stored_elements()? else {
            return Ok(Vec::new());
        };

        let decoded = DecodedList::from_values(items);
        if decoded.skipped > 0 {
            tracing::warn!(skipped = decoded.skipped, "ignoring unreadable stored submissions");
        }
        Ok(decoded.submissions)
    }

    fn save(&self, submissions: &[Submission]) -> Result<()> {
        let json = serde_json::to_string(submissions)?;
        self.set_item(SUBMISSIONS_KEY, &json)?;
        tracing::debug!(count = submissions.len(), "saved submissions");
        Ok(())
    }

    fn append(&self, submission: &Submission) -> Result<()> {
        let mut items = self.stored_elements()?.unwrap_or_default();
        items.push(serde_json::to_value(submission)?);

        let json = serde_json::to_string(&items)?;
        self.set_item(SUBMISSIONS_KEY, &json)?;
        tracing::debug!(count = items.len(), "appended submission");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noor_shared::SubmissionDraft;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(ts: i64, display: bool) -> Submission {
        let draft = SubmissionDraft::text(format!("<p>{ts}</p>"))
            .with_author("someone@umn.edu", "Someone")
            .anonymous(ts % 2 == 0)
            .display(display);
        Submission::create(draft, ts, &mut StdRng::seed_from_u64(ts as u64)).unwrap()
    }

    #[test]
    fn test_absent_is_empty() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_is_empty() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(SUBMISSIONS_KEY, "{not json").unwrap();
        assert!(db.load().unwrap().is_empty());

        db.set_item(SUBMISSIONS_KEY, r#"{"an":"object"}"#).unwrap();
        assert!(db.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_preserves_insertion_order() {
        let db = Database::open_in_memory().unwrap();
        let list = vec![sample(300, true), sample(100, false), sample(200, true)];
        db.save(&list).unwrap();

        assert_eq!(db.load().unwrap(), list);
    }

    #[test]
    fn test_save_load_is_byte_stable() {
        let db = Database::open_in_memory().unwrap();
        db.save(&[sample(1, true), sample(2, false)]).unwrap();
        let before = db.get_item(SUBMISSIONS_KEY).unwrap();

        let loaded = db.load().unwrap();
        db.save(&loaded).unwrap();
        let after = db.get_item(SUBMISSIONS_KEY).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_null_fields_are_read() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(
            SUBMISSIONS_KEY,
            r#"[{"email":null,"name":null,"pseudonym":null,"anonymous":false,
                "display":true,"type":"text","content":"old","timestamp":7.0}]"#,
        )
        .unwrap();

        let loaded = db.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].timestamp(), 7);
        assert_eq!(loaded[0].name(), "");
    }

    #[test]
    fn test_unreadable_element_is_skipped() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(
            SUBMISSIONS_KEY,
            r#"[{"type":"text","content":"a","timestamp":1},{"type":"video"},42]"#,
        )
        .unwrap();

        let loaded = db.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content(), "a");
    }

    #[test]
    fn test_append_keeps_existing_elements() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(
            SUBMISSIONS_KEY,
            r#"[{"email":null,"type":"text","content":"old","timestamp":1},{"type":"video"}]"#,
        )
        .unwrap();

        db.append(&sample(2, true)).unwrap();

        let blob = db.get_item(SUBMISSIONS_KEY).unwrap().unwrap();
        let raw: Value = serde_json::from_str(&blob).unwrap();
        let raw = raw.as_array().unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(raw[1]["type"], "video");

        let loaded = db.load().unwrap();
        let stamps: Vec<i64> = loaded.iter().map(Submission::timestamp).collect();
        assert_eq!(stamps, vec![1, 2]);
    }

    #[test]
    fn test_append_replaces_malformed_blob() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(SUBMISSIONS_KEY, "{not json").unwrap();

        db.append(&sample(5, true)).unwrap();
        assert_eq!(db.load().unwrap(), vec![sample(5, true)]);
    }

    #[test]
    fn test_save_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.save(&[sample(1, true), sample(2, true)]).unwrap();
        db.save(&[sample(3, false)]).unwrap();

        let loaded = db.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].timestamp(), 3);
    }
}
