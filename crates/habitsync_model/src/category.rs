//! Habit category records.

use crate::error::{ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declared type of a habit item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    /// Checked / unchecked.
    Boolean,
    /// Counted.
    Number,
}

/// One trackable habit inside a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitItem {
    /// Client-assigned item identifier, referenced by entries.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Declared value type.
    #[serde(rename = "type")]
    pub kind: HabitKind,
}

impl HabitItem {
    /// Validates the item shape.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyItemId);
        }
        if self.label.is_empty() {
            return Err(ValidationError::EmptyItemLabel);
        }
        Ok(())
    }
}

/// A named, ordered group of trackable habit items owned by a user.
///
/// At most one category exists per `(uid, categoryId)`. Categories
/// follow full-replacement semantics on sync: a category the client
/// omits from an upload is deleted server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCategory {
    /// Owning user.
    pub uid: String,
    /// Client-assigned category identifier.
    pub category_id: String,
    /// Display name.
    pub name: String,
    /// Display icon.
    pub icon: String,
    /// Ordered habit items.
    pub items: Vec<HabitItem>,
    /// Position among the user's categories (ascending).
    pub sort_order: i32,
    /// Client- or server-assigned last-write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A category as submitted in a sync upload.
///
/// The client sends its complete current category set on every sync;
/// the server stamps `uid` on accepted records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpload {
    /// Client-assigned category identifier.
    pub category_id: String,
    /// Display name.
    pub name: String,
    /// Display icon.
    pub icon: String,
    /// Ordered habit items.
    pub items: Vec<HabitItem>,
    /// Position among the user's categories.
    pub sort_order: i32,
    /// Client-side last-write timestamp.
    pub updated_at: DateTime<Utc>,
}

impl CategoryUpload {
    /// Validates the upload shape, including every contained item.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.category_id.is_empty() {
            return Err(ValidationError::EmptyCategoryId);
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }

    /// Converts into a stored category owned by `uid`.
    pub fn into_category(self, uid: &str) -> HabitCategory {
        HabitCategory {
            uid: uid.to_string(),
            category_id: self.category_id,
            name: self.name,
            icon: self.icon,
            items: self.items,
            sort_order: self.sort_order,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_upload() -> CategoryUpload {
        CategoryUpload {
            category_id: "morning".into(),
            name: "Morning".into(),
            icon: "🌅".into(),
            items: vec![HabitItem {
                id: "stretch".into(),
                label: "Stretch".into(),
                kind: HabitKind::Boolean,
            }],
            sort_order: 0,
            updated_at: Utc.timestamp_opt(100, 0).unwrap(),
        }
    }

    #[test]
    fn kind_wire_form() {
        assert_eq!(serde_json::to_string(&HabitKind::Boolean).unwrap(), "\"boolean\"");
        assert_eq!(serde_json::to_string(&HabitKind::Number).unwrap(), "\"number\"");
    }

    #[test]
    fn item_type_field_name() {
        let json = serde_json::to_string(&make_upload()).unwrap();
        assert!(json.contains("\"type\":\"boolean\""));
        assert!(json.contains("\"categoryId\":\"morning\""));
        assert!(json.contains("\"sortOrder\":0"));
    }

    #[test]
    fn upload_validation_covers_items() {
        assert!(make_upload().validate().is_ok());

        let mut bad = make_upload();
        bad.items[0].label = String::new();
        assert_eq!(bad.validate(), Err(ValidationError::EmptyItemLabel));

        let mut bad = make_upload();
        bad.category_id = String::new();
        assert_eq!(bad.validate(), Err(ValidationError::EmptyCategoryId));
    }

    #[test]
    fn into_category_stamps_uid() {
        let category = make_upload().into_category("u1");
        assert_eq!(category.uid, "u1");
        assert_eq!(category.category_id, "morning");
    }
}
