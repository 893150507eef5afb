//! Raw and clean record types.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ids::UserId;
use crate::value::FieldValue;

/// Column that carries the acting user's identity on every inserted record.
pub const USER_ID_COLUMN: &str = "user_id";

/// One non-empty input line, as ordered `(header, cell)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based data row number (the header line is not counted).
    pub row_number: usize,
    pub cells: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new(row_number: usize, cells: Vec<(String, String)>) -> Self {
        Self { row_number, cells }
    }

    /// Value of the first cell under `header`.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.trim().is_empty())
    }
}

/// A destination-shaped record ready for insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanRecord {
    pub fields: BTreeMap<String, FieldValue>,
    pub user_id: Option<UserId>,
}

impl CleanRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: FieldValue) {
        self.fields.insert(column.into(), value);
    }

    /// Text content of a column, if it holds a string value.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(FieldValue::as_str)
    }

    /// True when the column is absent, null or blank.
    pub fn is_blank(&self, column: &str) -> bool {
        self.fields.get(column).is_none_or(FieldValue::is_blank)
    }

    pub fn with_identity(mut self, user_id: &UserId) -> Self {
        self.user_id = Some(user_id.clone());
        self
    }
}

impl Serialize for CleanRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.user_id.is_some());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        if let Some(user_id) = &self.user_id {
            map.serialize_entry(USER_ID_COLUMN, user_id.as_str())?;
        }
        map.end()
    }
}
