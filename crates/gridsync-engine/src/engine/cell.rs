//! Cell values as stored by the remote service.
//!
//! Every cell holds a string. Other inputs are coerced the way the service
//! renders them: booleans become `TRUE`/`FALSE`, everything else is stringified.
//! An empty string and an absent cell are the same observable state.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellValue(String);

impl CellValue {
    pub fn empty() -> CellValue {
        CellValue(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Coerce a JSON value from a values response with the same rules used for writes.
    pub fn from_json(value: &JsonValue) -> CellValue {
        match value {
            JsonValue::String(s) => CellValue(s.clone()),
            JsonValue::Bool(b) => CellValue::from(*b),
            JsonValue::Number(n) => CellValue(n.to_string()),
            JsonValue::Null => CellValue::empty(),
            other => CellValue(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue(s.clone())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue(if b { "TRUE" } else { "FALSE" }.to_string())
    }
}

impl From<char> for CellValue {
    fn from(c: char) -> Self {
        CellValue(c.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<&CellValue> for CellValue {
    fn from(value: &CellValue) -> Self {
        value.clone()
    }
}

macro_rules! stringified {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(n: $t) -> Self {
                    CellValue(n.to_string())
                }
            }
        )*
    };
}

stringified!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
