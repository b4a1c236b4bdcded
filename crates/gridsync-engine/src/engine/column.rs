use super::cell_ref::column_number;
use super::error::{EngineError, Result};

/// A column given either by 1-based number or by letters ("A", "AB").
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Number(usize),
    Letters(String),
}

impl Column {
    pub fn resolve(&self) -> Result<usize> {
        match self {
            Column::Number(0) => Err(EngineError::IndexOutOfRange(
                "column 0 does not exist; columns are 1-based".to_string(),
            )),
            Column::Number(n) => Ok(*n),
            Column::Letters(letters) => column_number(letters),
        }
    }
}

impl From<usize> for Column {
    fn from(n: usize) -> Self {
        Column::Number(n)
    }
}

impl From<&str> for Column {
    fn from(letters: &str) -> Self {
        Column::Letters(letters.to_string())
    }
}

impl From<String> for Column {
    fn from(letters: String) -> Self {
        Column::Letters(letters)
    }
}
