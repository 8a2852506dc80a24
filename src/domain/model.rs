use std::fmt;

/// 學生年齡。新寫入的資料一律是整數，舊資料可能是任意文字。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Age {
    Years(u32),
    Text(String),
}

impl Age {
    /// Canonical numeric text becomes `Years`. Anything that would not
    /// render back identically (leading zeros, signs, padding) stays `Text`.
    pub fn from_stored(raw: &str) -> Self {
        match raw.parse::<u32>() {
            Ok(years) if years.to_string() == raw => Age::Years(years),
            _ => Age::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Age::Years(years) => write!(f, "{}", years),
            Age::Text(text) => f.write_str(text),
        }
    }
}

/// One persisted row of the `students` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub name: String,
    pub age: Age,
}

/// A validated student waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: u32,
}
