use serde::Serialize;

/// Origin of a duty record: automatic GPS/speed detection or a manual
/// driver action. Both go through the same tracker entry point.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum RecordSource {
    Auto,
    Manual,
}

impl RecordSource {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            RecordSource::Auto => "auto",
            RecordSource::Manual => "manual",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(RecordSource::Auto),
            "manual" => Some(RecordSource::Manual),
            _ => None,
        }
    }
}
