//! Common type definitions.
//!
//! All entity IDs are SQLite `INTEGER PRIMARY KEY` values, wrapped in type aliases so signatures
//! say which table an id belongs to:
//!
//! - [`StudentId`]: `alunos.id`
//! - [`EnrollmentId`]: `matricula.idmatricula`
//! - [`ActivityId`]: `atividades.idatividades`
//! - [`TeacherId`]: `professores.id`

use serde::{Deserialize, Deserializer, de};

// Type aliases for IDs
pub type StudentId = i64;
pub type EnrollmentId = i64;
pub type ActivityId = i64;
pub type TeacherId = i64;

/// JavaScript-style truthiness for optional request fields.
///
/// "Falsy" values (absent, `null`, `0`, `""`) count as not provided, for both enrollment creation
/// and partial updates.
pub trait Provided {
    fn is_provided(&self) -> bool;
}

impl Provided for Option<String> {
    fn is_provided(&self) -> bool {
        self.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl Provided for Option<i64> {
    fn is_provided(&self) -> bool {
        self.is_some_and(|v| v != 0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Int(i64),
    Text(String),
}

/// Accepts an id as a JSON integer or as a numeric string (`7` or `"7"`).
///
/// `null`, a missing field and a blank string all read as `None`. Any other string is rejected.
/// Use with `#[serde(default, deserialize_with = "...")]`.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdRepr::Int(id)) => Ok(Some(id)),
        Some(IdRepr::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(IdRepr::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id: {s:?}, expected an integer"))),
    }
}
