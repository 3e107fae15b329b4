//! Wire types for the PlanIt REST API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A task as returned by `GET /tasks` and `GET /tasks/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "de::integer")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::optional_integer")]
    pub user_id: Option<i64>,
    pub title: String,
    /// Stored as nullable; `null` reads as empty.
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub description: String,
    /// SQLite hands this back as `0`/`1`, updates may store a JSON bool.
    #[serde(default, deserialize_with = "de::flexible_bool")]
    pub is_done: bool,
}

/// A calendar event as returned by `GET /events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "de::integer")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::optional_integer")]
    pub user_id: Option<i64>,
    pub title: String,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of a successful `POST /login`.
///
/// The vulnerable server only returns `user_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(deserialize_with = "de::integer")]
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewTask<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TaskUpdate {
    pub is_done: bool,
}

#[derive(Debug, Serialize)]
pub struct NewEvent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    pub title: &'a str,
    pub date: &'a str,
}

/// `{"message": ...}` acknowledgement returned by mutations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

mod de {
    use super::{Deserialize, Deserializer, Value};
    use serde::de::Error;

    fn value_to_i64<E: Error>(value: &Value) -> Result<i64, E> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| E::custom(format!("expected integer, got {n}"))),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected integer, got \"{s}\""))),
            other => Err(E::custom(format!("expected integer, got {other}"))),
        }
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        value_to_i64(&value)
    }

    pub fn optional_integer<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i64>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => value_to_i64(&value).map(Some),
        }
    }

    pub fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(b) => Ok(b),
            Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
            Value::Null => Ok(false),
            Value::String(s) => match s.trim() {
                "1" | "true" => Ok(true),
                "0" | "false" | "" => Ok(false),
                other => Err(D::Error::custom(format!("expected boolean, got \"{other}\""))),
            },
            other => Err(D::Error::custom(format!("expected boolean, got {other}"))),
        }
    }
}
