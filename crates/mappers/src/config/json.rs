use super::{Config, Evaluated, Target};
use crate::{Error, LazyMapper, Result};

use serde_json::Value as Json;

impl Config {
    /// Loads a configuration from its JSON form.
    ///
    /// ```
    /// use mappers::{Config, Evaluated, Target};
    ///
    /// let config = Config::from_json_str(r#"{
    ///     "primary_key": "id",
    ///     "community_id": ["channel", "community_id"],
    ///     "total": {"evaluated": "total_number"}
    /// }"#).unwrap();
    ///
    /// assert_eq!(
    ///     config.get("total"),
    ///     Some(&Target::Evaluated(Evaluated::named("total_number")))
    /// );
    /// ```
    pub fn from_json_str(input: &str) -> Result<Config> {
        let json: Json = serde_json::from_str(input).map_err(anyhow::Error::from)?;
        Config::from_json(&json)
    }

    /// Entries keep the order of the document.
    pub fn from_json(json: &Json) -> Result<Config> {
        let Json::Object(object) = json else {
            return Err(Error::invalid_config(format!(
                "expected an object, found {}",
                json_kind(json)
            )));
        };

        object
            .iter()
            .map(|(key, value)| Ok((key.as_str(), target_from_json(key, value)?)))
            .collect()
    }
}

fn target_from_json(key: &str, value: &Json) -> Result<Target> {
    match value {
        Json::String(name) => Ok(Target::Field(name.clone())),
        Json::Array(items) => items
            .iter()
            .map(|item| match item {
                Json::String(segment) => Ok(segment.clone()),
                other => Err(Error::invalid_config_value(
                    key,
                    format!("path segments must be strings, found {}", json_kind(other)),
                )),
            })
            .collect::<Result<Vec<_>>>()
            .map(Target::Path),
        Json::Object(object) if object.len() == 1 => {
            if let Some(name) = object.get("evaluated") {
                return match name {
                    Json::Null => Ok(Target::Evaluated(Evaluated::new())),
                    Json::String(name) => Ok(Target::Evaluated(Evaluated::named(name.as_str()))),
                    other => Err(Error::invalid_config_value(
                        key,
                        format!("evaluated name must be a string, found {}", json_kind(other)),
                    )),
                };
            }

            if let Some(nested) = object.get("mapper") {
                let config = Config::from_json(nested).map_err(|err| {
                    err.context(Error::invalid_config_value(key, "invalid nested mapper"))
                })?;
                return Ok(Target::Nested(LazyMapper::new(config)));
            }

            Err(unrecognized(key, value))
        }
        _ => Err(unrecognized(key, value)),
    }
}

fn unrecognized(key: &str, value: &Json) -> Error {
    Error::invalid_config_value(
        key,
        format!(
            "expected a field name, a path, an evaluated marker or a nested mapper, found {}",
            json_kind(value)
        ),
    )
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
