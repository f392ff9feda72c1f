use serde::Serialize;
use std::collections::BTreeMap;

use crate::convert::{convert_value, ValueConverter};
use crate::error::{ArgError, ArgResult};
use crate::value::ConfigValue;

/// Configuration overrides keyed by dotted path, stored nested.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigUpdates(BTreeMap<String, ConfigValue>);

impl ConfigUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `path`, creating intermediate mappings.
    pub fn set(&mut self, path: &str, value: ConfigValue) -> ArgResult<()> {
        let keys: Vec<&str> = path.split('.').collect();
        if keys.iter().any(|k| k.is_empty()) {
            return Err(ArgError::InvalidKey(path.to_string()));
        }
        let (last, parents) = keys
            .split_last()
            .ok_or_else(|| ArgError::InvalidKey(path.to_string()))?;

        let mut node = &mut self.0;
        for key in parents {
            let child = node
                .entry((*key).to_string())
                .or_insert_with(|| ConfigValue::Map(BTreeMap::new()));
            node = match child {
                ConfigValue::Map(map) => map,
                _ => {
                    return Err(ArgError::PathConflict {
                        path: path.to_string(),
                    })
                }
            };
        }
        node.insert((*last).to_string(), value);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        let (first, rest) = match path.split_once('.') {
            Some((first, rest)) => (first, Some(rest)),
            None => (path, None),
        };
        let mut value = self.0.get(first)?;
        if let Some(rest) = rest {
            for key in rest.split('.') {
                value = value.as_map()?.get(key)?;
            }
        }
        Some(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_map(self) -> BTreeMap<String, ConfigValue> {
        self.0
    }
}

impl From<ConfigUpdates> for ConfigValue {
    fn from(updates: ConfigUpdates) -> Self {
        ConfigValue::Map(updates.0)
    }
}

/// The update list after `with`, split into assignments and named configs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSet {
    pub config_updates: ConfigUpdates,
    pub named_configs: Vec<String>,
}

/// Apply every `key=value` entry; bare words become named configs.
pub fn split_update_list<I, S>(updates: I, converter: ValueConverter) -> ArgResult<UpdateSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = UpdateSet::default();
    for entry in updates {
        let entry = entry.as_ref();
        if entry.is_empty() {
            continue;
        }
        match entry.split_once('=') {
            Some((path, value)) => {
                let value = converter.try_convert(value)?;
                set.config_updates.set(path.trim(), value)?;
            }
            None => set.named_configs.push(entry.trim().to_string()),
        }
    }
    tracing::debug!(
        updates = set.config_updates.len(),
        named_configs = set.named_configs.len(),
        "Collected config updates"
    );
    Ok(set)
}

/// Turn `key=value` strings into nested, coerced overrides.
///
/// Pass `None::<&str>` when there is no update list at all.
pub fn get_config_updates<I, S>(updates: I) -> ArgResult<ConfigUpdates>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config_updates = ConfigUpdates::new();
    for entry in updates {
        let entry = entry.as_ref();
        if entry.is_empty() {
            continue;
        }
        let (path, value) = entry
            .split_once('=')
            .ok_or_else(|| ArgError::MissingAssignment(entry.to_string()))?;
        config_updates.set(path.trim(), convert_value(value))?;
    }
    Ok(config_updates)
}
