use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::PlannerError;
use crate::model::pool::ResourcePool;
use crate::model::scenario::Scenario;
use crate::time::parse_scenario_date_from;

pub const SCENARIO_KEYS: [&str; 4] = ["quantity", "start", "end", "label"];
pub const POOL_KEYS: [&str; 3] = ["total", "available", "item"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub positional: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// Splits `key:value` tokens from plain words. A token only counts as a
/// key when the part before the colon starts with a letter, so `2:fri`
/// stays a plain word.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut positional = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if key.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
                metadata.insert(key.to_lowercase(), value.to_string());
                continue;
            }
        }
        positional.push(arg.clone());
    }

    ParsedInput {
        positional,
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String, PlannerError> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<String> = candidates
        .iter()
        .filter(|c| c.starts_with(key))
        .map(|c| c.to_string())
        .collect();

    match matches.len() {
        1 => Ok(matches[0].clone()),
        0 => Err(PlannerError::UnknownKey(key.to_string())),
        _ => Err(PlannerError::AmbiguousKey {
            key: key.to_string(),
            candidates: matches,
        }),
    }
}

/// Builds a scenario from command words such as
/// `10 2024-01-01 2024-01-05 Trade fair` or `q:10 s:today e:+3d l:Expo`.
///
/// Fields not given as keys are filled from plain words in the order
/// quantity, start, end; leftover words become the label. Unless `force`
/// is set, zero/negative quantities and inverted ranges are rejected.
pub fn parse_scenario(args: &[String], today: NaiveDate, force: bool) -> Result<Scenario, PlannerError> {
    let parsed = parse_args(args);

    let mut fields = HashMap::new();
    for (key, value) in parsed.metadata {
        fields.insert(expand_key(&key, &SCENARIO_KEYS)?, value);
    }

    let mut words = parsed.positional.into_iter();
    for key in ["quantity", "start", "end"] {
        if !fields.contains_key(key) {
            if let Some(word) = words.next() {
                fields.insert(key.to_string(), word);
            }
        }
    }
    let rest: Vec<String> = words.collect();
    if !fields.contains_key("label") && !rest.is_empty() {
        fields.insert("label".to_string(), rest.join(" "));
    }

    let quantity_str = fields.get("quantity").ok_or(PlannerError::MissingField("quantity"))?;
    let quantity: i64 = quantity_str
        .trim()
        .parse()
        .map_err(|_| PlannerError::UnparsableQuantity(quantity_str.clone()))?;
    let start = parse_scenario_date_from(
        fields.get("start").ok_or(PlannerError::MissingField("start"))?,
        today,
    )?;
    let end = parse_scenario_date_from(
        fields.get("end").ok_or(PlannerError::MissingField("end"))?,
        today,
    )?;

    let scenario = if force {
        let scenario = Scenario::new(quantity, start, end);
        if scenario.is_inverted() || quantity <= 0 {
            warn!(quantity, %start, %end, "accepting scenario that fails validation");
        }
        scenario
    } else {
        Scenario::validated(quantity, start, end)?
    };

    Ok(match fields.remove("label") {
        Some(label) => scenario.with_label(label),
        None => scenario,
    })
}

/// Builds a pool snapshot from words such as `100 40` or `t:100 a:40 i:Crane`.
pub fn parse_pool(args: &[String]) -> Result<ResourcePool, PlannerError> {
    let parsed = parse_args(args);

    let mut fields = HashMap::new();
    for (key, value) in parsed.metadata {
        fields.insert(expand_key(&key, &POOL_KEYS)?, value);
    }
    let mut words = parsed.positional.into_iter();
    for key in ["total", "available"] {
        if !fields.contains_key(key) {
            if let Some(word) = words.next() {
                fields.insert(key.to_string(), word);
            }
        }
    }

    let capacity = |key: &'static str| -> Result<u64, PlannerError> {
        let raw = fields.get(key).ok_or(PlannerError::MissingField(key))?;
        raw.trim()
            .parse()
            .map_err(|_| PlannerError::UnparsableCapacity(raw.clone()))
    };

    Ok(ResourcePool {
        item: fields.get("item").cloned(),
        total_capacity: capacity("total")?,
        available_capacity: capacity("available")?,
    })
}
