//! Command routing and execution
//!
//! Routes each parsed subcommand to the collection operation it names. Routing is
//! pure: the caller supplies the parsed input document and prints the result.

use crate::cli::args::Commands;
use crate::config::Config;
use crate::core::advanced::{
    difference, flatten, intersection, invoke_method, shuffle, shuffle_with, sort_by_property, zip,
};
use crate::core::collection::reduce;
use crate::core::merge::{defaults, extend};
use crate::core::predicate::{contains, every, every_truthy, some_truthy};
use crate::core::transform::{first, first_n, index_of, last, last_n, map, pluck, uniq};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Execute a CLI command against the given input document
pub fn execute_command(command: &Commands, input: &Value, config: &Config) -> Result<Value> {
    debug!("Executing {:?}", command);
    match command {
        Commands::Uniq { sorted } => Ok(Value::Array(uniq(as_array(input, "uniq")?, *sorted))),
        Commands::Pluck { key } => Ok(Value::Array(
            pluck(input, key)
                .into_iter()
                .map(|field| field.unwrap_or(Value::Null))
                .collect(),
        )),
        Commands::First { n } => {
            let items = as_array(input, "first")?;
            Ok(match n {
                Some(n) => Value::Array(first_n(items, *n)),
                None => first(items).cloned().unwrap_or(Value::Null),
            })
        }
        Commands::Last { n } => {
            let items = as_array(input, "last")?;
            Ok(match n {
                Some(n) => Value::Array(last_n(items, *n)),
                None => last(items).cloned().unwrap_or(Value::Null),
            })
        }
        Commands::IndexOf { target } => Ok(json!(index_of(
            as_array(input, "index-of")?,
            &parse_target(target)
        ))),
        Commands::Contains { target } => Ok(Value::Bool(contains(input, &parse_target(target)))),
        Commands::Every => Ok(Value::Bool(every_truthy(input))),
        Commands::Any => Ok(Value::Bool(some_truthy(input))),
        Commands::Flatten => Ok(Value::Array(flatten(as_array(input, "flatten")?))),
        Commands::Zip => {
            let arrays = as_arrays(input, "zip")?;
            Ok(Value::Array(
                zip(&arrays)
                    .into_iter()
                    .map(|row| Value::Array(row.into_iter().map(Option::unwrap_or_default).collect()))
                    .collect(),
            ))
        }
        Commands::Intersection => Ok(Value::Array(intersection(&as_arrays(
            input,
            "intersection",
        )?))),
        Commands::Difference => {
            let arrays = as_arrays(input, "difference")?;
            Ok(Value::Array(match arrays.split_first() {
                Some((first, rest)) => difference(first, rest),
                None => Vec::new(),
            }))
        }
        Commands::SortBy { property } => Ok(Value::Array(sort_by_property(
            as_array(input, "sort-by")?,
            property,
        ))),
        Commands::Shuffle { seed } => {
            let items = as_array(input, "shuffle")?;
            Ok(Value::Array(match seed.or(config.shuffle.seed) {
                Some(seed) => shuffle_with(items, &mut StdRng::seed_from_u64(seed)),
                None => shuffle(items),
            }))
        }
        Commands::Invoke { method, args } => {
            let args = match args {
                Some(raw) => parse_args(raw)?,
                None => Vec::new(),
            };
            Ok(Value::Array(invoke_method(input, method, &args)?))
        }
        Commands::Extend => merge_objects(input, "extend", true),
        Commands::Defaults => merge_objects(input, "defaults", false),
        Commands::Sum => sum(input),
    }
}

fn as_array<'v>(input: &'v Value, command: &str) -> Result<&'v [Value]> {
    input
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::InvalidInput(format!("{command} expects a JSON array")))
}

fn as_arrays<'v>(input: &'v Value, command: &str) -> Result<Vec<&'v [Value]>> {
    as_array(input, command)?
        .iter()
        .map(|item| {
            item.as_array().map(Vec::as_slice).ok_or_else(|| {
                Error::InvalidInput(format!("{command} expects an array of arrays"))
            })
        })
        .collect()
}

/// Parse a command-line value as JSON, falling back to a plain string.
fn parse_target(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_args(raw: &str) -> Result<Vec<Value>> {
    match serde_json::from_str(raw)? {
        Value::Array(items) => Ok(items),
        single => Ok(vec![single]),
    }
}

fn merge_objects(input: &Value, command: &str, overwrite: bool) -> Result<Value> {
    let objects = as_array(input, command)?
        .iter()
        .map(|item| {
            item.as_object().ok_or_else(|| {
                Error::InvalidInput(format!("{command} expects an array of objects"))
            })
        })
        .collect::<Result<Vec<&Map<String, Value>>>>()?;

    let Some((first, rest)) = objects.split_first() else {
        return Ok(Value::Object(Map::new()));
    };
    let mut target = (*first).clone();
    if overwrite {
        extend(&mut target, rest);
    } else {
        defaults(&mut target, rest);
    }
    Ok(Value::Object(target))
}

fn sum(input: &Value) -> Result<Value> {
    let numbers = map(input, |value, _| value.as_f64())
        .into_iter()
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| Error::InvalidInput("sum expects only numbers".to_string()))?;
    let all_integers = every(input, |value| value.is_i64() || value.is_u64());

    Ok(match reduce(&numbers, |a, b| Some(a + b), None) {
        Some(total) if all_integers && total.fract() == 0.0 && total.abs() < 9.0e15 => {
            json!(total as i64)
        }
        Some(total) => json!(total),
        None => Value::Null,
    })
}
