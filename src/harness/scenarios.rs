//! Acceptance scenarios
//!
//! Each scenario starts from a missing backing file and removes it when done.

use std::path::Path;

use crate::error::Result;
use crate::store::Store;

use super::remove_data_file;

/// Result of checking one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(String),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// A named scenario outcome
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub outcome: Outcome,
}

type Scenario = fn(&Path) -> Result<Outcome>;

/// Every scenario, in run order
pub const SCENARIOS: &[(&str, Scenario)] = &[
    ("put-and-get", put_and_get),
    ("get-missing-key", get_missing_key),
    ("delete-key", delete_key),
    ("overwrite-key", overwrite_key),
    ("persistence-write", persistence_write),
    ("persistence-reload", persistence_reload),
    ("multiple-keys", multiple_keys),
];

/// Run every scenario against `path`
///
/// Store errors inside a scenario count as a failure of that scenario only.
pub fn run_scenarios(path: &Path) -> Vec<ScenarioResult> {
    SCENARIOS
        .iter()
        .map(|&(name, scenario)| {
            let outcome = match remove_data_file(path).and_then(|()| scenario(path)) {
                Ok(outcome) => outcome,
                Err(e) => Outcome::Fail(format!("store error: {}", e)),
            };
            if let Err(e) = remove_data_file(path) {
                tracing::warn!("Could not remove {}: {}", path.display(), e);
            }
            tracing::debug!("Scenario {}: {:?}", name, outcome);
            ScenarioResult { name, outcome }
        })
        .collect()
}

fn expect_value(store: &Store, key: &str, expected: &str) -> Outcome {
    match store.get(key.as_bytes()) {
        Some(value) if value == expected.as_bytes() => Outcome::Pass,
        Some(value) => Outcome::Fail(format!(
            "expected '{}', got '{}' (found=true)",
            expected,
            String::from_utf8_lossy(&value)
        )),
        None => Outcome::Fail(format!("expected '{}', got '' (found=false)", expected)),
    }
}

fn put_and_get(path: &Path) -> Result<Outcome> {
    let store = Store::open_path(path)?;
    store.put(b"name", b"flatkv")?;
    let outcome = expect_value(&store, "name", "flatkv");
    store.close()?;
    Ok(outcome)
}

fn get_missing_key(path: &Path) -> Result<Outcome> {
    let store = Store::open_path(path)?;
    let outcome = match store.get(b"nonexistent") {
        None => Outcome::Pass,
        Some(_) => Outcome::Fail("expected key not found".to_string()),
    };
    store.close()?;
    Ok(outcome)
}

fn delete_key(path: &Path) -> Result<Outcome> {
    let store = Store::open_path(path)?;
    store.put(b"temp", b"value")?;
    store.delete(b"temp")?;
    let outcome = match store.get(b"temp") {
        None => Outcome::Pass,
        Some(_) => Outcome::Fail("key still exists after delete".to_string()),
    };
    store.close()?;
    Ok(outcome)
}

fn overwrite_key(path: &Path) -> Result<Outcome> {
    let store = Store::open_path(path)?;
    store.put(b"key", b"first")?;
    store.put(b"key", b"second")?;
    let outcome = expect_value(&store, "key", "second");
    store.close()?;
    Ok(outcome)
}

fn persistence_write(path: &Path) -> Result<Outcome> {
    let store = Store::open_path(path)?;
    store.put(b"persist", b"across-restart")?;
    store.close()?;

    if path.exists() {
        Ok(Outcome::Pass)
    } else {
        Ok(Outcome::Fail("data file not found after close".to_string()))
    }
}

fn persistence_reload(path: &Path) -> Result<Outcome> {
    let store = Store::open_path(path)?;
    store.put(b"persist", b"across-restart")?;
    store.close()?;

    let reopened = Store::open_path(path)?;
    let outcome = expect_value(&reopened, "persist", "across-restart");
    reopened.close()?;
    Ok(outcome)
}

fn multiple_keys(path: &Path) -> Result<Outcome> {
    let store = Store::open_path(path)?;
    for i in 0..100 {
        store.put(format!("key-{}", i).as_bytes(), format!("value-{}", i).as_bytes())?;
    }

    let mut outcome = Outcome::Pass;
    for i in 0..100 {
        let key = format!("key-{}", i);
        if let Outcome::Fail(reason) = expect_value(&store, &key, &format!("value-{}", i)) {
            outcome = Outcome::Fail(format!("key={}: {}", key, reason));
            break;
        }
    }
    store.close()?;
    Ok(outcome)
}
