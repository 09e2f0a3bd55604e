//! Named scenario fixtures shared by the herokit test suites.
//!
//! `fixtures/manifest.json` maps fixture names to files under `fixtures/`,
//! grouped by kind: breakpoint tables, rect transitions and engine sessions.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Fixture name -> manifest entry for one kind of scenario.
type Catalog<T> = HashMap<String, T>;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures/manifest.json is valid JSON")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    ranges: Catalog<String>,
    transitions: Catalog<String>,
    sessions: Catalog<SessionEntry>,
}

/// A session is either a bare script path or a script plus engine config.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SessionEntry {
    Script(String),
    WithConfig {
        script: String,
        #[serde(default)]
        config: Option<String>,
    },
}

impl SessionEntry {
    fn script(&self) -> &str {
        match self {
            SessionEntry::Script(script) | SessionEntry::WithConfig { script, .. } => script,
        }
    }

    fn config(&self) -> Option<&str> {
        match self {
            SessionEntry::Script(_) => None,
            SessionEntry::WithConfig { config, .. } => config.as_deref(),
        }
    }
}

fn fixture_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel)
}

fn read_fixture(rel: &str) -> Result<String> {
    let path = fixture_path(rel);
    fs::read_to_string(&path).with_context(|| format!("reading fixture {}", path.display()))
}

fn parse_fixture<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_fixture(rel)?;
    serde_json::from_str(&text).with_context(|| format!("parsing fixture {rel}"))
}

fn entry<'a, T>(catalog: &'a Catalog<T>, kind: &str, name: &str) -> Result<&'a T> {
    catalog
        .get(name)
        .with_context(|| format!("no {kind} fixture named '{name}'"))
}

fn names<T>(catalog: &Catalog<T>) -> Vec<String> {
    let mut names: Vec<String> = catalog.keys().cloned().collect();
    names.sort();
    names
}

/// Breakpoint tables with expected samples.
pub mod ranges {
    use super::*;

    pub fn keys() -> Vec<String> {
        names(&MANIFEST.ranges)
    }

    pub fn json(name: &str) -> Result<String> {
        read_fixture(entry(&MANIFEST.ranges, "range", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        parse_fixture(entry(&MANIFEST.ranges, "range", name)?)
    }
}

/// Source/destination rect pairs with expected tween samples.
pub mod transitions {
    use super::*;

    pub fn keys() -> Vec<String> {
        names(&MANIFEST.transitions)
    }

    pub fn json(name: &str) -> Result<String> {
        read_fixture(entry(&MANIFEST.transitions, "transition", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        parse_fixture(entry(&MANIFEST.transitions, "transition", name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        entry(&MANIFEST.transitions, "transition", name).map(|rel| fixture_path(rel))
    }
}

/// Frame-by-frame engine command scripts, optionally with an engine config.
pub mod sessions {
    use super::*;

    fn session(name: &str) -> Result<&'static SessionEntry> {
        entry(&MANIFEST.sessions, "session", name)
    }

    pub fn keys() -> Vec<String> {
        names(&MANIFEST.sessions)
    }

    pub fn script_json(name: &str) -> Result<String> {
        read_fixture(session(name)?.script())
    }

    pub fn script<T: DeserializeOwned>(name: &str) -> Result<T> {
        parse_fixture(session(name)?.script())
    }

    /// Raw config JSON, or `None` when the session runs on defaults.
    pub fn config_json(name: &str) -> Result<Option<String>> {
        session(name)?.config().map(read_fixture).transpose()
    }

    pub fn config<T: DeserializeOwned>(name: &str) -> Result<Option<T>> {
        session(name)?.config().map(parse_fixture).transpose()
    }
}
