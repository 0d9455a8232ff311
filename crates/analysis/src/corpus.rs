use once_cell::sync::Lazy;
use regex::Regex;
use speclens_protocol::TaskProgress;
use std::collections::BTreeMap;

/// Stable logical names for the canonical artifacts. Supporting documents
/// use prefixed keys such as `contracts/auth` or `checklists/requirements`.
pub mod keys {
    pub const SPEC: &str = "spec";
    pub const PLAN: &str = "plan";
    pub const TASKS: &str = "tasks";
    pub const RESEARCH: &str = "research";
    pub const DATA_MODEL: &str = "data-model";
    pub const CONSTITUTION: &str = "constitution";

    pub const CANONICAL: [&str; 6] = [SPEC, PLAN, TASKS, RESEARCH, DATA_MODEL, CONSTITUTION];
}

/// `- [ ]` / `- [x]` task lines.
static CHECKBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[-*]\s*\[( |x|X)\]").expect("checkbox pattern"));

/// An immutable snapshot of the analyzed document set, keyed by logical
/// name. Loaded fresh per operation; never cached across calls.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: BTreeMap<String, String>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(docs: BTreeMap<String, String>) -> Self {
        Self { docs }
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.docs.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.docs.contains_key(key)
    }

    /// Present documents in key order. BTreeMap iteration keeps pass output
    /// deterministic across runs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.docs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Presence of every canonical key plus any extra supplied keys.
    pub fn inventory(&self) -> BTreeMap<String, bool> {
        let mut inventory: BTreeMap<String, bool> = keys::CANONICAL
            .iter()
            .map(|k| (k.to_string(), self.contains(k)))
            .collect();
        for key in self.docs.keys() {
            inventory.entry(key.clone()).or_insert(true);
        }
        inventory
    }

    /// Checkbox completion over the tasks document. A tasks document with
    /// no checkbox lines is malformed for this concern and yields `None`.
    pub fn task_progress(&self) -> Option<TaskProgress> {
        let tasks = self.get(keys::TASKS)?;
        let mut completed = 0;
        let mut total = 0;
        for capture in CHECKBOX_RE.captures_iter(tasks) {
            total += 1;
            if capture
                .get(1)
                .is_some_and(|m| m.as_str().eq_ignore_ascii_case("x"))
            {
                completed += 1;
            }
        }
        TaskProgress::from_counts(completed, total)
    }
}
