//! Run configuration.
//!
//! [`DecompositionConfig`] is the plain value consumed by [`run`](crate::algorithm::run).
//! [`ConfigDocument`] is the loosely typed JSON form settings arrive in from a front end; numeric
//! settings that fail to parse fall back to the documented defaults instead of failing the run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const DEFAULT_SEPARATOR: &str = ",";
/// Pathways with fewer candidate reactions than this are discarded.
pub const DEFAULT_MIN_PATHWAY_COUNT: usize = 2;
/// Used when an algorithm requires cloning but no threshold was configured.
pub const DEFAULT_CLONING_DEGREE: usize = 8;
/// Minimum node count for a default-subsystem component to stand on its own.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransporterMode {
    /// Neighboring species span at least two compartments.
    #[default]
    Spanning,
    /// Exactly one in-edge and one out-edge, with endpoints in different compartments.
    SingleInOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// Separates several subsystem names inside one annotation value.
    pub separator: String,
    pub min_pathway_count: usize,
    /// Species whose original degree is at least this are cloned before the run.
    pub cloning_degree_threshold: Option<usize>,
    pub add_transporter_subsystem: bool,
    pub transporter_mode: TransporterMode,
    pub add_default_subsystem: bool,
    pub split_default_subsystem: bool,
    pub split_threshold: usize,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            min_pathway_count: DEFAULT_MIN_PATHWAY_COUNT,
            cloning_degree_threshold: None,
            add_transporter_subsystem: false,
            transporter_mode: TransporterMode::default(),
            add_default_subsystem: false,
            split_default_subsystem: false,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
        }
    }
}

impl DecompositionConfig {
    /// Reads settings from a document; missing keys keep their defaults.
    ///
    /// Recognized keys: `separator`, `min_pathway_count`, `cloning.degree_threshold`,
    /// `transporter.enabled`, `transporter.mode`, `default_subsystem.enabled`,
    /// `default_subsystem.split`, `default_subsystem.split_threshold`.
    pub fn from_document(doc: &ConfigDocument) -> Self {
        let mut out = Self::default();

        if let Some(sep) = doc.get_str("separator") {
            if !sep.is_empty() {
                out.separator = sep.to_string();
            }
        }
        out.min_pathway_count =
            doc.get_usize_or("min_pathway_count", DEFAULT_MIN_PATHWAY_COUNT);
        if doc.get("cloning.degree_threshold").is_some() {
            out.cloning_degree_threshold =
                Some(doc.get_usize_or("cloning.degree_threshold", DEFAULT_CLONING_DEGREE));
        }
        if let Some(v) = doc.get_bool("transporter.enabled") {
            out.add_transporter_subsystem = v;
        }
        match doc.get_str("transporter.mode") {
            Some("single_in_out") => out.transporter_mode = TransporterMode::SingleInOut,
            Some("spanning") | None => {}
            Some(other) => {
                warn!(mode = other, "unknown transporter mode; using spanning");
            }
        }
        if let Some(v) = doc.get_bool("default_subsystem.enabled") {
            out.add_default_subsystem = v;
        }
        if let Some(v) = doc.get_bool("default_subsystem.split") {
            out.split_default_subsystem = v;
        }
        out.split_threshold =
            doc.get_usize_or("default_subsystem.split_threshold", DEFAULT_SPLIT_THRESHOLD);

        out
    }
}

/// Parses a user-entered threshold, substituting `default` when the text is not a
/// non-negative integer.
pub fn parse_threshold(text: &str, default: usize) -> usize {
    match text.trim().parse::<usize>() {
        Ok(v) => v,
        Err(_) => {
            warn!(input = text, default, "unparsable threshold; using default");
            default
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument(Value);

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl ConfigDocument {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        if cur.is_null() { None } else { Some(cur) }
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        match self.get(dotted_path)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Accepts a JSON number or a numeric string.
    pub fn get_usize(&self, dotted_path: &str) -> Option<usize> {
        match self.get(dotted_path)? {
            Value::Number(n) => n.as_u64().map(|v| v as usize),
            Value::String(s) => s.trim().parse::<usize>().ok(),
            _ => None,
        }
    }

    fn get_usize_or(&self, dotted_path: &str, default: usize) -> usize {
        let Some(raw) = self.get(dotted_path) else {
            return default;
        };
        match self.get_usize(dotted_path) {
            Some(v) => v,
            None => {
                warn!(key = dotted_path, value = %raw, default, "unparsable number; using default");
                default
            }
        }
    }
}
