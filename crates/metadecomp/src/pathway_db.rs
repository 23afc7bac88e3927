//! External pathway database access (KEGG flat-file format).
//!
//! Requests carry up to [`BATCH_SIZE`] reaction identifiers. The response is a sequence of
//! flat-file records terminated by `///`; the `ENTRY` line names the reaction and the `PATHWAY`
//! section lists one `<map id>  <pathway name>` per line.

use crate::error::LookupError;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

pub const BATCH_SIZE: usize = 10;

/// KEGG global and overview maps. They contain most of metabolism and would swallow every
/// other candidate pathway.
pub const GLOBAL_PATHWAYS: &[&str] = &[
    "Metabolic pathways",
    "Biosynthesis of secondary metabolites",
    "Microbial metabolism in diverse environments",
    "Biosynthesis of antibiotics",
    "Carbon metabolism",
    "2-Oxocarboxylic acid metabolism",
    "Fatty acid metabolism",
    "Degradation of aromatic compounds",
    "Biosynthesis of amino acids",
    "Biosynthesis of cofactors",
    "Nucleotide metabolism",
];

pub trait PathwayDatabase {
    /// Raw flat-file text for the given (normalized) reaction identifiers.
    fn fetch(&self, ids: &[String]) -> Result<String, LookupError>;
}

impl<T: PathwayDatabase + ?Sized> PathwayDatabase for Box<T> {
    fn fetch(&self, ids: &[String]) -> Result<String, LookupError> {
        (**self).fetch(ids)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayEntry {
    pub id: String,
    pub pathways: Vec<String>,
}

/// Strips the `rn:` database prefix and surrounding whitespace.
pub fn normalize_reaction_id(raw: &str) -> Option<String> {
    let t = raw.trim();
    let t = t
        .strip_prefix("rn:")
        .or_else(|| t.strip_prefix("RN:"))
        .unwrap_or(t)
        .trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_ascii_uppercase())
    }
}

pub fn is_global_pathway(name: &str) -> bool {
    GLOBAL_PATHWAYS.iter().any(|g| g.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Pathway,
    Other,
}

/// Parses every record of a flat-file response.
pub fn parse_entries(text: &str) -> Vec<PathwayEntry> {
    let mut out: Vec<PathwayEntry> = Vec::new();
    let mut current: Option<PathwayEntry> = None;
    let mut section = Section::Other;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let starts_with_space = line.starts_with(char::is_whitespace);
        if starts_with_space {
            if section == Section::Pathway {
                if let (Some(entry), Some(name)) = (current.as_mut(), pathway_name(line)) {
                    entry.pathways.push(name);
                }
            }
            continue;
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r),
            None => (line, ""),
        };
        match keyword {
            "///" => {
                out.extend(current.take());
                section = Section::Other;
            }
            "ENTRY" => {
                out.extend(current.take());
                current = rest.split_whitespace().next().map(|id| PathwayEntry {
                    id: id.to_ascii_uppercase(),
                    pathways: Vec::new(),
                });
                section = Section::Other;
            }
            "PATHWAY" => {
                section = Section::Pathway;
                if let (Some(entry), Some(name)) = (current.as_mut(), pathway_name(rest)) {
                    entry.pathways.push(name);
                }
            }
            _ => section = Section::Other,
        }
    }
    out.extend(current);
    out
}

fn pathway_name(line: &str) -> Option<String> {
    let (_map_id, name) = line.trim().split_once(char::is_whitespace)?;
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LookupOutcome {
    /// Candidate pathways per reaction id, global maps removed.
    pub pathways: FxHashMap<String, Vec<String>>,
    /// Reactions that could not be resolved.
    pub failures: Vec<(String, LookupError)>,
}

/// Resolves pathway names for `ids`, batching requests and retrying one by one when a batch
/// fails or comes back incomplete.
pub fn lookup_pathways(db: &dyn PathwayDatabase, ids: &[String]) -> LookupOutcome {
    let mut outcome = LookupOutcome::default();

    for batch in ids.chunks(BATCH_SIZE) {
        let mut missing: Vec<&String> = Vec::new();
        match db.fetch(batch) {
            Ok(text) => {
                let mut found: FxHashMap<String, Vec<String>> = parse_entries(&text)
                    .into_iter()
                    .map(|e| (e.id, e.pathways))
                    .collect();
                for id in batch {
                    match found.remove(id) {
                        Some(p) => record(&mut outcome, id, p),
                        None => missing.push(id),
                    }
                }
            }
            Err(err) => {
                debug!(size = batch.len(), %err, "pathway batch failed");
                if batch.len() == 1 {
                    fail(&mut outcome, &batch[0], err);
                    continue;
                }
                missing.extend(batch.iter());
            }
        }

        if missing.is_empty() {
            continue;
        }
        if batch.len() == 1 {
            for id in missing {
                fail(&mut outcome, id, LookupError::EmptyResponse);
            }
            continue;
        }
        for id in missing {
            let single = std::slice::from_ref(id);
            match db.fetch(single) {
                Ok(text) => match parse_entries(&text).into_iter().find(|e| &e.id == id) {
                    Some(e) => record(&mut outcome, id, e.pathways),
                    None => fail(&mut outcome, id, LookupError::EmptyResponse),
                },
                Err(err) => fail(&mut outcome, id, err),
            }
        }
    }

    outcome
}

fn record(outcome: &mut LookupOutcome, id: &str, pathways: Vec<String>) {
    let mut kept: Vec<String> = Vec::with_capacity(pathways.len());
    for p in pathways {
        if !is_global_pathway(&p) && !kept.contains(&p) {
            kept.push(p);
        }
    }
    outcome.pathways.insert(id.to_string(), kept);
}

fn fail(outcome: &mut LookupOutcome, id: &str, err: LookupError) {
    warn!(reaction = id, %err, "pathway lookup failed");
    outcome.failures.push((id.to_string(), err));
}

/// Serves records from a pre-downloaded flat file.
#[derive(Debug, Clone, Default)]
pub struct FlatFileDatabase {
    records: FxHashMap<String, String>,
}

impl FlatFileDatabase {
    pub fn from_text(text: &str) -> Self {
        let mut records: FxHashMap<String, String> = FxHashMap::default();
        let mut block = String::new();
        for line in text.lines() {
            block.push_str(line);
            block.push('\n');
            if line.trim_end() == "///" {
                if let Some(entry) = parse_entries(&block).into_iter().next() {
                    records.insert(entry.id, std::mem::take(&mut block));
                }
                block.clear();
            }
        }
        if let Some(entry) = parse_entries(&block).into_iter().next() {
            block.push_str("///\n");
            records.insert(entry.id, block);
        }
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PathwayDatabase for FlatFileDatabase {
    fn fetch(&self, ids: &[String]) -> Result<String, LookupError> {
        let mut out = String::new();
        for id in ids {
            if let Some(block) = self.records.get(id) {
                out.push_str(block);
            }
        }
        if out.is_empty() {
            Err(LookupError::EmptyResponse)
        } else {
            Ok(out)
        }
    }
}

#[cfg(feature = "http")]
pub use http::KeggRestClient;

#[cfg(feature = "http")]
mod http {
    use super::PathwayDatabase;
    use crate::error::LookupError;
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "https://rest.kegg.jp";

    /// Blocking client for the KEGG REST `get` operation.
    #[derive(Debug, Clone)]
    pub struct KeggRestClient {
        client: reqwest::blocking::Client,
        base_url: String,
    }

    impl KeggRestClient {
        pub fn new(timeout: Duration) -> Result<Self, LookupError> {
            Self::with_base_url(DEFAULT_BASE_URL, timeout)
        }

        pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(to_lookup_error)?;
            Ok(Self {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
            })
        }
    }

    impl PathwayDatabase for KeggRestClient {
        fn fetch(&self, ids: &[String]) -> Result<String, LookupError> {
            let query: Vec<String> = ids.iter().map(|id| format!("rn:{id}")).collect();
            let url = format!("{}/get/{}", self.base_url, query.join("+"));
            let resp = self.client.get(&url).send().map_err(to_lookup_error)?;
            if !resp.status().is_success() {
                return Err(LookupError::Request {
                    message: format!("HTTP {}", resp.status()),
                });
            }
            let text = resp.text().map_err(to_lookup_error)?;
            if text.trim().is_empty() {
                return Err(LookupError::EmptyResponse);
            }
            Ok(text)
        }
    }

    fn to_lookup_error(err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout
        } else {
            LookupError::Request {
                message: err.to_string(),
            }
        }
    }
}
