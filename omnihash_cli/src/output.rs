//! Result rendering: colored text lines or one JSON document

use colored::Colorize;
use omnihash_core::HashReport;
use serde_json::{Map, Value, json};

/// Column where digests start; algorithm names plus a colon pad up to it.
const ALGO_COLUMN: usize = 24;

pub struct Renderer {
    json: bool,
    collected: Vec<Value>,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            collected: Vec::new(),
        }
    }

    /// Per-input banner, suppressed in JSON mode. Goes to stdout when the
    /// invocation hashes several inputs so results stay grouped with their
    /// banners, to stderr otherwise.
    pub fn banner(&self, noun: &str, name: Option<&str>, many: bool) {
        if self.json {
            return;
        }
        let line = match name {
            Some(name) => format!("Hashing {noun} {}..", name.bold()),
            None => format!("Hashing {}..", noun.bold()),
        };
        if many {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }

    pub fn skipping(&self, input: &str) {
        eprintln!("{} directory '{input}'..", "Skipping".yellow());
    }

    /// Render one input's report.
    pub fn report(&mut self, name: Option<&str>, report: &HashReport) {
        if self.json {
            let mut object = Map::new();
            for (algo, digest) in report.iter() {
                object.insert(algo.to_string(), json!(digest));
            }
            if let Some(name) = name {
                object.insert("NAME".to_string(), json!(name));
            }
            self.collected.push(Value::Object(object));
        } else {
            for (algo, digest) in report.iter() {
                let pad = ALGO_COLUMN.saturating_sub(algo.len() + 1);
                println!("  {}:{}{digest}", algo.green(), " ".repeat(pad));
            }
            if report.no_match() {
                eprintln!("{} found!", "No matches".red());
            }
        }
    }

    /// Emit the collected JSON document, if any.
    pub fn finish(&self) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&self.collected)?);
        }
        Ok(())
    }
}
