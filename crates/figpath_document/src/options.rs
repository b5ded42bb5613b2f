//! Document walking and conversion options
//!
//! All options deserialize from the `[document]` table of `figpath.toml`;
//! missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// What to do when a path in the document fails to parse
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail the whole document and leave it untouched
    #[default]
    Abort,
    /// Leave the malformed path as it is and keep going
    Skip,
}

/// Options for locating and converting path data in a document tree
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentOptions {
    /// Node fields holding arrays of `{ "data": "<path>" }` records
    #[serde(default = "default_path_fields")]
    pub path_fields: Vec<String>,
    /// Node field holding the array of child nodes
    #[serde(default = "default_children_field")]
    pub children_field: String,
    /// Conversion threads; 0 uses the available parallelism
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

fn default_path_fields() -> Vec<String> {
    vec!["vectorPaths".to_string(), "fillGeometry".to_string()]
}

fn default_children_field() -> String {
    "children".to_string()
}

fn default_workers() -> usize {
    1
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            path_fields: default_path_fields(),
            children_field: default_children_field(),
            workers: default_workers(),
            on_error: ErrorPolicy::default(),
        }
    }
}

impl DocumentOptions {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_error_policy(mut self, on_error: ErrorPolicy) -> Self {
        self.on_error = on_error;
        self
    }

    /// Number of threads to use for `jobs` paths
    pub fn worker_count(&self, jobs: usize) -> usize {
        let workers = if self.workers == 0 {
            std::thread::available_parallelism().map_or(1, |n| n.get())
        } else {
            self.workers
        };
        workers.clamp(1, jobs.max(1))
    }
}
