//! Whole-document path conversion

use figpath_core::{MalformedPathError, PathConverter};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::DocumentError;
use crate::options::{DocumentOptions, ErrorPolicy};
use crate::walk::{collect_sites, write_site, PathSite};

/// A path record whose data was rewritten
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathChange {
    pub pointer: String,
    pub before: String,
    pub after: String,
}

/// A malformed path left untouched under [`ErrorPolicy::Skip`]
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedPath {
    pub pointer: String,
    pub error: MalformedPathError,
}

/// Outcome of converting one document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionReport {
    /// Number of path records visited
    pub paths: usize,
    /// Records whose data changed, in document order
    pub changes: Vec<PathChange>,
    pub skipped: Vec<SkippedPath>,
}

impl ConversionReport {
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Converts every path record in a JSON document tree
#[derive(Clone, Debug, Default)]
pub struct DocumentConverter {
    converter: PathConverter,
    options: DocumentOptions,
}

impl DocumentConverter {
    pub fn new(converter: PathConverter, options: DocumentOptions) -> Self {
        Self { converter, options }
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Convert all path records in place
    ///
    /// Under [`ErrorPolicy::Abort`] the first malformed record in document
    /// order fails the call and `document` is left unmodified.
    pub fn convert(&self, document: &mut Value) -> Result<ConversionReport, DocumentError> {
        let sites = collect_sites(document, &self.options);
        let results = self.convert_sites(&sites)?;

        let mut report = ConversionReport {
            paths: sites.len(),
            ..ConversionReport::default()
        };

        for (site, result) in sites.into_iter().zip(results) {
            match result {
                Ok(after) if after != site.data => {
                    debug!(pointer = %site.pointer, "path converted");
                    report.changes.push(PathChange {
                        pointer: site.pointer,
                        before: site.data,
                        after,
                    });
                }
                Ok(_) => {}
                Err(source) => match self.options.on_error {
                    ErrorPolicy::Abort => {
                        return Err(DocumentError::Path {
                            pointer: site.pointer,
                            source,
                        });
                    }
                    ErrorPolicy::Skip => {
                        warn!(pointer = %site.pointer, error = %source, "skipping malformed path");
                        report.skipped.push(SkippedPath {
                            pointer: site.pointer,
                            error: source,
                        });
                    }
                },
            }
        }

        for change in &report.changes {
            if !write_site(document, &change.pointer, change.after.clone()) {
                warn!(pointer = %change.pointer, "path record vanished before write");
            }
        }

        info!(
            paths = report.paths,
            changed = report.changes.len(),
            skipped = report.skipped.len(),
            "document converted"
        );
        Ok(report)
    }

    /// Convert every site, returning results in site order
    fn convert_sites(
        &self,
        sites: &[PathSite],
    ) -> Result<Vec<Result<String, MalformedPathError>>, DocumentError> {
        let workers = self.options.worker_count(sites.len());
        let converter = self.converter;

        if workers <= 1 {
            return Ok(sites.iter().map(|site| converter.convert(&site.data)).collect());
        }

        let chunk_size = sites.len().div_ceil(workers);
        debug!(workers, chunk_size, "converting paths in parallel");

        std::thread::scope(|scope| {
            let handles: Vec<_> = sites
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|site| converter.convert(&site.data))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            // Join every worker before reporting so none is left running
            let joined: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();

            let mut results = Vec::with_capacity(sites.len());
            for chunk in joined {
                results.extend(chunk.map_err(|_| DocumentError::WorkerPanicked)?);
            }
            Ok(results)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figpath_core::{FormatOptions, MalformedReason};
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "type": "FRAME",
            "name": "Icons",
            "children": [
                {
                    "type": "VECTOR",
                    "vectorPaths": [
                        { "windingRule": "NONZERO", "data": "m 10 10 h 5 v 5 z" },
                        { "data": "M 0 0 L 1 1 Z" }
                    ]
                },
                {
                    "type": "VECTOR",
                    "fillGeometry": [{ "data": "M 0 0 Q 3 3 6 0" }]
                }
            ]
        })
    }

    #[test]
    fn test_converts_in_place() {
        let mut doc = sample();
        let report = DocumentConverter::default().convert(&mut doc).unwrap();

        assert_eq!(report.paths, 3);
        assert_eq!(report.changes.len(), 2);
        assert_eq!(report.changes[0].pointer, "/children/0/vectorPaths/0");
        assert_eq!(report.changes[0].before, "m 10 10 h 5 v 5 z");
        assert_eq!(report.changes[1].pointer, "/children/1/fillGeometry/0");

        assert_eq!(
            doc["children"][0]["vectorPaths"][0]["data"],
            "M 10 10 L 15 10 L 15 15 Z"
        );
        assert_eq!(doc["children"][0]["vectorPaths"][0]["windingRule"], "NONZERO");
        assert_eq!(doc["children"][0]["vectorPaths"][1]["data"], "M 0 0 L 1 1 Z");
        assert_eq!(doc["children"][1]["fillGeometry"][0]["data"], "M 0 0 C 2 2 4 2 6 0");
    }

    #[test]
    fn test_second_pass_is_unchanged() {
        let mut doc = sample();
        let converter = DocumentConverter::default();
        converter.convert(&mut doc).unwrap();
        let report = converter.convert(&mut doc).unwrap();
        assert!(report.is_unchanged());
    }

    #[test]
    fn test_abort_leaves_document_untouched() {
        let mut doc = sample();
        doc["children"][1]["fillGeometry"][0]["data"] = json!("M 0 0 X 1 1");
        let before = doc.clone();

        let err = DocumentConverter::default().convert(&mut doc).unwrap_err();
        match err {
            DocumentError::Path { pointer, source } => {
                assert_eq!(pointer, "/children/1/fillGeometry/0");
                assert_eq!(source.reason, MalformedReason::UnknownCommand('X'));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(doc, before);
    }

    #[test]
    fn test_overflowing_path_fails_like_malformed_data() {
        let mut doc = json!({ "vectorPaths": [{ "data": "M 1e308 0 l 1e308 0" }] });
        let err = DocumentConverter::default().convert(&mut doc).unwrap_err();
        match err {
            DocumentError::Path { pointer, source } => {
                assert_eq!(pointer, "/vectorPaths/0");
                assert_eq!(source.reason, MalformedReason::CoordinateOverflow);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(doc["vectorPaths"][0]["data"], "M 1e308 0 l 1e308 0");
    }

    #[test]
    fn test_skip_keeps_going() {
        let mut doc = sample();
        doc["children"][0]["vectorPaths"][1]["data"] = json!("M 0 0 L 1");
        let options = DocumentOptions::default().with_error_policy(ErrorPolicy::Skip);
        let report = DocumentConverter::new(PathConverter::new(), options)
            .convert(&mut doc)
            .unwrap();

        assert_eq!(report.changes.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].pointer, "/children/0/vectorPaths/1");
        assert_eq!(doc["children"][0]["vectorPaths"][1]["data"], "M 0 0 L 1");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let children: Vec<Value> = (0..40)
            .map(|i| {
                json!({
                    "vectorPaths": [{ "data": format!("m {i} {i} a 5 5 0 0 1 10 0 l 1 2") }]
                })
            })
            .collect();
        let doc = json!({ "children": children });

        let mut sequential = doc.clone();
        let mut parallel = doc.clone();
        let seq_report = DocumentConverter::default()
            .convert(&mut sequential)
            .unwrap();
        let par_report = DocumentConverter::new(
            PathConverter::new(),
            DocumentOptions::default().with_workers(4),
        )
        .convert(&mut parallel)
        .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(seq_report, par_report);
        assert_eq!(par_report.changes[7].pointer, "/children/7/vectorPaths/0");
    }

    #[test]
    fn test_parallel_abort_reports_first_in_document_order() {
        let children: Vec<Value> = (0..12)
            .map(|i| {
                let data = if i == 3 || i == 9 { "M 0 0 L 1" } else { "M 0 0 L 1 1" };
                json!({ "vectorPaths": [{ "data": data }] })
            })
            .collect();
        let mut doc = json!({ "children": children });
        let converter = DocumentConverter::new(
            PathConverter::new(),
            DocumentOptions::default().with_workers(3),
        );
        let err = converter.convert(&mut doc).unwrap_err();
        assert_eq!(err.pointer(), Some("/children/3/vectorPaths/0"));
    }

    #[test]
    fn test_precision_applies() {
        let mut doc = json!({ "vectorPaths": [{ "data": "M 0 0 L 0.123456 1" }] });
        let converter = DocumentConverter::new(
            PathConverter::with_options(FormatOptions::with_precision(2)),
            DocumentOptions::default(),
        );
        converter.convert(&mut doc).unwrap();
        assert_eq!(doc["vectorPaths"][0]["data"], "M 0 0 L 0.12 1");
    }
}
