//! JSON report of a finished run.

use distmat_core::{Backend, Describe, Matrix, Product, Shape, Summary};
use log::warn;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MatrixReport {
    pub shape: Shape,
    pub entries: Vec<Vec<Summary>>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub backend: String,
    pub a: MatrixReport,
    pub b: MatrixReport,
    pub result: MatrixReport,
}

impl MatrixReport {
    fn from_matrix<T: Describe>(label: &str, m: &Matrix<T>) -> Self {
        let report = Self {
            shape: m.shape(),
            entries: m.summary_rows(),
        };
        let non_finite = report.non_finite_entries();
        if non_finite > 0 {
            warn!("{label}: {non_finite} entries have NaN or infinite summaries, written as null");
        }
        report
    }

    /// Entries with at least one field JSON cannot represent.
    pub fn non_finite_entries(&self) -> usize {
        self.entries
            .iter()
            .flatten()
            .filter(|s| !s.is_finite())
            .count()
    }
}

impl RunReport {
    pub fn new<T: Describe>(backend: Backend, product: &Product<T>) -> Self {
        Self {
            backend: backend.to_string(),
            a: MatrixReport::from_matrix("A", &product.a),
            b: MatrixReport::from_matrix("B", &product.b),
            result: MatrixReport::from_matrix("result", &product.result),
        }
    }
}

/// Write the report to `path`. A failed write is reported but does not fail the run.
pub fn write<T: Describe>(path: &str, backend: Backend, product: &Product<T>) {
    let report = RunReport::new(backend, product);
    let json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("\nFailed to serialize report: {e}");
            return;
        }
    };
    match std::fs::write(path, json) {
        Ok(()) => println!("\nResults written to {path}"),
        Err(e) => eprintln!("\nFailed to write {path}: {e}"),
    }
}
