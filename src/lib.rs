//! jscov-cobertura - JSCoverage to Cobertura converter
//!
//! Reads the JSON line coverage written by JSCoverage and produces a
//! Cobertura XML report:
//! - One `class` per covered file, all inside a single `application` package
//! - Line and package line rates computed from hit/interesting line counts
//! - Branch rate and complexity fixed at zero

pub mod config;
pub mod coverage;
pub mod error;

use std::path::Path;

pub use config::Config;
pub use coverage::{
    parse_jscoverage_str, read_jscoverage, render_cobertura, transform, write_cobertura,
    ClassReport, CoverageInput, CoverageReport, LineReport, PackageReport,
};
pub use error::{ConvertError, Result};

/// Read `input`, transform it and write the Cobertura report to `output`.
///
/// Nothing is written unless the whole input is valid.
pub fn convert_file(input: &Path, output: &Path) -> Result<CoverageReport> {
    let coverage = read_jscoverage(input)?;
    let report = transform(&coverage);
    write_cobertura(&report, output)?;
    Ok(report)
}

/// Same as [`convert_file`] for in-memory content
pub fn convert_str(json: &str) -> Result<String> {
    let coverage = parse_jscoverage_str(json)?;
    render_cobertura(&transform(&coverage))
}
