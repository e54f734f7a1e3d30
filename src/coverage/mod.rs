//! Coverage module
//!
//! Provides:
//! - JSCoverage JSON reading
//! - Transformation into the Cobertura report model
//! - Cobertura XML writing
//! - Console summary

mod cobertura;
mod jscoverage;
mod summary;
mod transformer;

pub use cobertura::*;
pub use jscoverage::*;
pub use summary::*;
pub use transformer::*;

/// Name of the single synthetic package every class is placed in
pub const PACKAGE_NAME: &str = "application";

/// Per-line hit counts for one source file; `None` marks a non-executable line
pub type LineCoverage = Vec<Option<u64>>;

/// Parsed JSCoverage input, keyed by file path in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageInput {
    pub files: Vec<(String, LineCoverage)>,
}

impl CoverageInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, lines: LineCoverage) -> Self {
        self.files.push((path.into(), lines));
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Complete Cobertura report: `coverage > packages > package`
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub package: PackageReport,
}

impl CoverageReport {
    pub fn lines_covered(&self) -> u64 {
        self.package.hit_lines
    }

    pub fn lines_valid(&self) -> u64 {
        self.package.interesting_lines
    }

    pub fn line_rate(&self) -> f64 {
        self.package.line_rate
    }
}

/// The synthetic package holding every class
#[derive(Debug, Clone, PartialEq)]
pub struct PackageReport {
    pub name: String,
    pub line_rate: f64,
    pub hit_lines: u64,
    pub interesting_lines: u64,
    pub classes: Vec<ClassReport>,
}

/// Coverage for a single source file
#[derive(Debug, Clone, PartialEq)]
pub struct ClassReport {
    pub filename: String,
    pub line_rate: f64,
    pub hit_lines: u64,
    pub interesting_lines: u64,
    pub lines: Vec<LineReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineReport {
    /// 0-based index into the source coverage array
    pub number: usize,
    pub hits: u64,
    pub branch: bool,
}

/// Ratio of hit to interesting lines, 0.0 when nothing is interesting
pub fn line_rate(hit_lines: u64, interesting_lines: u64) -> f64 {
    if interesting_lines == 0 {
        return 0.0;
    }
    hit_lines as f64 / interesting_lines as f64
}
