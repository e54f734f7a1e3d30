//! JSCoverage to Cobertura transformation

use super::{
    line_rate, ClassReport, CoverageInput, CoverageReport, LineReport, PackageReport, PACKAGE_NAME,
};

/// Build the Cobertura report for a parsed input.
///
/// Every file becomes one class of the single `application` package, in
/// input order. Null entries are skipped; the remaining entries keep their
/// array index as line number.
pub fn transform(input: &CoverageInput) -> CoverageReport {
    let classes: Vec<ClassReport> = input
        .files
        .iter()
        .map(|(path, coverage)| transform_class(path, coverage))
        .collect();

    let (hit_lines, interesting_lines) = classes
        .iter()
        .fold((0u64, 0u64), |(hit, interesting), class| {
            (hit + class.hit_lines, interesting + class.interesting_lines)
        });

    CoverageReport {
        package: PackageReport {
            name: PACKAGE_NAME.to_string(),
            line_rate: line_rate(hit_lines, interesting_lines),
            hit_lines,
            interesting_lines,
            classes,
        },
    }
}

fn transform_class(path: &str, coverage: &[Option<u64>]) -> ClassReport {
    let lines: Vec<LineReport> = coverage
        .iter()
        .enumerate()
        .filter_map(|(number, entry)| {
            entry.map(|hits| LineReport {
                number,
                hits,
                branch: false,
            })
        })
        .collect();

    let interesting_lines = lines.len() as u64;
    let hit_lines = lines.iter().filter(|l| l.hits > 0).count() as u64;

    ClassReport {
        filename: path.to_string(),
        line_rate: line_rate(hit_lines, interesting_lines),
        hit_lines,
        interesting_lines,
        lines,
    }
}
