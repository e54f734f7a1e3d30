//! Cobertura XML format writer

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ClassReport, CoverageReport, LineReport, PackageReport};
use crate::error::{ConvertError, Result};

pub const COBERTURA_DTD: &str = "http://cobertura.sourceforge.net/xml/coverage-03.dtd";

/// Write a report to `path`.
///
/// The document is rendered in memory, written to a temporary sibling file
/// and renamed over the destination, so a failure never leaves a truncated
/// report behind. Missing parent directories are created.
pub fn write_cobertura(report: &CoverageReport, path: &Path) -> Result<()> {
    let xml = render_cobertura(report)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    }

    let tmp_path = temp_path_for(path);
    if let Err(e) = fs::write(&tmp_path, xml) {
        let _ = fs::remove_file(&tmp_path);
        return Err(ConvertError::io(&tmp_path, e));
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(ConvertError::io(path, e));
    }

    Ok(())
}

/// Render a report as a Cobertura XML document
pub fn render_cobertura(report: &CoverageReport) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let doctype = format!(r#"coverage SYSTEM "{}""#, COBERTURA_DTD);
    write(&mut writer, Event::DocType(BytesText::from_escaped(doctype)))?;

    write(&mut writer, Event::Start(BytesStart::new("coverage")))?;
    write(&mut writer, Event::Start(BytesStart::new("packages")))?;
    write_package(&mut writer, &report.package)?;
    write(&mut writer, Event::End(BytesEnd::new("packages")))?;
    write(&mut writer, Event::End(BytesEnd::new("coverage")))?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(|e| ConvertError::Xml {
        message: e.to_string(),
    })?;
    xml.push('\n');
    Ok(xml)
}

fn write_package(writer: &mut Writer<Vec<u8>>, package: &PackageReport) -> Result<()> {
    let line_rate = format_rate(package.line_rate);
    let start = BytesStart::new("package").with_attributes([
        ("branch-rate", "0"),
        ("complexity", "0.0"),
        ("name", package.name.as_str()),
        ("line-rate", line_rate.as_str()),
    ]);

    if package.classes.is_empty() {
        return write(writer, Event::Empty(start));
    }

    write(writer, Event::Start(start))?;
    for class in &package.classes {
        write_class(writer, class)?;
    }
    write(writer, Event::End(BytesEnd::new("package")))
}

fn write_class(writer: &mut Writer<Vec<u8>>, class: &ClassReport) -> Result<()> {
    let line_rate = format_rate(class.line_rate);
    let start = BytesStart::new("class").with_attributes([
        ("filename", class.filename.as_str()),
        ("branch-rate", "0"),
        ("complexity", "0.0"),
        ("name", class.filename.as_str()),
        ("line-rate", line_rate.as_str()),
    ]);

    write(writer, Event::Start(start))?;
    if class.lines.is_empty() {
        write(writer, Event::Empty(BytesStart::new("lines")))?;
    } else {
        write(writer, Event::Start(BytesStart::new("lines")))?;
        for line in &class.lines {
            write_line(writer, line)?;
        }
        write(writer, Event::End(BytesEnd::new("lines")))?;
    }
    write(writer, Event::End(BytesEnd::new("class")))
}

fn write_line(writer: &mut Writer<Vec<u8>>, line: &LineReport) -> Result<()> {
    let branch = line.branch.to_string();
    let number = line.number.to_string();
    let hits = line.hits.to_string();
    let element = BytesStart::new("line").with_attributes([
        ("branch", branch.as_str()),
        ("line", number.as_str()),
        ("hits", hits.as_str()),
    ]);
    write(writer, Event::Empty(element))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| ConvertError::Xml {
        message: e.to_string(),
    })
}

/// Shortest representation that parses back to the same value (`0`, `0.5`, `1`)
pub fn format_rate(rate: f64) -> String {
    format!("{}", rate)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cobertura-coverage.xml".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
