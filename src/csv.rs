// src/csv.rs
//! Flat-findings CSV persistence.
//!
//! Seven fixed columns with double-quote escaping. Reading back reproduces
//! the same `(file, unit, line, category, severity)` tuples that were
//! written; rows that do not parse are dropped rather than failing the load.

use crate::types::{Finding, Severity};
use std::io::{self, BufRead, Write};

pub const CSV_HEADER: &str = "Filename,Function,LineNum,Code,Category,Severity,Remediation";

/// Writes the header plus one quoted row per finding.
///
/// # Errors
///
/// Returns the underlying I/O error from the writer.
pub fn write_findings<W: Write>(out: &mut W, findings: &[Finding]) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for finding in findings {
        writeln!(
            out,
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"",
            escape(&finding.file),
            escape(&finding.unit),
            finding.line,
            escape(&finding.code),
            escape(&finding.category),
            finding.severity,
            escape(&finding.remediation),
        )?;
    }
    Ok(())
}

/// Reads findings back from the CSV form, skipping the header, blank lines,
/// and malformed rows.
#[must_use]
pub fn read_findings<R: BufRead>(input: R) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let Ok(line) = line else { continue };
        if index == 0 || line.trim().is_empty() {
            continue;
        }
        let fields = parse_line(&line);
        if fields.len() < 7 {
            continue;
        }
        let Ok(line_num) = fields[2].parse::<usize>() else {
            continue;
        };
        findings.push(Finding {
            file: fields[0].clone(),
            unit: fields[1].clone(),
            line: line_num,
            code: fields[3].clone(),
            category: fields[4].clone(),
            severity: Severity::parse(&fields[5]).unwrap_or(Severity::Medium),
            remediation: fields[6].clone(),
        });
    }
    findings
}

fn escape(field: &str) -> String {
    field.replace('"', "\"\"")
}

fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
