//! Nagios performance data: `name=value;warning;critical`

use crate::error::CheckError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct PerfData {
    pub name: String,
    pub value: f64,
    pub warning: Option<f64>,
    pub critical: Option<f64>,
}

impl PerfData {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
            warning: None,
            critical: None,
        }
    }

    pub fn with_levels(mut self, warning: f64, critical: f64) -> Self {
        self.warning = Some(warning);
        self.critical = Some(critical);
        self
    }
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.contains(' ') || self.name.contains('=') {
            write!(f, "'{}'={}", self.name, self.value)?;
        } else {
            write!(f, "{}={}", self.name, self.value)?;
        }

        if self.warning.is_some() || self.critical.is_some() {
            write!(
                f,
                ";{};{}",
                format_level(self.warning),
                format_level(self.critical)
            )?;
        }
        Ok(())
    }
}

fn format_level(level: Option<f64>) -> String {
    level.map(|v| v.to_string()).unwrap_or_default()
}

impl FromStr for PerfData {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed =
            || CheckError::invalid_metric(format!("malformed performance data '{}'", s));

        let s = s.trim();
        let (name, rest) = if let Some(quoted) = s.strip_prefix('\'') {
            let (name, rest) = quoted.split_once("'=").ok_or_else(malformed)?;
            (name, rest)
        } else {
            s.split_once('=').ok_or_else(malformed)?
        };
        if name.is_empty() {
            return Err(malformed());
        }

        let mut fields = rest.split(';');
        let value = fields
            .next()
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(malformed)?;
        let warning = parse_level(fields.next()).map_err(|_| malformed())?;
        let critical = parse_level(fields.next()).map_err(|_| malformed())?;

        Ok(Self {
            name: name.to_string(),
            value,
            warning,
            critical,
        })
    }
}

fn parse_level(field: Option<&str>) -> Result<Option<f64>, std::num::ParseFloatError> {
    match field {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

/// Trailing ` |a=1;2;3 b=4` tag covering every entry, empty when there is nothing to tag
pub fn render(entries: &[PerfData]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let tags: Vec<String> = entries.iter().map(|entry| entry.to_string()).collect();
    format!(" |{}", tags.join(" "))
}

/// Parse the performance data part of a status line
pub fn parse(line: &str) -> Result<Vec<PerfData>, CheckError> {
    let Some((_, tag)) = line.split_once('|') else {
        return Ok(Vec::new());
    };

    split_entries(tag)
        .into_iter()
        .map(|entry| entry.parse())
        .collect()
}

/// Splits on whitespace outside single quotes
fn split_entries(tag: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in tag.chars() {
        match c {
            '\'' => {
                quoted = !quoted;
                current.push(c);
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    entries.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        entries.push(current);
    }
    entries
}
