use std::fmt;
use std::io::Read;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::warn;

use crate::error::{MenuError, Result};
use crate::source::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchoolLevel {
    Elementary,
    Middle,
    High,
}

impl SchoolLevel {
    pub const ALL: [Self; 3] = [Self::Elementary, Self::Middle, Self::High];

    pub fn label(self) -> &'static str {
        match self {
            Self::Elementary => "Elementary",
            Self::Middle => "Middle",
            Self::High => "High",
        }
    }
}

impl FromStr for SchoolLevel {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        let word = s.split_whitespace().next().unwrap_or_default().to_ascii_lowercase();
        match word.as_str() {
            "elementary" | "es" | "elem" => Ok(Self::Elementary),
            "middle" | "ms" => Ok(Self::Middle),
            "high" | "hs" => Ok(Self::High),
            _ => Err(MenuError::UnknownLevel(s.trim().to_string())),
        }
    }
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meal {
    Lunch,
    Breakfast,
}

impl Meal {
    /// Path segment the Nutrislice weeks endpoint expects.
    pub fn menu_type(self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Breakfast => "breakfast",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Lunch => "Lunch",
            Self::Breakfast => "Breakfast",
        }
    }
}

impl FromStr for Meal {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lunch" => Ok(Self::Lunch),
            "breakfast" => Ok(Self::Breakfast),
            _ => Err(MenuError::UnknownMeal(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct School {
    pub name: String,
    pub slug: String,
    pub level: SchoolLevel,
}

#[derive(Deserialize)]
struct Row {
    #[serde(default)]
    name: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    level: String,
}

fn normalize_header(h: &str) -> String {
    match h.trim().to_ascii_lowercase().as_str() {
        "school name" | "school" => "name".to_string(),
        "school type" | "type" => "level".to_string(),
        other => other.to_string(),
    }
}

pub fn parse_schools<R: Read>(reader: R) -> Result<Vec<School>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).flexible(true).from_reader(reader);

    let headers: StringRecord = rdr.headers()?.iter().map(normalize_header).collect();
    rdr.set_headers(headers);

    let mut schools = Vec::new();
    for (i, row) in rdr.deserialize::<Row>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = row?;

        if row.slug.is_empty() {
            warn!(line, name = %row.name, "skipping school with no slug");
            continue;
        }

        let level = row
            .level
            .parse()
            .map_err(|e: MenuError| MenuError::SchoolRow { row: line, message: e.to_string() })?;

        let name = if row.name.is_empty() { row.slug.clone() } else { row.name };
        schools.push(School { name, slug: row.slug, level });
    }

    Ok(schools)
}

pub fn load_schools(source: &Source, agent: &ureq::Agent) -> Result<Vec<School>> {
    let bytes = source.read_bytes(agent)?;
    parse_schools(bytes.as_slice())
}

pub fn filter_by_level(schools: &[School], level: Option<SchoolLevel>) -> Vec<School> {
    schools.iter().filter(|s| level.is_none_or(|l| s.level == l)).cloned().collect()
}
