//! Animal speed rows: CSV parsing, filtering and ranking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ChartError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    Carnivore,
    Herbivore,
    Omnivore,
}

impl Diet {
    /// Legend order.
    pub const ALL: [Diet; 3] = [Diet::Carnivore, Diet::Herbivore, Diet::Omnivore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Diet::Carnivore => "carnivore",
            Diet::Herbivore => "herbivore",
            Diet::Omnivore  => "omnivore",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Diet::Carnivore => "Carnivore",
            Diet::Herbivore => "Herbivore",
            Diet::Omnivore  => "Omnivore",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Diet::Carnivore => "#ef4444",
            Diet::Herbivore => "#22c55e",
            Diet::Omnivore  => "#3b82f6",
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Diet {
    type Err = ();

    /// Accepts any casing and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "carnivore" => Ok(Diet::Carnivore),
            "herbivore" => Ok(Diet::Herbivore),
            "omnivore"  => Ok(Diet::Omnivore),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimalDatum {
    pub name: String,
    /// km/h
    pub speed: f64,
    pub diet: Diet,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    speed: Option<String>,
    #[serde(default)]
    diet: Option<String>,
}

impl RawRow {
    fn into_datum(self) -> Option<AnimalDatum> {
        let name = self.name.as_deref().unwrap_or("").trim().to_string();
        if name.is_empty() {
            return None;
        }
        let speed: f64 = self.speed.as_deref()?.trim().parse().ok()?;
        if !speed.is_finite() || speed <= 0.0 {
            return None;
        }
        let diet = self.diet.as_deref()?.parse().ok()?;
        Some(AnimalDatum { name, speed, diet })
    }
}

/// Parse `name,speed,diet` CSV text, keeping only rows with a name, a
/// positive numeric speed and a known diet. Malformed rows are skipped.
pub fn parse_animals(csv_text: &str) -> Result<Vec<AnimalDatum>, ChartError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    // Fail early on an unreadable header row
    reader.headers()?;

    let mut kept = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<RawRow>() {
        match result.ok().and_then(RawRow::into_datum) {
            Some(datum) => kept.push(datum),
            None => skipped += 1,
        }
    }

    debug!(kept = kept.len(), skipped, "parsed animal speed rows");
    Ok(kept)
}

/// Fastest `n` animals, fastest first. Ties keep their input order.
pub fn top_by_speed(mut rows: Vec<AnimalDatum>, n: usize) -> Vec<AnimalDatum> {
    rows.sort_by(|a, b| b.speed.total_cmp(&a.speed));
    rows.truncate(n);
    rows
}
