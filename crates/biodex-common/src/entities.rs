/// Core entity types mirroring the hosted backend's tables.
/// These are Rust representations of the `species`, `profiles` and `comments` rows.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Kingdom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Kingdom {
    #[default]
    Animalia,
    Plantae,
    Fungi,
    Protista,
    Archaea,
    Bacteria,
}

impl Kingdom {
    /// Every kingdom, in the order the add/edit forms list them.
    pub const ALL: [Kingdom; 6] = [
        Kingdom::Animalia,
        Kingdom::Plantae,
        Kingdom::Fungi,
        Kingdom::Protista,
        Kingdom::Archaea,
        Kingdom::Bacteria,
    ];

    /// Serialize to the string stored in the DB.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kingdom::Animalia => "Animalia",
            Kingdom::Plantae  => "Plantae",
            Kingdom::Fungi    => "Fungi",
            Kingdom::Protista => "Protista",
            Kingdom::Archaea  => "Archaea",
            Kingdom::Bacteria => "Bacteria",
        }
    }
}

impl fmt::Display for Kingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKingdom(pub String);

impl fmt::Display for UnknownKingdom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown kingdom: {}", self.0)
    }
}

impl std::error::Error for UnknownKingdom {}

impl FromStr for Kingdom {
    type Err = UnknownKingdom;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kingdom::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKingdom(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Species {
    pub id: i64,
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub total_population: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub endangered: bool,
    pub author: Uuid,
}

impl Species {
    pub fn is_authored_by(&self, user: Uuid) -> bool {
        self.author == user
    }

    /// Population with thousands separators, or "Unknown".
    pub fn population_label(&self) -> String {
        match self.total_population {
            Some(n) => group_thousands(n),
            None => "Unknown".to_string(),
        }
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The editable columns of a species row, as produced by form validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesFields {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub kingdom: Kingdom,
    pub total_population: Option<i64>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub endangered: bool,
}

/// Insert payload: the validated fields plus the owning profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSpecies {
    pub author: Uuid,
    #[serde(flatten)]
    pub fields: SpeciesFields,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub biography: Option<String>,
}

/// The two columns fetched when resolving comment author names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileName {
    pub id: Uuid,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub species_id: i64,
    pub author: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub species_id: i64,
    pub author: Uuid,
    pub content: String,
}

/// A comment with its author's display name resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_display_name: String,
}

pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kingdom_round_trips_through_str() {
        for k in Kingdom::ALL {
            assert_eq!(k.as_str().parse::<Kingdom>().unwrap(), k);
        }
        assert!("animalia".parse::<Kingdom>().is_err());
    }

    #[test]
    fn test_species_deserializes_backend_row() {
        let row = serde_json::json!({
            "id": 7,
            "scientific_name": "Cavia porcellus",
            "common_name": "Guinea pig",
            "kingdom": "Animalia",
            "total_population": null,
            "image": null,
            "description": null,
            "author": "3f1c1f0e-9a47-4d55-8d7c-6e8b0d1f2a3b"
        });
        let s: Species = serde_json::from_value(row).unwrap();
        assert_eq!(s.kingdom, Kingdom::Animalia);
        assert!(!s.endangered);
        assert_eq!(s.population_label(), "Unknown");
    }

    #[test]
    fn test_population_label_groups_thousands() {
        assert_eq!(group_thousands(300000), "300,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(999), "999");
    }

    #[test]
    fn test_new_species_flattens_fields() {
        let new = NewSpecies {
            author: Uuid::nil(),
            fields: SpeciesFields {
                scientific_name: "Panthera leo".into(),
                common_name: Some("Lion".into()),
                kingdom: Kingdom::Animalia,
                total_population: Some(20000),
                image: None,
                description: None,
                endangered: true,
            },
        };
        let v = serde_json::to_value(&new).unwrap();
        assert_eq!(v["scientific_name"], "Panthera leo");
        assert_eq!(v["endangered"], true);
        assert!(v.get("fields").is_none());
    }
}
