//! Fixtures shared by the Biodex test suites.

use biodex_common::{Comment, Kingdom, Profile, Species};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

pub const ALICE: Uuid = Uuid::from_u128(0x3f1c1f0e_9a47_4d55_8d7c_6e8b0d1f2a3b);
pub const BOB: Uuid = Uuid::from_u128(0x7d2e4b10_51aa_4c0e_b0f3_2c9d8e7f6a15);

pub fn species(id: i64, scientific_name: &str, author: Uuid) -> Species {
    Species {
        id,
        scientific_name: scientific_name.to_string(),
        common_name: None,
        kingdom: Kingdom::Animalia,
        total_population: None,
        image: None,
        description: None,
        endangered: false,
        author,
    }
}

pub fn species_row(id: i64, scientific_name: &str, author: Uuid) -> Value {
    serde_json::to_value(species(id, scientific_name, author)).expect("species fixture serializes")
}

pub fn profile(id: Uuid, display_name: &str) -> Profile {
    Profile {
        id,
        display_name: display_name.to_string(),
        email: format!("{}@example.org", display_name.to_lowercase()),
        biography: None,
    }
}

pub fn comment(id: Uuid, species_id: i64, author: Uuid, content: &str, minute: u32) -> Comment {
    Comment {
        id,
        species_id,
        author,
        content: content.to_string(),
        created_at: at_minute(minute),
    }
}

pub fn comment_row(id: Uuid, species_id: i64, author: Uuid, content: &str, minute: u32) -> Value {
    serde_json::to_value(comment(id, species_id, author, content, minute))
        .expect("comment fixture serializes")
}

pub fn at_minute(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap()
}

pub fn rows(values: Vec<Value>) -> String {
    json!(values).to_string()
}

/// Animal speeds with a mix of rows the chart must keep and rows it must drop.
pub const SAMPLE_ANIMALS_CSV: &str = "\
name,speed,diet
Cheetah,120,carnivore
Pronghorn,88,herbivore
Ostrich, 70 ,Herbivore
Grizzly bear,56,omnivore
Sloth,0.27,herbivore
Mystery,fast,carnivore
Rock,0,herbivore
Vampire bat,40,sanguivore
,50,carnivore
Tortoise,-1,herbivore
";
