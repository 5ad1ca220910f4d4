use std::collections::HashSet;
use std::fs;

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use harbor_core::{Category, CategoryId, Record, RecordId};

/// Boat types and boats the in-memory backend starts with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub boats: Vec<Record>,
}

impl Seed {
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for boat in &self.boats {
            if boat.id.is_empty() {
                bail!("boat '{}' has no Id", boat.name);
            }
            if !ids.insert(&boat.id) {
                bail!("duplicate boat Id '{}'", boat.id);
            }
            if let Some(type_id) = &boat.boat_type_id {
                if !self.categories.iter().any(|c| &c.id == type_id) {
                    bail!(
                        "boat '{}' references unknown boat type '{}'",
                        boat.id,
                        type_id.as_str()
                    );
                }
            }
        }
        Ok(())
    }
}

pub fn load_seed(path: &Utf8Path) -> Result<Seed> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read seed file {path}"))?;
    let seed: Seed = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file {path}"))?;
    seed.validate()
        .with_context(|| format!("Invalid seed file {path}"))?;
    Ok(seed)
}

fn category(id: &str, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
    }
}

fn boat(id: &str, name: &str, type_id: &str, length: f64, price: f64, description: &str) -> Record {
    Record {
        id: RecordId::new(id),
        name: name.to_string(),
        length: Some(length),
        price: Some(price),
        description: description.to_string(),
        boat_type_id: Some(CategoryId::new(type_id)),
        picture_url: Some(format!("/resource/boats/{id}.png")),
    }
}

/// Built-in boats used when no seed file is given.
pub fn sample_seed() -> Seed {
    Seed {
        categories: vec![
            category("t1", "Sport"),
            category("t2", "Fishing"),
            category("t3", "Sailboat"),
        ],
        boats: vec![
            boat("b1", "Sea Ray Sundancer", "t1", 32.0, 189_000.0, "Twin inboards, sleeps four"),
            boat("b2", "Boston Whaler Montauk", "t2", 17.0, 38_500.0, "Unsinkable center console"),
            boat("b3", "Catalina 22", "t3", 22.0, 12_000.0, "Trailerable daysailer"),
            boat("b4", "MasterCraft X24", "t1", 24.0, 210_000.0, "Wake surf tower"),
            boat("b5", "Grady-White Freedom", "t2", 25.0, 142_000.0, "Dual console, livewell"),
        ],
    }
}
