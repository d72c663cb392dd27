//! Zone graph loader.
//!
//! The RON file names zones by their kebab-case ids:
//!
//! ```ron
//! (
//!     streets: [("streets", "Grove Street"), ("main-street", "Downtown")],
//!     downtown: "main-street",
//!     fallback_street: "streets",
//!     names: { "hospital": "Hospital" },
//!     rules: {
//!         "hospital": [Doctor, Location("streets")],
//!     },
//! )
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

use game_core::config::{StreetSpec, ZoneTable};
use game_core::{CardId, ZoneId};

use crate::loaders::{LoadResult, read_file};

/// Card as written in the data file.
#[derive(Debug, serde::Deserialize)]
enum CardSpec {
    Location(String),
    Doctor,
    Merchant,
}

#[derive(Debug, serde::Deserialize)]
struct ZoneGraphSpec {
    streets: Vec<(String, String)>,
    downtown: String,
    fallback_street: String,
    #[serde(default)]
    names: HashMap<String, String>,
    rules: HashMap<String, Vec<CardSpec>>,
}

fn zone(id: &str) -> LoadResult<ZoneId> {
    ZoneId::from_str(id).map_err(|_| anyhow::anyhow!("Unknown zone id '{}'", id))
}

/// Loader for the zone graph from RON files.
pub struct ZoneLoader;

impl ZoneLoader {
    /// Load the zone graph from a RON file.
    pub fn load(path: &Path) -> LoadResult<ZoneTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load zones at {}: {}", path.display(), e))
    }

    /// Parse the zone graph from RON text.
    pub fn parse(content: &str) -> LoadResult<ZoneTable> {
        let spec: ZoneGraphSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse zones RON: {}", e))?;

        let streets = spec
            .streets
            .iter()
            .map(|(id, name)| {
                Ok(StreetSpec {
                    zone: zone(id)?,
                    name: name.clone(),
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        let mut names = BTreeMap::new();
        for (id, name) in spec.names {
            names.insert(zone(&id)?, name);
        }

        let mut rules = BTreeMap::new();
        for (id, cards) in spec.rules {
            let cards = cards
                .into_iter()
                .map(|card| {
                    Ok(match card {
                        CardSpec::Location(target) => CardId::Location(zone(&target)?),
                        CardSpec::Doctor => CardId::Doctor,
                        CardSpec::Merchant => CardId::Merchant,
                    })
                })
                .collect::<LoadResult<Vec<_>>>()?;
            rules.insert(zone(&id)?, cards);
        }

        Ok(ZoneTable {
            streets,
            downtown: zone(&spec.downtown)?,
            fallback_street: zone(&spec.fallback_street)?,
            names,
            rules,
        })
    }
}
