//! Progress state — visit records keyed by location id, plus the player name.
//!
//! Persisted layout (one localStorage slot):
//!
//! ```text
//! { "visited": [ { "id": "blair", "photo": "data:image/jpeg;base64,...", "timestamp": "2026-04-01T14:03:11.201Z" } ],
//!   "playerName": "Ada" }
//! ```
//!
//! Only the visit set and the name are stored. Points, tiers and percentages
//! are always derived from them by the store.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{TrailError, TrailResult};

/// Photographic proof of a visit, as a `data:image/...;base64,...` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoProof(String);

impl PhotoProof {
    /// Validate a data URI produced by the browser's file reader.
    pub fn from_data_uri(uri: &str) -> TrailResult<Self> {
        let uri = uri.trim();
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| TrailError::InvalidPhoto("expected a data: URI".to_string()))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| TrailError::InvalidPhoto("expected base64 encoding".to_string()))?;
        match mime.strip_prefix("image/") {
            Some(subtype) if !subtype.is_empty() => {}
            _ => {
                return Err(TrailError::InvalidPhoto(format!(
                    "unsupported media type '{}'",
                    mime
                )));
            }
        }
        if payload.is_empty() {
            return Err(TrailError::InvalidPhoto("empty image data".to_string()));
        }
        STANDARD
            .decode(payload)
            .map_err(|e| TrailError::InvalidPhoto(format!("bad base64 payload: {}", e)))?;
        Ok(Self(uri.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Media type, e.g. `image/jpeg`.
    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
            .unwrap_or("")
    }
}

/// One visit to one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoProof>,
    pub timestamp: DateTime<Utc>,
}

/// Wire shape of the persisted slot.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedProgress {
    #[serde(default)]
    visited: Vec<VisitRecord>,
    #[serde(default)]
    player_name: Option<String>,
}

/// The mutable record of a player's hunt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressState {
    visits: BTreeMap<String, VisitRecord>,
    player_name: String,
}

impl ProgressState {
    /// Insert or overwrite the record for `record.id`.
    pub fn insert(&mut self, record: VisitRecord) {
        self.visits.insert(record.id.clone(), record);
    }

    pub fn remove(&mut self, id: &str) -> Option<VisitRecord> {
        self.visits.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&VisitRecord> {
        self.visits.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.visits.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn visits(&self) -> impl Iterator<Item = &VisitRecord> {
        self.visits.values()
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.trim().to_string();
    }

    pub fn clear(&mut self) {
        self.visits.clear();
        self.player_name.clear();
    }

    /// Drop records whose id is not in `catalog`. Returns the dropped ids.
    pub fn retain_catalog(&mut self, catalog: &Catalog) -> Vec<String> {
        let mut dropped = Vec::new();
        self.visits.retain(|id, _| {
            let keep = catalog.contains(id);
            if !keep {
                dropped.push(id.clone());
            }
            keep
        });
        dropped
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let saved = SavedProgress {
            visited: self.visits.values().cloned().collect(),
            player_name: Some(self.player_name.clone()),
        };
        serde_json::to_string(&saved)
    }

    /// Strict parse of the persisted layout. Later duplicates of an id win.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let saved: SavedProgress = serde_json::from_str(json)?;
        let mut state = ProgressState::default();
        for record in saved.visited {
            state.insert(record);
        }
        state.set_player_name(&saved.player_name.unwrap_or_default());
        Ok(state)
    }
}
