//! Progress store — the single source of truth for which locations a player
//! has visited and for every statistic derived from that set.
//!
//! Each successful mutation writes the full state to the storage slot before
//! returning. Startup restores from the same slot; a missing or corrupt slot
//! starts an empty hunt.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::catalog::{Catalog, Location};
use crate::config::{RewardPolicy, StoreConfig};
use crate::error::{TrailError, TrailResult};
use crate::trail::state::{PhotoProof, ProgressState, VisitRecord};
use crate::trail::storage::SlotStorage;
use crate::trail::tier::{Achievement, Milestone, Tier, TierLadder};

/// Snapshot of derived progress values.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub visited_count: usize,
    pub catalog_size: usize,
    pub total_points: u32,
    pub max_points: u32,
    /// 0.0..=100.0, unrounded.
    pub completion_percentage: f64,
    pub tier: Tier,
    pub next_milestone: Milestone,
}

impl Stats {
    pub fn remaining(&self) -> usize {
        self.catalog_size - self.visited_count
    }
}

/// Everything a completion certificate shows.
#[derive(Debug, Clone)]
pub struct CertificateData<'a> {
    pub player_name: &'a str,
    pub stats: Stats,
    /// Catalog order.
    pub entries: Vec<(&'static Location, &'a VisitRecord)>,
}

pub struct ProgressStore<S: SlotStorage> {
    catalog: Catalog,
    ladder: TierLadder,
    config: StoreConfig,
    state: ProgressState,
    storage: S,
}

impl<S: SlotStorage> ProgressStore<S> {
    /// Build a store and restore any progress saved under the configured key.
    pub fn open(catalog: Catalog, config: StoreConfig, storage: S) -> Self {
        let state = restore(&catalog, &config.storage_key, &storage);
        info!(
            "progress restored from '{}': {} of {} locations",
            config.storage_key,
            state.len(),
            catalog.len()
        );
        Self {
            ladder: TierLadder::for_catalog_size(catalog.len()),
            catalog,
            config,
            state,
            storage,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn ladder(&self) -> &TierLadder {
        &self.ladder
    }

    // ── Mutations ──────────────────────────────────────────────────

    /// Record a visit now. Re-visiting refreshes the record.
    pub fn visit(&mut self, id: &str, proof: Option<PhotoProof>) -> TrailResult<()> {
        self.visit_at(id, proof, Utc::now())
    }

    /// Record a visit with an explicit timestamp.
    pub fn visit_at(
        &mut self,
        id: &str,
        proof: Option<PhotoProof>,
        timestamp: DateTime<Utc>,
    ) -> TrailResult<()> {
        self.require_location(id)?;
        debug!("visit {} (photo: {})", id, proof.is_some());
        self.state.insert(VisitRecord {
            id: id.to_string(),
            photo: proof,
            timestamp,
        });
        self.persist();
        Ok(())
    }

    /// Forget a visit. Returns whether a record was removed.
    pub fn unvisit(&mut self, id: &str) -> TrailResult<bool> {
        self.require_location(id)?;
        let removed = self.state.remove(id).is_some();
        if removed {
            debug!("unvisit {}", id);
            self.persist();
        }
        Ok(removed)
    }

    /// Set the certificate name. Blank names count as unset.
    pub fn set_player_name(&mut self, name: &str) {
        self.state.set_player_name(name);
        self.persist();
    }

    /// Clear every visit and the player name.
    pub fn reset(&mut self) {
        self.state.clear();
        info!("progress reset");
        self.persist();
    }

    /// Replace the state with a previously exported one. Unlike startup,
    /// malformed input is an error and leaves the current state untouched.
    pub fn import_json(&mut self, json: &str) -> TrailResult<()> {
        let mut state = ProgressState::from_json(json)?;
        let dropped = state.retain_catalog(&self.catalog);
        if !dropped.is_empty() {
            warn!("import dropped unknown locations: {}", dropped.join(", "));
        }
        self.state = state;
        self.persist();
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────

    pub fn export_json(&self) -> String {
        self.state.to_json().unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_visited(&self, id: &str) -> bool {
        self.state.contains(id)
    }

    pub fn visit_record(&self, id: &str) -> Option<&VisitRecord> {
        self.state.get(id)
    }

    pub fn visits(&self) -> impl Iterator<Item = &VisitRecord> {
        self.state.visits()
    }

    pub fn player_name(&self) -> &str {
        self.state.player_name()
    }

    pub fn has_player_name(&self) -> bool {
        !self.state.player_name().is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.visited_count() == self.catalog.len()
    }

    pub fn stats(&self) -> Stats {
        let visited_count = self.visited_count();
        let catalog_size = self.catalog.len();
        let (total_points, max_points) = match self.config.reward_policy {
            RewardPolicy::PerLocation => (
                self.catalog
                    .iter()
                    .filter(|loc| self.state.contains(loc.id))
                    .map(|loc| loc.points)
                    .sum(),
                self.catalog.max_points(),
            ),
            RewardPolicy::FlatBonus { points } => (
                points.saturating_mul(u32::try_from(visited_count).unwrap_or(u32::MAX)),
                points.saturating_mul(u32::try_from(catalog_size).unwrap_or(u32::MAX)),
            ),
        };
        Stats {
            visited_count,
            catalog_size,
            total_points,
            max_points,
            completion_percentage: visited_count as f64 / catalog_size as f64 * 100.0,
            tier: self.ladder.tier_for(visited_count),
            next_milestone: self.ladder.next_milestone(visited_count),
        }
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        self.ladder.achievements(self.visited_count())
    }

    /// Certificate contents, once every location is visited and a name is set.
    pub fn certificate(&self) -> TrailResult<CertificateData<'_>> {
        let stats = self.stats();
        if !self.is_complete() {
            return Err(TrailError::HuntIncomplete {
                visited: stats.visited_count,
                total: stats.catalog_size,
            });
        }
        if !self.has_player_name() {
            return Err(TrailError::PlayerNameUnset);
        }
        let entries = self
            .catalog
            .iter()
            .filter_map(|loc| self.state.get(loc.id).map(|record| (loc, record)))
            .collect();
        Ok(CertificateData {
            player_name: self.state.player_name(),
            stats,
            entries,
        })
    }

    // ── Internals ──────────────────────────────────────────────────

    /// Visited locations that are in the catalog.
    fn visited_count(&self) -> usize {
        self.catalog
            .iter()
            .filter(|loc| self.state.contains(loc.id))
            .count()
    }

    fn require_location(&self, id: &str) -> TrailResult<()> {
        if self.catalog.contains(id) {
            Ok(())
        } else {
            Err(TrailError::InvalidLocation(id.to_string()))
        }
    }

    /// Write the full state. A failed write keeps the in-memory state; the
    /// next successful write stores everything.
    fn persist(&mut self) {
        let json = match self.state.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("progress not saved: {}", e);
                return;
            }
        };
        match self.storage.write(&self.config.storage_key, &json) {
            Ok(()) => debug!("progress saved ({} bytes)", json.len()),
            Err(e) => warn!("progress not saved: {}", e),
        }
    }
}

/// Load saved progress, treating an absent, unreadable or corrupt slot as empty.
fn restore<S: SlotStorage>(catalog: &Catalog, key: &str, storage: &S) -> ProgressState {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ProgressState::default(),
        Err(e) => {
            warn!("saved progress unreadable, starting fresh: {}", e);
            return ProgressState::default();
        }
    };
    let mut state = match ProgressState::from_json(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("saved progress is corrupt, starting fresh: {}", e);
            return ProgressState::default();
        }
    };
    let dropped = state.retain_catalog(catalog);
    if !dropped.is_empty() {
        warn!("saved progress had unknown locations: {}", dropped.join(", "));
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::trail::storage::MemorySlot;
    use chrono::TimeZone;

    const IDS: [&str; 8] = [
        "fitzrandolph",
        "blair",
        "prospect",
        "cannon",
        "eastpyne",
        "holder",
        "dinky",
        "firestone",
    ];

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn fresh() -> ProgressStore<MemorySlot> {
        init_logger();
        ProgressStore::open(Catalog::princeton(), StoreConfig::default(), MemorySlot::new())
    }

    fn reopen(store: &ProgressStore<MemorySlot>) -> ProgressStore<MemorySlot> {
        ProgressStore::open(
            Catalog::princeton(),
            store.config().clone(),
            store.storage().clone(),
        )
    }

    fn photo() -> PhotoProof {
        PhotoProof::from_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap()
    }

    #[test]
    fn empty_store_stats() {
        let store = fresh();
        let stats = store.stats();
        assert_eq!(stats.visited_count, 0);
        assert_eq!(stats.total_points, 0);
        assert_eq!(stats.max_points, 1350);
        assert_eq!(stats.completion_percentage, 0.0);
        assert_eq!(stats.tier, Tier::NewExplorer);
        assert!(!store.is_complete());
    }

    #[test]
    fn revisit_does_not_double_count() {
        let mut store = fresh();
        store.visit("blair", None).unwrap();
        assert_eq!(store.stats().visited_count, 1);
        store.visit("blair", Some(photo())).unwrap();
        let stats = store.stats();
        assert_eq!(stats.visited_count, 1);
        assert_eq!(stats.total_points, 125);
        assert!(store.visit_record("blair").unwrap().photo.is_some());
    }

    #[test]
    fn every_location_counts_once() {
        let mut store = fresh();
        let ids: Vec<_> = store.catalog().iter().map(|loc| loc.id).collect();
        for (i, id) in ids.into_iter().enumerate() {
            store.visit(id, None).unwrap();
            assert_eq!(store.stats().visited_count, i + 1, "first visit to {}", id);
            store.visit(id, Some(photo())).unwrap();
            assert_eq!(store.stats().visited_count, i + 1, "repeat visit to {}", id);
        }
        assert_eq!(store.stats().total_points, 1350);
    }

    #[test]
    fn revisit_refreshes_record() {
        let mut store = fresh();
        let first = Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 4, 2, 9, 0, 0).unwrap();
        store.visit_at("dinky", Some(photo()), first).unwrap();
        store.visit_at("dinky", None, second).unwrap();
        let record = store.visit_record("dinky").unwrap();
        assert_eq!(record.timestamp, second);
        assert!(record.photo.is_none());
    }

    #[test]
    fn scenario_visit_three_then_unvisit_one() {
        let mut store = fresh();
        for id in &IDS[..3] {
            store.visit(id, None).unwrap();
        }
        let stats = store.stats();
        assert_eq!(stats.visited_count, 3);
        assert_eq!(stats.total_points, 375);
        assert_eq!(stats.tier, Tier::CampusNavigator);

        store.unvisit("blair").unwrap();
        let stats = store.stats();
        assert_eq!(stats.visited_count, 2);
        assert_eq!(stats.total_points, 250);
        assert_eq!(stats.tier, Tier::CuriousTiger);
    }

    #[test]
    fn points_track_current_visit_set() {
        let mut store = fresh();
        let ops: [(&str, bool); 9] = [
            ("holder", true),
            ("cannon", true),
            ("holder", false),
            ("firestone", true),
            ("holder", true),
            ("cannon", false),
            ("cannon", false),
            ("prospect", true),
            ("holder", true),
        ];
        for (id, visit) in ops {
            if visit {
                store.visit(id, None).unwrap();
            } else {
                store.unvisit(id).unwrap();
            }
            let expected: u32 = store
                .catalog()
                .iter()
                .filter(|loc| store.is_visited(loc.id))
                .map(|loc| loc.points)
                .sum();
            assert_eq!(store.stats().total_points, expected);
        }
        assert_eq!(store.stats().total_points, 250 + 225 + 100);
    }

    #[test]
    fn unvisit_is_idempotent() {
        let mut store = fresh();
        store.visit("cannon", None).unwrap();
        assert!(store.unvisit("cannon").unwrap());
        let after_once = store.export_json();
        assert!(!store.unvisit("cannon").unwrap());
        assert_eq!(store.export_json(), after_once);
        assert_eq!(store.stats().visited_count, 0);
    }

    #[test]
    fn unknown_location_is_rejected() {
        let mut store = fresh();
        let err = store.visit("nassau", None).unwrap_err();
        assert!(matches!(err, TrailError::InvalidLocation(ref id) if id == "nassau"));
        assert!(store.unvisit("nassau").is_err());
        assert_eq!(store.stats().visited_count, 0);
        assert_eq!(store.storage().get("tigerTrails"), None);
    }

    #[test]
    fn visiting_everything_completes_the_hunt() {
        let mut store = fresh();
        for id in IDS {
            store.visit(id, None).unwrap();
        }
        let stats = store.stats();
        assert!(store.is_complete());
        assert_eq!(stats.completion_percentage, 100.0);
        assert_eq!(stats.total_points, 1350);
        assert_eq!(stats.tier, Tier::MasterExplorer);
        assert_eq!(stats.next_milestone.remaining, 0);
    }

    #[test]
    fn completion_percentage_is_unrounded() {
        let mut store = fresh();
        store.visit("blair", None).unwrap();
        store.visit("holder", None).unwrap();
        store.visit("dinky", None).unwrap();
        assert_eq!(store.stats().completion_percentage, 37.5);
    }

    #[test]
    fn player_name_is_trimmed_and_blank_is_unset() {
        let mut store = fresh();
        store.set_player_name("   ");
        assert!(!store.has_player_name());
        store.set_player_name("  Grace Hopper \n");
        assert_eq!(store.player_name(), "Grace Hopper");
        assert!(store.has_player_name());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut store = fresh();
        store.visit("blair", Some(photo())).unwrap();
        store.set_player_name("Ada");
        let reopened = reopen(&store);
        assert!(reopened.is_visited("blair"));
        assert_eq!(reopened.player_name(), "Ada");
        assert_eq!(
            reopened.visit_record("blair"),
            store.visit_record("blair")
        );

        store.unvisit("blair").unwrap();
        assert!(!reopen(&store).is_visited("blair"));
    }

    #[test]
    fn malformed_slot_equals_absent_slot() {
        init_logger();
        for raw in [r#""just a string""#, "{not json", r#"{"visited":42}"#] {
            let store = ProgressStore::open(
                Catalog::princeton(),
                StoreConfig::default(),
                MemorySlot::with_value("tigerTrails", raw),
            );
            assert_eq!(store.stats().visited_count, 0);
            assert_eq!(store.player_name(), "");
        }
    }

    #[test]
    fn restore_drops_unknown_locations() {
        init_logger();
        let raw = r#"{"visited":[{"id":"blair","timestamp":"2026-01-01T00:00:00Z"},{"id":"old-spot","timestamp":"2026-01-01T00:00:00Z"}],"playerName":"Ada"}"#;
        let store = ProgressStore::open(
            Catalog::princeton(),
            StoreConfig::default(),
            MemorySlot::with_value("tigerTrails", raw),
        );
        assert_eq!(store.stats().visited_count, 1);
        assert_eq!(store.visits().count(), 1);
    }

    #[test]
    fn storage_key_comes_from_config() {
        init_logger();
        let config = StoreConfig {
            storage_key: "hunt-2026".to_string(),
            ..StoreConfig::default()
        };
        let mut store = ProgressStore::open(Catalog::princeton(), config, MemorySlot::new());
        store.visit("blair", None).unwrap();
        assert!(store.storage().get("hunt-2026").is_some());
        assert!(store.storage().get("tigerTrails").is_none());
    }

    #[test]
    fn flat_bonus_awards_fixed_points() {
        init_logger();
        let config = StoreConfig {
            reward_policy: RewardPolicy::flat_bonus(),
            ..StoreConfig::default()
        };
        let mut store = ProgressStore::open(Catalog::princeton(), config, MemorySlot::new());
        store.visit("holder", None).unwrap();
        store.visit("holder", None).unwrap();
        store.visit("prospect", None).unwrap();
        let stats = store.stats();
        assert_eq!(stats.total_points, 20);
        assert_eq!(stats.max_points, 80);
    }

    #[test]
    fn huge_flat_bonus_saturates() {
        init_logger();
        let config = StoreConfig::from_json(
            r#"{"rewardPolicy":{"kind":"flatBonus","points":1000000000}}"#,
        )
        .unwrap();
        let mut store = ProgressStore::open(Catalog::princeton(), config, MemorySlot::new());
        store.visit("blair", None).unwrap();
        let stats = store.stats();
        assert_eq!(stats.total_points, 1_000_000_000);
        assert_eq!(stats.max_points, u32::MAX);

        for id in IDS {
            store.visit(id, None).unwrap();
        }
        assert_eq!(store.stats().total_points, u32::MAX);
    }

    #[test]
    fn import_replaces_state_and_rejects_garbage() {
        let mut source = fresh();
        source.visit("cannon", Some(photo())).unwrap();
        source.set_player_name("Ada");
        let exported = source.export_json();

        let mut target = fresh();
        target.visit("blair", None).unwrap();
        target.import_json(&exported).unwrap();
        assert!(target.is_visited("cannon"));
        assert!(!target.is_visited("blair"));
        assert_eq!(target.player_name(), "Ada");

        assert!(target.import_json("garbage").is_err());
        assert!(target.is_visited("cannon"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = fresh();
        store.visit("cannon", None).unwrap();
        store.set_player_name("Ada");
        store.reset();
        assert_eq!(store.stats().visited_count, 0);
        assert!(!store.has_player_name());
        assert_eq!(reopen(&store).stats().visited_count, 0);
    }

    #[test]
    fn certificate_requires_completion_then_name() {
        let mut store = fresh();
        store.visit("cannon", None).unwrap();
        assert!(matches!(
            store.certificate(),
            Err(TrailError::HuntIncomplete { visited: 1, total: 8 })
        ));

        for id in IDS {
            store.visit(id, None).unwrap();
        }
        assert!(matches!(store.certificate(), Err(TrailError::PlayerNameUnset)));

        store.set_player_name("Ada");
        let cert = store.certificate().unwrap();
        assert_eq!(cert.player_name, "Ada");
        assert_eq!(cert.entries.len(), 8);
        assert_eq!(cert.entries[0].0.id, "fitzrandolph");
        assert_eq!(cert.stats.total_points, 1350);
    }

    struct FullSlot;

    impl SlotStorage for FullSlot {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("QuotaExceededError".to_string()))
        }
    }

    #[test]
    fn failed_storage_keeps_in_memory_state() {
        init_logger();
        let mut store = ProgressStore::open(Catalog::princeton(), StoreConfig::default(), FullSlot);
        store.visit("blair", Some(photo())).unwrap();
        assert_eq!(store.stats().visited_count, 1);
    }
}
