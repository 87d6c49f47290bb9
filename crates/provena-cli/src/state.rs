//! # State File Handling
//!
//! The CLI persists the ledger as a JSON snapshot on disk. A missing
//! file means an empty ledger; writes go through a temp file and rename
//! so an interrupted save never truncates existing state.

use std::fs;
use std::path::Path;

use anyhow::Context;

use provena_ledger::{MemoryStore, Snapshot};

/// Load the store from `path`, or an empty store if the file is absent.
pub fn load(path: &Path) -> anyhow::Result<MemoryStore> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no state file, starting empty");
        return Ok(MemoryStore::new());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&contents)
        .with_context(|| format!("parsing state file {}", path.display()))?;
    Ok(MemoryStore::from_snapshot(snapshot))
}

/// Write the snapshot to `path` atomically.
pub fn save(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("serializing ledger state")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("replacing state file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "state saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use provena_core::{ActorId, WallClock};
    use provena_ledger::Ledger;
    use provena_model::ProductDetails;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = std::env::temp_dir().join("provena-state-test-missing");
        let store = load(&dir.join("nope.json")).unwrap();
        assert!(!store.is_verifier_authorized(
            &ActorId::new("a").unwrap(),
            &ActorId::new("b").unwrap()
        ));
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = std::env::temp_dir().join("provena-state-test-roundtrip");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ledger.json");

        let ledger = Ledger::new(WallClock);
        let maker = ActorId::new("acme").unwrap();
        ledger
            .register_product(
                &maker,
                ProductDetails {
                    name: "Widget".to_string(),
                    description: "A widget".to_string(),
                    lot_number: "L1".to_string(),
                    category: "hardware".to_string(),
                    origin_location: "Plant 1".to_string(),
                    metadata_uri: None,
                },
            )
            .unwrap();
        save(&path, &ledger.snapshot()).unwrap();

        let restored = Ledger::with_store(load(&path).unwrap(), WallClock);
        assert_eq!(
            restored
                .product(provena_core::ProductId(0))
                .unwrap()
                .lot_number,
            "L1"
        );
        std::fs::remove_file(&path).unwrap();
    }
}
