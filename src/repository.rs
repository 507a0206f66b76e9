// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The garage and wishlist repository
//!
//! Owns the three collections and keeps them in step with the store. Every
//! mutation persists the collections it touched before returning; when a
//! save fails the in-memory collection is rolled back so it matches what is
//! on disk, and the failure is returned.

use crate::codec;
use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::seed;
use crate::store::{CollectionName, CollectionStore, FileStore};
use crate::types::{AcquireMethod, Bicycle, Entity, RecordId, Wish};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Which wishlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishList {
    /// Wishes not yet acquired
    Current,
    /// Acquired wishes
    History,
}

impl WishList {
    /// Backing collection
    #[must_use]
    pub fn collection(&self) -> CollectionName {
        match self {
            Self::Current => CollectionName::WishlistCurrent,
            Self::History => CollectionName::WishlistHistory,
        }
    }
}

/// How a collection came to be in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Decoded from the store
    Loaded(usize),
    /// Never saved before; sample records were written
    Seeded,
    /// Stored data was corrupt; it was set aside and sample records written
    Recovered {
        /// Decode failure
        reason: String,
    },
    /// The store could not be read; sample records are shown in memory and
    /// writes to the collection are refused
    Unreadable {
        /// Read failure
        reason: String,
    },
    /// Sample records could not be written; they are in memory only and the
    /// next successful save stores them
    Unsaved {
        /// Write failure
        reason: String,
    },
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(n) => write!(f, "loaded {n} records"),
            Self::Seeded => f.write_str("seeded with sample records"),
            Self::Recovered { reason } => write!(f, "recovered from corrupt data ({reason})"),
            Self::Unreadable { reason } => {
                write!(f, "unreadable, showing sample records read-only ({reason})")
            }
            Self::Unsaved { reason } => write!(f, "sample records not saved ({reason})"),
        }
    }
}

/// Per-collection load results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Garage
    pub bicycles: LoadOutcome,
    /// Current wishlist
    pub current: LoadOutcome,
    /// Wishlist history
    pub history: LoadOutcome,
}

/// Garage and wishlists backed by a [`CollectionStore`]
#[derive(Debug)]
pub struct Repository<S: CollectionStore = FileStore> {
    store: S,
    bicycles: Collection<Bicycle>,
    current: Collection<Wish>,
    history: Collection<Wish>,
    report: LoadReport,
    read_only: HashSet<CollectionName>,
}

impl Repository<FileStore> {
    /// Open the repository stored in `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        Self::load(FileStore::new(dir))
    }
}

impl<S: CollectionStore> Repository<S> {
    /// Load every collection from `store`, seeding the ones never saved
    pub fn load(store: S) -> Result<Self> {
        Self::load_at(store, Utc::now())
    }

    /// Load with an explicit clock reading for seeded timestamps
    ///
    /// Each collection loads on its own: a collection that cannot be read,
    /// decoded or seeded never keeps the others from loading. The outcome
    /// for each is in [`Repository::load_report`].
    pub fn load_at(mut store: S, now: DateTime<Utc>) -> Result<Self> {
        let (bicycles, bicycles_outcome) = load_collection(
            &mut store,
            CollectionName::Bicycles,
            seed::sample_bicycles,
            |_| Ok(()),
        );
        let (mut current, current_outcome) = load_collection(
            &mut store,
            CollectionName::WishlistCurrent,
            seed::sample_current_wishlist,
            |_| Ok(()),
        );
        let (history, history_outcome) = load_collection(
            &mut store,
            CollectionName::WishlistHistory,
            || seed::sample_history_wishlist(now),
            check_history,
        );

        let report = LoadReport {
            bicycles: bicycles_outcome,
            current: current_outcome,
            history: history_outcome,
        };
        let read_only: HashSet<CollectionName> = [
            (CollectionName::Bicycles, &report.bicycles),
            (CollectionName::WishlistCurrent, &report.current),
            (CollectionName::WishlistHistory, &report.history),
        ]
        .into_iter()
        .filter(|(_, outcome)| matches!(outcome, LoadOutcome::Unreadable { .. }))
        .map(|(name, _)| name)
        .collect();

        // A move interrupted between its two saves leaves the wish in both lists
        let both_readable = !read_only.contains(&CollectionName::WishlistCurrent)
            && !read_only.contains(&CollectionName::WishlistHistory);
        if both_readable {
            let moved: HashSet<RecordId> = current.ids().intersection(&history.ids()).copied().collect();
            let stale = current.remove_ids(&moved);
            if stale > 0 {
                warn!(
                    "Dropping {} wish(es) from {} already present in {}",
                    stale,
                    CollectionName::WishlistCurrent,
                    CollectionName::WishlistHistory
                );
                if let Err(err) = persist(&mut store, &current) {
                    warn!("Could not save repaired {}: {}", CollectionName::WishlistCurrent, err);
                }
            }
        }

        debug!("Repository loaded: {:?}", report);

        Ok(Self {
            store,
            bicycles,
            current,
            history,
            report,
            read_only,
        })
    }

    /// What happened to each collection at load time
    #[must_use]
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Backing store
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Backing store, mutably
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // =========================================================================
    // Bicycles
    // =========================================================================

    /// All bicycles in display order
    #[must_use]
    pub fn list_bicycles(&self) -> &[Bicycle] {
        self.bicycles.items()
    }

    /// Bicycle at `index`
    pub fn bicycle(&self, index: usize) -> Result<&Bicycle> {
        self.bicycles.get(index)
    }

    /// Position of the bicycle with `id`
    #[must_use]
    pub fn position_of_bicycle(&self, id: RecordId) -> Option<usize> {
        self.bicycles.position_of(id)
    }

    /// Save an edited bicycle
    ///
    /// Replaces the bicycle at `index` when one is selected, otherwise
    /// appends. Empty purchase details are dropped before saving. Returns the
    /// bicycle's position.
    pub fn upsert_bicycle(&mut self, index: Option<usize>, mut bicycle: Bicycle) -> Result<usize> {
        self.ensure_writable(CollectionName::Bicycles)?;
        bicycle.validate(Utc::now().date_naive())?;
        let details = bicycle.purchase_details.take();
        bicycle.set_purchase_details(details);

        let position = commit(&mut self.store, &mut self.bicycles, |bikes| {
            bikes.upsert(index, bicycle)
        })?;
        match index {
            Some(_) => info!("Updated bicycle at position {}", position),
            None => info!("Added bicycle at position {}", position),
        }
        Ok(position)
    }

    /// Delete the bicycle at `index`
    pub fn delete_bicycle(&mut self, index: usize) -> Result<Bicycle> {
        self.ensure_writable(CollectionName::Bicycles)?;
        let removed = commit(&mut self.store, &mut self.bicycles, |bikes| bikes.remove(index))?;
        info!("Deleted bicycle at position {}", index);
        Ok(removed)
    }

    // =========================================================================
    // Wishlists
    // =========================================================================

    /// Wishes in one list, in display order
    #[must_use]
    pub fn list_wish(&self, list: WishList) -> &[Wish] {
        self.wishes(list).items()
    }

    /// Wish at `index` in `list`
    pub fn wish(&self, list: WishList, index: usize) -> Result<&Wish> {
        self.wishes(list).get(index)
    }

    /// Position of the wish with `id` in `list`
    #[must_use]
    pub fn position_of_wish(&self, list: WishList, id: RecordId) -> Option<usize> {
        self.wishes(list).position_of(id)
    }

    /// Append a new wish to the current list
    pub fn add_current_wish(&mut self, mut wish: Wish) -> Result<usize> {
        self.ensure_writable(CollectionName::WishlistCurrent)?;
        if self.history.position_of(wish.id()).is_some() {
            wish.set_id(RecordId::new());
        }
        let position = commit(&mut self.store, &mut self.current, |current| {
            Ok(current.insert(wish))
        })?;
        info!("Added wish at position {}", position);
        Ok(position)
    }

    /// Delete the current wish at `index`
    pub fn delete_current_wish(&mut self, index: usize) -> Result<Wish> {
        self.ensure_writable(CollectionName::WishlistCurrent)?;
        let removed = commit(&mut self.store, &mut self.current, |current| current.remove(index))?;
        info!("Deleted current wish at position {}", index);
        Ok(removed)
    }

    /// Move the current wish at `index` to the history list
    ///
    /// Stamps the acquisition date and method, appends to history, then
    /// removes from the current list. Returns the position in history.
    ///
    /// History is saved first. If removing from the current list then fails
    /// to save, the history append is undone and the save error returned; if
    /// that undo also fails the result is [`Error::MoveIncomplete`] and the
    /// next load drops the duplicate from the current list. Retrying a move
    /// whose wish is already in history only completes the removal.
    pub fn promote_wish_to_history(
        &mut self,
        index: usize,
        date_acquired: DateTime<Utc>,
        method: AcquireMethod,
    ) -> Result<usize> {
        self.ensure_writable(CollectionName::WishlistCurrent)?;
        self.ensure_writable(CollectionName::WishlistHistory)?;
        let wish = self.current.get(index)?.clone();

        if let Some(position) = self.history.position_of(wish.id()) {
            warn!("Wish {} is already in history; removing it from current", wish.id().short());
            commit(&mut self.store, &mut self.current, |current| current.remove(index))?;
            return Ok(position);
        }

        let moved = wish.acquired(date_acquired, method);
        let position = commit(&mut self.store, &mut self.history, |history| {
            Ok(history.insert(moved))
        })?;

        if let Err(cause) = commit(&mut self.store, &mut self.current, |current| current.remove(index)) {
            warn!("Removing moved wish from current failed: {}; undoing history append", cause);
            return match commit(&mut self.store, &mut self.history, |history| history.remove(position)) {
                Ok(_) => Err(cause),
                Err(rollback) => Err(Error::MoveIncomplete {
                    cause: Box::new(cause),
                    rollback: Box::new(rollback),
                }),
            };
        }

        info!("Moved wish from current position {} to history position {}", index, position);
        Ok(position)
    }

    /// Collections that could not be read at load time are never written
    fn ensure_writable(&self, name: CollectionName) -> Result<()> {
        if self.read_only.contains(&name) {
            return Err(Error::Unavailable {
                collection: name.to_string(),
            });
        }
        Ok(())
    }

    fn wishes(&self, list: WishList) -> &Collection<Wish> {
        match list {
            WishList::Current => &self.current,
            WishList::History => &self.history,
        }
    }
}

/// A wish may only sit in history once it has been acquired
fn check_history(items: &[Wish]) -> Result<()> {
    match items.iter().position(|w| !w.is_acquired()) {
        Some(index) => Err(Error::decode(
            CollectionName::WishlistHistory.as_str(),
            format!("entry {index} has no acquisition date or method"),
        )),
        None => Ok(()),
    }
}

fn load_collection<S, T, F, C>(
    store: &mut S,
    name: CollectionName,
    seed: F,
    check: C,
) -> (Collection<T>, LoadOutcome)
where
    S: CollectionStore,
    T: Entity + Serialize + DeserializeOwned,
    F: FnOnce() -> Vec<T>,
    C: FnOnce(&[T]) -> Result<()>,
{
    let stored = match store.load(name) {
        Ok(stored) => stored,
        Err(err) => {
            warn!("{}; showing sample records and refusing writes", err);
            let outcome = LoadOutcome::Unreadable {
                reason: err.to_string(),
            };
            return (Collection::new(name, seed()), outcome);
        }
    };

    let Some(bytes) = stored else {
        let collection = Collection::new(name, seed());
        let outcome = match persist(store, &collection) {
            Ok(()) => {
                info!("Seeded {} with {} sample records", name, collection.len());
                LoadOutcome::Seeded
            }
            Err(err) => unsaved(name, &err),
        };
        return (collection, outcome);
    };

    let decoded = codec::decode_collection::<T>(&bytes)
        .map_err(|e| e.in_collection(name.as_str()))
        .and_then(|items| check(&items).map(|()| items));

    match decoded {
        Ok(items) => {
            debug!("Loaded {} records from {}", items.len(), name);
            let count = items.len();
            (Collection::new(name, items), LoadOutcome::Loaded(count))
        }
        Err(err) => {
            warn!("{}; falling back to sample records", err);
            let collection = Collection::new(name, seed());
            let reason = err.to_string();
            match store.quarantine(name) {
                Ok(()) => match persist(store, &collection) {
                    Ok(()) => (collection, LoadOutcome::Recovered { reason }),
                    Err(err) => (collection, unsaved(name, &err)),
                },
                Err(quarantine_err) => {
                    warn!("Could not set aside corrupt {}: {}", name, quarantine_err);
                    (collection, LoadOutcome::Unreadable { reason })
                }
            }
        }
    }
}

fn unsaved(name: CollectionName, err: &Error) -> LoadOutcome {
    warn!("Could not save sample records for {}: {}", name, err);
    LoadOutcome::Unsaved {
        reason: err.to_string(),
    }
}

fn persist<S, T>(store: &mut S, collection: &Collection<T>) -> Result<()>
where
    S: CollectionStore,
    T: Entity + Serialize,
{
    let name = collection.name();
    let bytes = codec::encode_collection(collection.items()).map_err(|e| e.in_collection(name.as_str()))?;
    store.save_all(name, &bytes)
}

/// Apply `mutate` and persist; on any failure restore the previous records
fn commit<S, T, R>(
    store: &mut S,
    collection: &mut Collection<T>,
    mutate: impl FnOnce(&mut Collection<T>) -> Result<R>,
) -> Result<R>
where
    S: CollectionStore,
    T: Entity + Serialize,
{
    let snapshot = collection.items().to_vec();
    let result = mutate(collection)?;
    if let Err(err) = persist(store, collection) {
        collection.replace_items(snapshot);
        return Err(err);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{ItemCategory, PurchaseDetails};

    fn repo() -> Repository<MemoryStore> {
        Repository::load(MemoryStore::new()).unwrap()
    }

    fn wish(title: &str) -> Wish {
        Wish::new(title, None, ItemCategory::Component).unwrap()
    }

    /// Memory store whose reads of one collection, or whose quarantine, fail
    #[derive(Debug, Default)]
    struct FaultyStore {
        inner: MemoryStore,
        unreadable: Option<CollectionName>,
        quarantine_fails: bool,
    }

    impl CollectionStore for FaultyStore {
        fn load(&self, name: CollectionName) -> Result<Option<Vec<u8>>> {
            if self.unreadable == Some(name) {
                return Err(Error::read(
                    name.as_str(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
                ));
            }
            self.inner.load(name)
        }

        fn save_all(&mut self, name: CollectionName, bytes: &[u8]) -> Result<()> {
            self.inner.save_all(name, bytes)
        }

        fn quarantine(&mut self, name: CollectionName) -> Result<()> {
            if self.quarantine_fails {
                return Err(Error::persistence(
                    name.as_str(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
                ));
            }
            self.inner.quarantine(name)
        }
    }

    fn real_garage() -> Vec<u8> {
        let bikes: Vec<Bicycle> = (1..=3)
            .map(|n| {
                let mut bike = Bicycle::new();
                bike.nickname = Some(format!("Real bike {n}"));
                bike
            })
            .collect();
        codec::encode_collection(&bikes).unwrap()
    }

    #[test]
    fn test_first_load_seeds_and_persists() {
        let repo = repo();
        assert_eq!(repo.list_bicycles().len(), 2);
        assert_eq!(repo.list_wish(WishList::Current).len(), 1);
        assert_eq!(repo.list_wish(WishList::History).len(), 1);
        assert_eq!(repo.load_report().bicycles, LoadOutcome::Seeded);

        for name in CollectionName::ALL {
            assert!(repo.store().get(name).is_some(), "{name} not persisted");
        }
    }

    #[test]
    fn test_reload_reads_back_what_was_saved() {
        let mut repo = repo();
        repo.add_current_wish(wish("Bell")).unwrap();
        let store = repo.store().clone();

        let reloaded = Repository::load(store).unwrap();
        assert_eq!(reloaded.load_report().current, LoadOutcome::Loaded(2));
        assert_eq!(reloaded.list_wish(WishList::Current), repo.list_wish(WishList::Current));
    }

    #[test]
    fn test_upsert_drops_empty_purchase_details() {
        let mut repo = repo();
        let mut bike = repo.bicycle(0).unwrap().duplicate();
        bike.purchase_details = Some(PurchaseDetails::default());

        repo.upsert_bicycle(Some(0), bike).unwrap();
        assert!(repo.bicycle(0).unwrap().purchase_details.is_none());
    }

    #[test]
    fn test_upsert_rejects_future_purchase_date() {
        let mut repo = repo();
        let mut bike = Bicycle::new();
        bike.purchase_details = PurchaseDetails::new(
            None,
            None,
            Some(Utc::now().date_naive() + chrono::Days::new(30)),
        );
        let writes = repo.store().write_count();

        assert!(matches!(repo.upsert_bicycle(None, bike), Err(Error::Validation(_))));
        assert_eq!(repo.list_bicycles().len(), 2);
        assert_eq!(repo.store().write_count(), writes);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut repo = repo();
        repo.store_mut().fail_writes(CollectionName::Bicycles, true);

        let err = repo.delete_bicycle(0).unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(repo.list_bicycles().len(), 2);

        assert!(repo.upsert_bicycle(None, Bicycle::new()).is_err());
        assert_eq!(repo.list_bicycles().len(), 2);
    }

    #[test]
    fn test_promote_moves_and_stamps() {
        let mut repo = repo();
        let now = Utc::now();
        let id = repo.wish(WishList::Current, 0).unwrap().id();

        let position = repo.promote_wish_to_history(0, now, AcquireMethod::Purchase).unwrap();

        assert_eq!(position, 1);
        assert!(repo.list_wish(WishList::Current).is_empty());
        let moved = repo.wish(WishList::History, position).unwrap();
        assert_eq!(moved.id(), id);
        assert_eq!(moved.date_acquired(), Some(now));
        assert_eq!(moved.acquire_method(), Some(AcquireMethod::Purchase));
    }

    #[test]
    fn test_promote_history_save_failure_changes_nothing() {
        let mut repo = repo();
        repo.store_mut().fail_writes(CollectionName::WishlistHistory, true);

        let err = repo
            .promote_wish_to_history(0, Utc::now(), AcquireMethod::Gift)
            .unwrap_err();

        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(repo.list_wish(WishList::Current).len(), 1);
        assert_eq!(repo.list_wish(WishList::History).len(), 1);
    }

    #[test]
    fn test_promote_current_save_failure_is_compensated() {
        let mut repo = repo();
        repo.store_mut().fail_writes(CollectionName::WishlistCurrent, true);

        let err = repo
            .promote_wish_to_history(0, Utc::now(), AcquireMethod::Gift)
            .unwrap_err();

        assert!(matches!(err, Error::Persistence { .. }));
        assert_eq!(repo.list_wish(WishList::Current).len(), 1);
        assert_eq!(repo.list_wish(WishList::History).len(), 1);

        // Disk agrees with memory
        let reloaded = Repository::load(repo.store().clone()).unwrap();
        assert_eq!(reloaded.list_wish(WishList::History).len(), 1);
    }

    #[test]
    fn test_promote_incomplete_is_reconciled_on_load() {
        let mut repo = repo();
        let wish = repo.wish(WishList::Current, 0).unwrap().clone();
        let id = wish.id();

        // Only the history half of the move reached disk
        let moved = wish.acquired(Utc::now(), AcquireMethod::Diy);
        commit(&mut repo.store, &mut repo.history, |h| Ok(h.insert(moved))).unwrap();

        let reloaded = Repository::load(repo.store().clone()).unwrap();
        assert!(reloaded.position_of_wish(WishList::Current, id).is_none());
        assert!(reloaded.position_of_wish(WishList::History, id).is_some());

        // The repaired current list was written back
        let again = Repository::load(reloaded.store().clone()).unwrap();
        assert_eq!(again.load_report().current, LoadOutcome::Loaded(0));
    }

    #[test]
    fn test_promote_retry_does_not_duplicate() {
        let mut repo = repo();
        let wish = repo.wish(WishList::Current, 0).unwrap().clone();
        let moved = wish.clone().acquired(Utc::now(), AcquireMethod::Diy);
        commit(&mut repo.store, &mut repo.history, |h| Ok(h.insert(moved))).unwrap();
        let history_len = repo.list_wish(WishList::History).len();

        let position = repo.promote_wish_to_history(0, Utc::now(), AcquireMethod::Diy).unwrap();

        assert_eq!(repo.list_wish(WishList::History).len(), history_len);
        assert_eq!(repo.wish(WishList::History, position).unwrap().id(), wish.id());
        assert!(repo.list_wish(WishList::Current).is_empty());
    }

    #[test]
    fn test_move_incomplete_error() {
        struct FailAfter {
            inner: MemoryStore,
            allowed: usize,
        }

        impl CollectionStore for FailAfter {
            fn load(&self, name: CollectionName) -> Result<Option<Vec<u8>>> {
                self.inner.load(name)
            }

            fn save_all(&mut self, name: CollectionName, bytes: &[u8]) -> Result<()> {
                if self.allowed == 0 {
                    return Err(Error::persistence(
                        name.as_str(),
                        std::io::Error::new(std::io::ErrorKind::Other, "read-only"),
                    ));
                }
                self.allowed -= 1;
                self.inner.save_all(name, bytes)
            }

            fn quarantine(&mut self, name: CollectionName) -> Result<()> {
                self.inner.quarantine(name)
            }
        }

        let seeded = repo().store().clone();
        let mut repo = Repository::load(FailAfter {
            inner: seeded,
            allowed: 1,
        })
        .unwrap();

        let err = repo
            .promote_wish_to_history(0, Utc::now(), AcquireMethod::Other)
            .unwrap_err();

        assert!(matches!(err, Error::MoveIncomplete { .. }));
        // Memory mirrors disk: the wish is in both lists until the next load
        assert_eq!(repo.list_wish(WishList::Current).len(), 1);
        assert_eq!(repo.list_wish(WishList::History).len(), 2);
    }

    #[test]
    fn test_corrupt_collection_recovers_alone() {
        let seeded = repo().store().clone();
        let store = seeded.with(CollectionName::WishlistCurrent, b"{not json".to_vec());

        let repo = Repository::load(store).unwrap();

        assert!(matches!(repo.load_report().current, LoadOutcome::Recovered { .. }));
        assert!(matches!(repo.load_report().bicycles, LoadOutcome::Loaded(2)));
        assert_eq!(repo.list_wish(WishList::Current).len(), 1);
        assert_eq!(
            repo.store().quarantined(CollectionName::WishlistCurrent),
            Some(&b"{not json"[..])
        );
    }

    #[test]
    fn test_history_without_acquisition_is_corrupt() {
        let unacquired = codec::encode_collection(&[wish("Bell")]).unwrap();
        let store = MemoryStore::new().with(CollectionName::WishlistHistory, unacquired);

        let repo = Repository::load(store).unwrap();

        assert!(matches!(repo.load_report().history, LoadOutcome::Recovered { .. }));
        assert!(repo.list_wish(WishList::History).iter().all(Wish::is_acquired));
    }

    #[test]
    fn test_add_wish_with_history_id_gets_fresh_id() {
        let mut repo = repo();
        let mut clash = wish("Bell");
        clash.set_id(repo.wish(WishList::History, 0).unwrap().id());

        let position = repo.add_current_wish(clash).unwrap();

        let added = repo.wish(WishList::Current, position).unwrap();
        assert_ne!(added.id(), repo.wish(WishList::History, 0).unwrap().id());
    }

    #[test]
    fn test_seed_write_failure_does_not_block_other_collections() {
        let history = seed::sample_history_wishlist(Utc::now());
        let mut store = MemoryStore::new()
            .with(
                CollectionName::WishlistCurrent,
                codec::encode_collection(&[wish("Bell"), wish("Bottle cage")]).unwrap(),
            )
            .with(
                CollectionName::WishlistHistory,
                codec::encode_collection(&history).unwrap(),
            );
        store.fail_writes(CollectionName::Bicycles, true);

        let mut repo = Repository::load(store).unwrap();

        assert!(matches!(repo.load_report().bicycles, LoadOutcome::Unsaved { .. }));
        assert_eq!(repo.load_report().current, LoadOutcome::Loaded(2));
        assert_eq!(repo.load_report().history, LoadOutcome::Loaded(1));
        assert_eq!(repo.list_bicycles().len(), 2);
        assert!(repo.store().get(CollectionName::Bicycles).is_none());

        // Nothing was on disk to protect, so a later save stores the garage
        repo.store_mut().fail_writes(CollectionName::Bicycles, false);
        repo.upsert_bicycle(None, Bicycle::new()).unwrap();
        let saved: Vec<Bicycle> =
            codec::decode_collection(repo.store().get(CollectionName::Bicycles).unwrap()).unwrap();
        assert_eq!(saved.len(), 3);
    }

    #[test]
    fn test_recovery_write_failure_does_not_block_load() {
        let mut store = repo().store().clone().with(CollectionName::WishlistCurrent, b"{not json".to_vec());
        store.fail_writes(CollectionName::WishlistCurrent, true);

        let repo = Repository::load(store).unwrap();

        assert!(matches!(repo.load_report().current, LoadOutcome::Unsaved { .. }));
        assert_eq!(repo.load_report().bicycles, LoadOutcome::Loaded(2));
        assert_eq!(repo.list_wish(WishList::Current).len(), 1);
        assert_eq!(
            repo.store().quarantined(CollectionName::WishlistCurrent),
            Some(&b"{not json"[..])
        );
    }

    #[test]
    fn test_unreadable_collection_is_never_overwritten() {
        let garage = real_garage();
        let mut repo = Repository::load(FaultyStore {
            inner: repo().store().clone().with(CollectionName::Bicycles, garage.clone()),
            unreadable: Some(CollectionName::Bicycles),
            ..FaultyStore::default()
        })
        .unwrap();

        assert!(matches!(repo.load_report().bicycles, LoadOutcome::Unreadable { .. }));
        assert_eq!(repo.load_report().current, LoadOutcome::Loaded(1));
        assert_eq!(repo.load_report().history, LoadOutcome::Loaded(1));
        assert_eq!(repo.list_bicycles().len(), 2);

        assert!(matches!(repo.delete_bicycle(0), Err(Error::Unavailable { .. })));
        assert!(matches!(
            repo.upsert_bicycle(None, Bicycle::new()),
            Err(Error::Unavailable { .. })
        ));
        assert_eq!(repo.list_bicycles().len(), 2);
        assert_eq!(repo.store().inner.get(CollectionName::Bicycles), Some(garage.as_slice()));

        // The wishlists stay writable
        repo.add_current_wish(wish("Bell")).unwrap();
        assert_eq!(repo.list_wish(WishList::Current).len(), 2);
    }

    #[test]
    fn test_corrupt_file_that_cannot_be_set_aside_is_kept() {
        let mut repo = Repository::load(FaultyStore {
            inner: repo().store().clone().with(CollectionName::Bicycles, b"{not json".to_vec()),
            quarantine_fails: true,
            ..FaultyStore::default()
        })
        .unwrap();

        assert!(matches!(repo.load_report().bicycles, LoadOutcome::Unreadable { .. }));
        assert_eq!(repo.list_bicycles().len(), 2);

        assert!(matches!(repo.delete_bicycle(1), Err(Error::Unavailable { .. })));
        assert_eq!(
            repo.store().inner.get(CollectionName::Bicycles),
            Some(&b"{not json"[..])
        );
    }

    #[test]
    fn test_unreadable_history_blocks_promote() {
        let mut repo = Repository::load(FaultyStore {
            inner: repo().store().clone(),
            unreadable: Some(CollectionName::WishlistHistory),
            ..FaultyStore::default()
        })
        .unwrap();

        let err = repo
            .promote_wish_to_history(0, Utc::now(), AcquireMethod::Gift)
            .unwrap_err();

        assert!(matches!(err, Error::Unavailable { .. }));
        assert_eq!(repo.list_wish(WishList::Current).len(), 1);
    }

    #[test]
    fn test_reconcile_save_failure_does_not_block_load() {
        let mut repo = repo();
        let wish = repo.wish(WishList::Current, 0).unwrap().clone();
        let moved = wish.clone().acquired(Utc::now(), AcquireMethod::Diy);
        commit(&mut repo.store, &mut repo.history, |h| Ok(h.insert(moved))).unwrap();
        let mut store = repo.store().clone();
        store.fail_writes(CollectionName::WishlistCurrent, true);

        let reloaded = Repository::load(store).unwrap();

        assert!(reloaded.position_of_wish(WishList::Current, wish.id()).is_none());
        assert!(reloaded.position_of_wish(WishList::History, wish.id()).is_some());
    }
}
