use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::model::id::SpaceId;

/// Keyed async mutexes, one per space with an operation in flight.
#[derive(Debug, Default, Clone)]
pub struct SpaceLocks {
    locks: Arc<Mutex<HashMap<SpaceId, Arc<AsyncMutex<()>>>>>,
}

impl SpaceLocks {
    pub async fn acquire(&self, space_id: SpaceId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries nobody holds or waits on are only referenced by the map.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(space_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
