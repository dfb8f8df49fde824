use gloo::storage::{LocalStorage, Storage};
use memory_match_core::{KeyValueStore, StoreError};

/// Best-time storage on top of `LocalStorage`.
///
/// Browsers can refuse `localStorage` altogether (privacy modes, sandboxed
/// frames), in which case every read finds nothing and every write fails.
#[derive(Debug, Default)]
pub(crate) struct BrowserStore {
    available: bool,
}

impl BrowserStore {
    pub(crate) fn open() -> Self {
        let available = matches!(gloo::utils::window().local_storage(), Ok(Some(_)));
        if !available {
            log::warn!("localStorage is not available, best times will not be kept");
        }
        Self { available }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("could not read {}: {:?}", key, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if !self.available {
            return Err(StoreError::Unavailable);
        }
        LocalStorage::raw().set_item(key, value).map_err(|err| {
            log::warn!("could not write {}: {:?}", key, err);
            StoreError::WriteRejected
        })
    }
}
