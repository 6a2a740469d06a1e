use std::collections::BTreeMap;

/// A write that still has to reach the browser's `localStorage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageWrite {
    pub key: String,
    pub value: String,
}

/// Session-side mirror of the browser's `localStorage`.
///
/// Seeded from the snapshot the page sends on connect; every write is
/// applied locally right away and journaled so the live session can replay
/// it into the real storage.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    entries: BTreeMap<String, String>,
    journal: Vec<StorageWrite>,
}

impl LocalStorage {
    pub fn from_snapshot<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        self.entries.insert(key.to_string(), value.clone());
        self.journal.push(StorageWrite {
            key: key.to_string(),
            value,
        });
    }

    /// Drains the writes not yet forwarded to the browser.
    pub fn take_journal(&mut self) -> Vec<StorageWrite> {
        std::mem::take(&mut self.journal)
    }
}
