use anyhow::{Context, Result, bail};

use super::persistence::KvStore;

/// Store key holding the next output file number
pub const FILE_NUM_KEY: &str = "FILE_NUM";

/// Width of the zero-padded output file number
pub const FILE_NUM_WIDTH: usize = 16;

/// Format a sequence number as a 16-digit zero-padded name
pub fn format_file_num(num: u64) -> String {
    format!("{:0width$}", num, width = FILE_NUM_WIDTH)
}

/// Output file sequence persisted in a [`KvStore`]
///
/// The stored value is the number the next output file will use. Taking a
/// name persists the incremented value before the name is handed out, so an
/// interrupted run never reuses a number.
#[derive(Debug)]
pub struct SequenceCounter {
    store: KvStore,
}

impl SequenceCounter {
    /// Wrap `store`, initialising the counter to zero when absent
    pub fn new(mut store: KvStore) -> Result<Self> {
        if store.get(FILE_NUM_KEY).is_none() {
            store.put(FILE_NUM_KEY, &format_file_num(0))?;
        }
        Ok(Self { store })
    }

    /// Current value without advancing
    pub fn current(&self) -> Result<u64> {
        let raw = self.store.get(FILE_NUM_KEY).unwrap_or_default();
        parse_file_num(raw)
            .with_context(|| format!("Corrupt counter in store: {}", self.store.path().display()))
    }

    /// Return the current name and persist the incremented counter
    pub fn next_name(&mut self) -> Result<String> {
        let current = self.current()?;
        let next = current.checked_add(1).context("Output file counter overflowed")?;
        self.store.put(FILE_NUM_KEY, &format_file_num(next))?;
        Ok(format_file_num(current))
    }
}

fn parse_file_num(raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Invalid {} value: {:?}", FILE_NUM_KEY, raw);
    }
    raw.parse::<u64>().with_context(|| format!("Invalid {} value: {:?}", FILE_NUM_KEY, raw))
}
