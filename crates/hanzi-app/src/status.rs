use std::time::SystemTime;

/// Running tally of lookups, kept by the event loop
#[derive(Clone, Debug, Default)]
pub struct LookupStatus {
    pub dispatched: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Searches refused before any request was made
    pub rejected: u64,
    /// Outcomes that arrived after a newer search
    pub discarded: u64,
    pub last_lookup_time: Option<SystemTime>,
}

impl LookupStatus {
    pub fn record_dispatch(&mut self) {
        self.dispatched += 1;
        self.last_lookup_time = Some(SystemTime::now());
    }

    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    pub fn record_settled(&mut self, succeeded: bool) {
        if succeeded {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn record_discard(&mut self) {
        self.discarded += 1;
    }

    /// Lookups dispatched but not yet settled or discarded
    pub fn outstanding(&self) -> u64 {
        self.dispatched
            .saturating_sub(self.succeeded + self.failed + self.discarded)
    }
}
