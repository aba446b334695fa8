use hickory_proto::rr::Record;

/// Answer records of one resolution plus the second they were written.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub records: Vec<Record>,
    pub written_at: u64,
}

impl CacheEntry {
    pub fn new(records: Vec<Record>, written_at: u64) -> Self {
        Self {
            records,
            written_at,
        }
    }

    /// Records with their TTL recomputed for `now`, or `None` once any
    /// record has reached zero.
    pub fn fresh_records(&self, now: u64) -> Option<Vec<Record>> {
        let elapsed = now.saturating_sub(self.written_at);
        let mut fresh = Vec::with_capacity(self.records.len());

        for record in &self.records {
            let stored = u64::from(record.ttl());
            if stored <= elapsed {
                return None;
            }
            let mut record = record.clone();
            // stored - elapsed < stored <= u32::MAX
            record.set_ttl((stored - elapsed) as u32);
            fresh.push(record);
        }

        Some(fresh)
    }

    pub fn is_expired(&self, now: u64) -> bool {
        let elapsed = now.saturating_sub(self.written_at);
        self.records
            .iter()
            .any(|r| u64::from(r.ttl()) <= elapsed)
    }
}
