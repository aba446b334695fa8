pub mod clock;
pub mod entry;
pub mod key;
pub mod metrics;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use storage::ResolutionCache;
