use compact_str::CompactString;
use iterdns_domain::{DnsQuery, RecordType};
use std::hash::{Hash, Hasher};

/// Identity of a cached answer set: normalized query name plus type.
#[derive(Clone, Debug, Eq)]
pub struct CacheKey {
    pub domain: CompactString,
    pub record_type: RecordType,
}

impl CacheKey {
    /// `domain` is lowercased and stripped of its trailing dot so that
    /// `Example.COM.` and `example.com` share one entry.
    #[inline]
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        let trimmed = domain.trim_end_matches('.');
        let domain = if trimmed.bytes().any(|b| b.is_ascii_uppercase()) {
            CompactString::from(trimmed.to_ascii_lowercase())
        } else {
            CompactString::from(trimmed)
        };
        Self {
            domain,
            record_type,
        }
    }

    #[inline]
    pub fn from_query(query: &DnsQuery) -> Self {
        Self::new(&query.domain, query.record_type)
    }
}

impl Hash for CacheKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain.as_str().hash(state);
        self.record_type.hash(state);
    }
}

impl PartialEq for CacheKey {
    #[inline]
    fn eq(&self, other: &CacheKey) -> bool {
        self.record_type == other.record_type && self.domain == other.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_case_and_dot_insensitive() {
        let a = CacheKey::new("Example.COM.", RecordType::A);
        let b = CacheKey::new("example.com", RecordType::A);
        assert_eq!(a, b);
        assert_eq!(a.domain.as_str(), "example.com");
    }

    #[test]
    fn test_record_type_is_part_of_identity() {
        let a = CacheKey::new("example.com", RecordType::A);
        let aaaa = CacheKey::new("example.com", RecordType::AAAA);
        assert_ne!(a, aaaa);
    }
}
