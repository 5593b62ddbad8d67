/// Where a query looks for results, and how many completions it delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CachePolicy {
    /// Network only; results are not written to the cache.
    #[default]
    IgnoreCache,
    /// Cache only; a miss is reported as [`QueryErrorKind::CacheMiss`](crate::QueryErrorKind::CacheMiss).
    CacheOnly,
    /// Network only; results are written to the cache.
    NetworkOnly,
    /// Cache first, network on a miss.
    CacheElseNetwork,
    /// Network first, cache when the connection fails.
    NetworkElseCache,
    /// Cache result first, then the network result. Two completions per request.
    CacheThenNetwork,
}

impl CachePolicy {
    /// Whether one logical request produces two completions.
    pub fn delivers_twice(self) -> bool {
        matches!(self, CachePolicy::CacheThenNetwork)
    }

    pub fn reads_cache(self) -> bool {
        matches!(
            self,
            CachePolicy::CacheOnly
                | CachePolicy::CacheElseNetwork
                | CachePolicy::NetworkElseCache
                | CachePolicy::CacheThenNetwork
        )
    }

    pub fn uses_network(self) -> bool {
        !matches!(self, CachePolicy::CacheOnly)
    }
}
