use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use super::{Jurisdiction, RuleSet, RulesError, RulesProvider};

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// TTL cache in front of a slower rules source.
///
/// Entries are keyed by (jurisdiction, year) and expire independently; an
/// expired entry behaves exactly like a miss. The inner provider is called
/// outside the lock, so a miss only blocks the requesting caller. Two
/// concurrent misses on the same key may both reach the provider and the
/// later write wins; rule sets for a scope are interchangeable within the
/// TTL window. Fetched sets are validated before they are cached, so no
/// consumer ever reads a malformed entry.
pub struct CachedRulesProvider<P> {
    inner: P,
    ttl: Duration,
    entries: Mutex<HashMap<(String, i32), CacheEntry>>,
}

struct CacheEntry {
    rules: RuleSet,
    expires_at: Instant,
}

impl<P> CachedRulesProvider<P> {
    /// Wrap a provider with the default one-hour TTL.
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn cached(&self, key: &(String, i32)) -> Option<RuleSet> {
        let entries = self.entries.lock().expect("rules cache mutex poisoned");
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.rules.clone())
    }

    fn store(&self, key: (String, i32), rules: RuleSet) {
        let mut entries = self.entries.lock().expect("rules cache mutex poisoned");
        entries.insert(
            key,
            CacheEntry {
                rules,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }
}

impl<P: RulesProvider> RulesProvider for CachedRulesProvider<P> {
    fn rules_for(&self, jurisdiction: &Jurisdiction, year: i32) -> Result<RuleSet, RulesError> {
        let key = (jurisdiction.code().to_string(), year);

        if let Some(rules) = self.cached(&key) {
            debug!(jurisdiction = %jurisdiction, year, "rules cache hit");
            return Ok(rules);
        }

        debug!(jurisdiction = %jurisdiction, year, "rules cache miss");
        let rules = self.inner.rules_for(jurisdiction, year)?;
        rules.validate()?;

        self.store(key, rules.clone());
        Ok(rules)
    }
}
