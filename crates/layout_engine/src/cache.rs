//! Fit cache for repeated draws of the same text
//!
//! [`AutoFitEngine`] re-measures on every call. Hosts that redraw the same
//! label many times can route fits through a [`FitCache`], which memoizes
//! results per (text, box, engine settings) and evicts least-recently-used
//! entries once full.
//!
//! The measurer is not part of the key. A cache must only ever be used with
//! one measurer, and must be cleared if that measurer's fonts change.

use crate::{AutoFitEngine, BoxSize, CacheSettings, FitResult, Result, TextMeasurer};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use text_model::StyledText;

/// Cache key for a fit, based on content, box and engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FitCacheKey {
    /// Hash of the styled text
    pub content_hash: u64,
    /// Bit pattern of the box width
    pub width_bits: u32,
    /// Bit pattern of the box height
    pub height_bits: u32,
    /// Hash of the engine's search settings
    pub settings_hash: u64,
}

impl FitCacheKey {
    pub fn new(text: &StyledText, target: BoxSize, engine: &AutoFitEngine) -> Self {
        Self {
            content_hash: text.content_hash(),
            width_bits: dimension_bits(target.width),
            height_bits: dimension_bits(target.height),
            settings_hash: hash_engine_settings(engine),
        }
    }
}

/// Exact key for a box dimension; `-0.0` and `0.0` share a key
fn dimension_bits(value: f32) -> u32 {
    if value == 0.0 {
        0.0f32.to_bits()
    } else {
        value.to_bits()
    }
}

fn hash_engine_settings(engine: &AutoFitEngine) -> u64 {
    let mut hasher = DefaultHasher::new();
    engine.range().min().to_bits().hash(&mut hasher);
    engine.range().max().to_bits().hash(&mut hasher);
    engine.accuracy_threshold().to_bits().hash(&mut hasher);
    engine.reference_font_size().to_bits().hash(&mut hasher);
    hasher.finish()
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped because the cache was full
    pub evictions: u64,
    pub full_clears: u64,
}

impl CacheStats {
    /// Get the hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }
}

/// LRU cache of fit results
#[derive(Debug)]
pub struct FitCache {
    entries: HashMap<FitCacheKey, Option<FitResult>>,
    /// LRU order (front = most recently used)
    lru: VecDeque<FitCacheKey>,
    max_entries: usize,
    stats: CacheStats,
}

impl FitCache {
    pub fn new() -> Self {
        Self::with_settings(&CacheSettings::default())
    }

    pub fn with_settings(settings: &CacheSettings) -> Self {
        Self {
            entries: HashMap::new(),
            lru: VecDeque::new(),
            max_entries: settings.max_entries,
            stats: CacheStats::default(),
        }
    }

    /// Fit `text` into `target`, reusing an earlier result for the same
    /// inputs. "Nothing to draw" results are cached too; errors are not.
    pub fn fit<M>(
        &mut self,
        engine: &AutoFitEngine,
        text: &StyledText,
        target: BoxSize,
        measurer: &M,
    ) -> Result<Option<FitResult>>
    where
        M: TextMeasurer + ?Sized,
    {
        let key = FitCacheKey::new(text, target, engine);

        if let Some(cached) = self.entries.get(&key).copied() {
            self.stats.hits += 1;
            self.touch(key);
            return Ok(cached);
        }

        self.stats.misses += 1;
        let result = engine.fit(text, target, measurer)?;

        if self.max_entries > 0 {
            self.entries.insert(key, result);
            self.lru.push_front(key);
            self.enforce_limit();
        }

        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.full_clears += 1;
    }

    fn touch(&mut self, key: FitCacheKey) {
        self.lru.retain(|k| *k != key);
        self.lru.push_front(key);
    }

    fn enforce_limit(&mut self) {
        while self.entries.len() > self.max_entries {
            let Some(key) = self.lru.pop_back() else {
                break;
            };
            if self.entries.remove(&key).is_some() {
                self.stats.evictions += 1;
            }
        }
    }
}

impl Default for FitCache {
    fn default() -> Self {
        Self::new()
    }
}
