//! The cluster accumulator.
//!
//! A [`Cluster`] tracks the running mean, min and max of the keys it has
//! admitted, and keeps the admitted items in arrival order. A candidate is
//! admitted when its key lies within `tolerance` of the *current* mean.

use serde::{Deserialize, Serialize};

/// Running statistics over admitted keys.
///
/// The mean is updated incrementally, `(mean * n + key) / (n + 1)`, never
/// recomputed from the full set of keys. Replaying the same keys in the same
/// order always reproduces the same means bit for bit.
///
/// `mean * n` is formed before dividing, so it overflows to infinity once it
/// exceeds `f64::MAX` even though every key is finite. With keys near
/// `1e308` a second admission already yields an infinite mean, after which
/// no finite key is within tolerance. Keep `|key| * len` below `f64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunningStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl RunningStats {
    /// Statistics of a single seed key.
    pub fn seeded(key: f64) -> Self {
        Self {
            mean: key,
            min: key,
            max: key,
            count: 1,
        }
    }

    /// The statistics after admitting `key`.
    #[must_use]
    pub fn admitting(&self, key: f64) -> Self {
        let n = self.count as f64;
        Self {
            mean: (self.mean * n + key) / (n + 1.0),
            min: self.min.min(key),
            max: self.max.max(key),
            count: self.count + 1,
        }
    }
}

/// A group of items whose keys stayed close to the group's running mean.
///
/// A cluster is only constructible from a seed item, so it is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster<T> {
    tolerance: f64,
    stats: RunningStats,
    members: Vec<T>,
}

impl<T> Cluster<T> {
    /// Start a cluster from its first item.
    pub fn new(seed: T, key: f64, tolerance: f64) -> Self {
        Self {
            tolerance,
            stats: RunningStats::seeded(key),
            members: vec![seed],
        }
    }

    /// Whether a candidate with this key would be admitted right now.
    ///
    /// A NaN key is never accepted.
    pub fn accepts(&self, key: f64) -> bool {
        (key - self.stats.mean).abs() <= self.tolerance
    }

    /// Offer an item to the cluster.
    ///
    /// On rejection the item is handed back in `Err` and the cluster is left
    /// exactly as it was.
    pub fn try_admit(&mut self, item: T, key: f64) -> Result<(), T> {
        if !self.accepts(key) {
            return Err(item);
        }
        let next = self.stats.admitting(key);
        self.members.push(item);
        self.stats = next;
        Ok(())
    }

    pub fn mean(&self) -> f64 {
        self.stats.mean
    }

    pub fn min(&self) -> f64 {
        self.stats.min
    }

    pub fn max(&self) -> f64 {
        self.stats.max
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn stats(&self) -> RunningStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Never true: a cluster always holds its seed.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Admitted items in arrival order. The first one is the seed.
    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub fn into_members(self) -> Vec<T> {
        self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn summary(&self) -> ClusterSummary {
        ClusterSummary {
            mean: self.stats.mean,
            min: self.stats.min,
            max: self.stats.max,
            tolerance: self.tolerance,
            len: self.members.len(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Cluster<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Serializable snapshot of a cluster's statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub tolerance: f64,
    pub len: usize,
}
