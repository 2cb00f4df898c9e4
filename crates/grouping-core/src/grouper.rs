//! First-fit grouping over a sequence of items.
//!
//! Each item is offered to the existing clusters in the order they were
//! created and joins the first one that accepts it, even when a later
//! cluster's mean is closer. Items no cluster accepts seed a new cluster.
//! Assignments are never revisited. Once the input is exhausted the clusters
//! are stably sorted by descending mean.

use grouping_common::{GroupingError, GroupingResult};

use crate::cluster::Cluster;
use crate::key::{Identity, KeyFn, Scalar};

/// Groups items by a scalar key with a fixed tolerance.
#[derive(Debug, Clone)]
pub struct Grouper<K> {
    tolerance: f64,
    key: K,
}

impl Grouper<Identity> {
    /// A grouper for plain numeric values.
    pub fn scalar(tolerance: f64) -> GroupingResult<Self> {
        Self::new(tolerance, Identity)
    }
}

impl<K> Grouper<K> {
    /// Create a grouper. A NaN tolerance is rejected; negative and infinite
    /// tolerances are accepted as-is.
    pub fn new(tolerance: f64, key: K) -> GroupingResult<Self> {
        if tolerance.is_nan() {
            return Err(GroupingError::InvalidTolerance { tolerance });
        }
        Ok(Self { tolerance, key })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn key_fn(&self) -> &K {
        &self.key
    }

    /// Start an incremental grouping pass.
    pub fn session<T>(&self) -> GroupingSession<'_, T, K>
    where
        K: KeyFn<T>,
    {
        GroupingSession {
            grouper: self,
            clusters: Vec::new(),
            seen: 0,
        }
    }

    /// Group `items` in a single pass.
    ///
    /// Fails without returning partial results if any item's key is NaN or
    /// infinite.
    pub fn group<T, I>(&self, items: I) -> GroupingResult<Vec<Cluster<T>>>
    where
        K: KeyFn<T>,
        I: IntoIterator<Item = T>,
    {
        let mut session = self.session();
        for item in items {
            session.push(item)?;
        }
        Ok(session.finish())
    }
}

/// An in-progress grouping pass fed one item at a time.
#[derive(Debug)]
pub struct GroupingSession<'g, T, K> {
    grouper: &'g Grouper<K>,
    clusters: Vec<Cluster<T>>,
    seen: usize,
}

impl<T, K: KeyFn<T>> GroupingSession<'_, T, K> {
    /// Assign one item.
    ///
    /// Returns the creation-order index of the cluster that received it. A
    /// non-finite key is rejected and leaves the session unchanged.
    pub fn push(&mut self, item: T) -> GroupingResult<usize> {
        let key = self.grouper.key.key(&item);
        if !key.is_finite() {
            return Err(GroupingError::NonFiniteKey {
                index: self.seen,
                value: key,
            });
        }
        self.seen += 1;

        let mut pending = item;
        for (slot, cluster) in self.clusters.iter_mut().enumerate() {
            match cluster.try_admit(pending, key) {
                Ok(()) => return Ok(slot),
                Err(item) => pending = item,
            }
        }

        self.clusters
            .push(Cluster::new(pending, key, self.grouper.tolerance));
        let slot = self.clusters.len() - 1;
        tracing::trace!(slot, key, "seeded new cluster");
        Ok(slot)
    }

    /// Clusters built so far, in creation order.
    pub fn clusters(&self) -> &[Cluster<T>] {
        &self.clusters
    }

    /// Number of items assigned so far.
    pub fn items_seen(&self) -> usize {
        self.seen
    }

    /// Finish the pass: clusters sorted by descending mean. Clusters with
    /// equal means keep their creation order.
    pub fn finish(self) -> Vec<Cluster<T>> {
        let mut clusters = self.clusters;
        clusters.sort_by(|a, b| b.mean().total_cmp(&a.mean()));
        tracing::debug!(
            items = self.seen,
            clusters = clusters.len(),
            tolerance = self.grouper.tolerance,
            "grouping finished"
        );
        clusters
    }
}

/// Group plain numeric values.
pub fn group_items<V: Scalar>(values: &[V], tolerance: f64) -> GroupingResult<Vec<Cluster<V>>> {
    Grouper::scalar(tolerance)?.group(values.iter().copied())
}

/// Group arbitrary items by the key `key` extracts from each of them.
pub fn group_by<T, I, F>(items: I, key: F, tolerance: f64) -> GroupingResult<Vec<Cluster<T>>>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> f64,
{
    Grouper::new(tolerance, key)?.group(items)
}
