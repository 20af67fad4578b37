//! Bounded concurrent aggregation

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use futures::stream::{self, StreamExt, TryStreamExt};

/// Run `op` once per key, at most `limit` at a time, and collect by key
///
/// The first error ends the aggregation: sub-operations still in flight are
/// dropped and no partial map is returned.
pub async fn fan_out<K, V, E, I, F, Fut>(keys: I, limit: usize, op: F) -> Result<HashMap<K, V>, E>
where
    I: IntoIterator<Item = K>,
    K: Eq + Hash + Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    stream::iter(keys)
        .map(|key| {
            let pending = op(key.clone());
            async move { pending.await.map(|value| (key, value)) }
        })
        .buffer_unordered(limit.max(1))
        .try_collect()
        .await
}
