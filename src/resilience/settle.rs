//! Bounded waits that all run to completion.
//!
//! Each anchor gets its own time budget and the waits run concurrently, so a
//! slow or absent element never delays or fails the others.

use super::timeout::TimeoutExt;
use futures::future::join_all;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Run `wait` for every anchor under an independent `bound` and return the
/// anchors whose wait did not finish, in input order.
pub async fn missing_anchors<'a, F, Fut>(
    anchors: &[&'a str],
    bound: Duration,
    wait: F,
) -> Vec<String>
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = ()>,
{
    let waits = anchors.iter().map(|&anchor| {
        let pending = wait(anchor);
        async move { (anchor, pending.with_timeout_duration(bound).await.is_ok()) }
    });

    join_all(waits)
        .await
        .into_iter()
        .filter_map(|(anchor, found)| {
            if !found {
                debug!("Anchor {:?} not found within {:?}", anchor, bound);
            }
            (!found).then(|| anchor.to_string())
        })
        .collect()
}
