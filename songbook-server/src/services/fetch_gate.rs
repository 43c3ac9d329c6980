//! Deadline-bounded metadata fetch
//!
//! The provider call runs on its own task so it can be raced against a
//! timer. Success and failure each have a capacity-1 oneshot channel;
//! sending on a oneshot never blocks, so the fetch task always finishes
//! even after the caller has stopped listening. A late result is logged
//! and dropped. The task is never aborted.

use songbook_common::SongDetails;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::metadata_client::MetadataSource;
use super::ServiceError;

/// Fetch song details, giving up after `deadline`
///
/// Exactly one of three outcomes is returned: the provider's details,
/// the provider's error, or [`ServiceError::DeadlineExceeded`].
pub async fn fetch_with_deadline(
    source: Arc<dyn MetadataSource>,
    group: &str,
    song: &str,
    deadline: Duration,
) -> Result<SongDetails, ServiceError> {
    let (success_tx, success_rx) = oneshot::channel();
    let (failure_tx, failure_rx) = oneshot::channel();

    let group = group.to_owned();
    let song = song.to_owned();

    tokio::spawn(async move {
        match source.fetch_details(&group, &song).await {
            Ok(details) => {
                if success_tx.send(details).is_err() {
                    debug!(group = %group, song = %song, "Discarding late metadata result");
                }
            }
            Err(e) => {
                if failure_tx.send(e).is_err() {
                    debug!(group = %group, song = %song, "Discarding late metadata error");
                }
            }
        }
    });

    // A dropped sender resolves its receiver with Err, which disables that
    // branch; the timer branch is always live.
    tokio::select! {
        Ok(details) = success_rx => Ok(details),
        Ok(error) = failure_rx => Err(ServiceError::Fetch(error)),
        () = tokio::time::sleep(deadline) => {
            warn!(deadline = ?deadline, "Metadata fetch deadline exceeded");
            Err(ServiceError::DeadlineExceeded(deadline))
        }
    }
}
