//! Traits defining the contract with the remote event registry.

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};

use super::models::EventsPage;
use fathom_sync_core::errors::{Error, Result};
use fathom_sync_core::{EventName, RemoteEvent};

/// Trait for talking to the remote event registry.
///
/// Implementations only provide the two single-request primitives; pagination
/// and batch creation are built on top of them.
#[async_trait]
pub trait EventRegistryClient: Send + Sync {
    /// Fetch one page of events starting after `cursor` (empty for the first page).
    async fn fetch_page(&self, cursor: &str) -> Result<EventsPage>;

    /// Create a single event and return the registry record.
    async fn create_event(&self, name: &EventName) -> Result<RemoteEvent>;

    /// Fetch every registered event, following the pagination cursor.
    ///
    /// Records are returned in page order. Any failed page fails the whole
    /// fetch and discards what was already read.
    async fn fetch_all(&self) -> Result<Vec<RemoteEvent>> {
        let mut events = Vec::new();
        let mut cursor = String::new();
        let mut pages: usize = 0;

        loop {
            let page = self.fetch_page(&cursor).await?;
            pages += 1;
            debug!(
                "Fetched page {} ({} events, has_more={})",
                pages,
                page.data.len(),
                page.has_more
            );

            let next_cursor = page.next_cursor().map(str::to_string);
            let has_more = page.has_more;
            events.extend(page.data);

            if !has_more {
                break;
            }
            match next_cursor {
                Some(next) if next == cursor => {
                    return Err(Error::RemoteUnavailable(format!(
                        "pagination cursor did not advance past '{}'",
                        cursor
                    )));
                }
                Some(next) => cursor = next,
                None => {
                    warn!("Page {} reported more events but was empty, stopping", pages);
                    break;
                }
            }
        }

        info!("Fetched {} remote events in {} pages", events.len(), pages);
        Ok(events)
    }

    /// Create every name concurrently, one request per name.
    ///
    /// Results are returned in completion order. The first failure aborts the
    /// batch and drops the requests still in flight; events created before
    /// that point stay registered and are picked up by the next fetch.
    async fn create_many(&self, names: &[EventName]) -> Result<Vec<RemoteEvent>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut pending: FuturesUnordered<_> = names
            .iter()
            .map(|name| async move {
                let event = self.create_event(name).await?;
                Ok::<_, Error>((name, event))
            })
            .collect();

        let mut created = Vec::with_capacity(names.len());
        while let Some(outcome) = pending.next().await {
            let (requested, event) = outcome?;
            if event.name != *requested {
                warn!(
                    "Registry created '{}' (id {}) for requested name '{}'",
                    event.name, event.id, requested
                );
            }
            debug!("Created event '{}' with id {}", event.name, event.id);
            created.push(event);
        }

        info!("Created {} events", created.len());
        Ok(created)
    }
}
