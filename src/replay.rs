//! Rebuilding aggregates from ordered event streams
use crate::client_file::ClientFile;
use crate::error::EventStreamError;
use crate::event::{ClientFileEvent, EventPayload};
use crate::fetcher::CompanyFetcher;
use anyhow::Context;

/// Rebuild a client file by folding a complete event stream.
///
/// The first event must be the creation event; every later event must carry
/// the aggregate's id and the next sequential event number. Sequencing is
/// checked here, at the boundary, so the fold itself stays total.
pub fn replay(
    events: &[ClientFileEvent],
    fetcher: &dyn CompanyFetcher,
) -> anyhow::Result<ClientFile> {
    let (first, rest) = events.split_first().ok_or(EventStreamError::EmptyStream)?;

    let mut file = ClientFile::create(first, fetcher).context("failed to replay stream head")?;

    for event in rest {
        if event.client_file_id != *file.client_file_id() {
            return Err(EventStreamError::ForeignEvent {
                expected: file.client_file_id().clone(),
                got: event.client_file_id.clone(),
            }
            .into());
        }
        if event.event_number != file.event_count() + 1 {
            return Err(EventStreamError::OutOfSequence {
                expected: file.event_count() + 1,
                got: event.event_number,
            }
            .into());
        }
        if matches!(event.payload, EventPayload::Creation { .. }) {
            return Err(EventStreamError::DuplicateCreation.into());
        }

        file.apply_event(event);
    }

    Ok(file)
}
