use linkreach_domain::{DeliveryChunk, RemoteRecord};

use crate::pagination::Continuation;

/// Split a fetched page into delivery chunks of `chunk_size` items.
///
/// Order and length are preserved. Only the last chunk carries the stream
/// state: `fetch_completed` on a terminal page, the resume cursor otherwise.
/// An empty page still yields one chunk.
pub fn split_page(
    items: Vec<RemoteRecord>,
    chunk_size: usize,
    continuation: Continuation,
) -> Vec<DeliveryChunk> {
    let chunk_size = chunk_size.max(1);
    let terminal = continuation.is_terminal();
    let resume_cursor = continuation.cursor();

    if items.is_empty() {
        return vec![DeliveryChunk {
            items,
            fetch_completed: terminal,
            resume_cursor,
            failure: None,
        }];
    }

    let total = items.len();
    let mut chunks = Vec::with_capacity(total.div_ceil(chunk_size));
    let mut remaining = items.into_iter().peekable();
    let mut end = 0;
    while remaining.peek().is_some() {
        let batch: Vec<RemoteRecord> = remaining.by_ref().take(chunk_size).collect();
        end += batch.len();
        let is_last = end >= total;
        chunks.push(DeliveryChunk {
            items: batch,
            fetch_completed: terminal && is_last,
            resume_cursor: if is_last { resume_cursor } else { None },
            failure: None,
        });
    }
    chunks
}
