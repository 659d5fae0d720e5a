// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Cursor-paginated record stream backing `search_all`.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tracing::{debug, trace};

use crate::client::EuropeanaClient;
use crate::error::Result;
use crate::types::{Record, SearchPage, SearchRequest};

type PageFuture = Pin<Box<dyn Future<Output = Result<SearchPage>> + Send>>;

/// Lazy stream over every record of a search result set.
///
/// Fetches one page per round trip and yields its records one at a time
/// before fetching the next page with the server-provided cursor. Strictly
/// sequential: at most one request is in flight, and nothing is fetched
/// until the stream is polled.
///
/// State machine: `Idle → Fetching → HasPage → (Fetching | Done)`. Any
/// fetch failure is yielded once as an `Err` item and moves the stream to
/// `Done`; callers decide whether to restart from the last cursor.
pub struct RecordStream {
	client: EuropeanaClient,
	request: SearchRequest,
	state: StreamState,
}

enum StreamState {
	/// Not started; holds the cursor for the first fetch.
	Idle { cursor: String },
	Fetching { future: PageFuture },
	HasPage {
		buffer: VecDeque<Record>,
		next_cursor: Option<String>,
	},
	Done,
}

impl RecordStream {
	pub(crate) fn new(client: EuropeanaClient, request: SearchRequest) -> Self {
		// `*` starts a traversal; an explicit cursor resumes one.
		let cursor = request.cursor.clone().unwrap_or_else(|| "*".to_string());
		Self {
			client,
			request,
			state: StreamState::Idle { cursor },
		}
	}

	fn fetch(&self, cursor: String) -> PageFuture {
		let client = self.client.clone();
		let mut request = self.request.clone();
		trace!(cursor = %cursor, "fetching next page");
		request.cursor = Some(cursor);
		Box::pin(async move { client.search(&request).await })
	}
}

impl Stream for RecordStream {
	type Item = Result<Record>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let this = self.get_mut();

		loop {
			match std::mem::replace(&mut this.state, StreamState::Done) {
				StreamState::Idle { cursor } => {
					let future = this.fetch(cursor);
					this.state = StreamState::Fetching { future };
				}
				StreamState::Fetching { mut future } => match future.as_mut().poll(cx) {
					Poll::Pending => {
						this.state = StreamState::Fetching { future };
						return Poll::Pending;
					}
					Poll::Ready(Ok(page)) => {
						debug!(
							count = page.items.len(),
							has_next_cursor = page.next_cursor.is_some(),
							"page fetched"
						);
						if page.items.is_empty() {
							// An empty page ends the traversal even when a
							// cursor is still present.
							return Poll::Ready(None);
						}
						this.state = StreamState::HasPage {
							buffer: page.items.into(),
							next_cursor: page.next_cursor,
						};
					}
					Poll::Ready(Err(error)) => {
						// State is already Done: the error is yielded once
						// and never retried.
						return Poll::Ready(Some(Err(error)));
					}
				},
				StreamState::HasPage {
					mut buffer,
					next_cursor,
				} => {
					if let Some(record) = buffer.pop_front() {
						this.state = StreamState::HasPage {
							buffer,
							next_cursor,
						};
						return Poll::Ready(Some(Ok(record)));
					}
					match next_cursor {
						Some(cursor) => {
							let future = this.fetch(cursor);
							this.state = StreamState::Fetching { future };
						}
						None => return Poll::Ready(None),
					}
				}
				StreamState::Done => return Poll::Ready(None),
			}
		}
	}
}
