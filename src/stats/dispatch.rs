use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use super::StatsSource;
use crate::store::{FetchOutcome, FetchTicket};

/// Runs the fetches for a selection change on a tokio runtime and reports
/// each result over a channel drained by the UI loop. In-flight fetches are
/// never cancelled; staleness is decided when the outcome is applied.
pub struct FetchDispatcher<S> {
    source: Arc<S>,
    runtime: Handle,
    outcomes: UnboundedSender<FetchOutcome>,
}

impl<S: StatsSource> FetchDispatcher<S> {
    pub fn new(source: S, runtime: Handle) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            source: Arc::new(source),
            runtime,
            outcomes,
        };
        (dispatcher, rx)
    }

    /// Spawn the summary-list and detail fetches for `ticket`. They run
    /// independently and report in whatever order they resolve.
    pub fn dispatch(&self, ticket: FetchTicket) {
        debug!(region = %ticket.region.id, generation = ticket.generation, "dispatching fetches");

        let source = Arc::clone(&self.source);
        let tx = self.outcomes.clone();
        self.runtime.spawn(async move {
            let result = source.fetch_all().await;
            if tx.send(FetchOutcome::summaries(ticket, result)).is_err() {
                debug!("outcome receiver dropped, discarding summary list");
            }
        });

        let source = Arc::clone(&self.source);
        let tx = self.outcomes.clone();
        self.runtime.spawn(async move {
            let result = source.fetch_region(ticket.api_name()).await;
            if tx.send(FetchOutcome::detail(ticket, result)).is_err() {
                debug!("outcome receiver dropped, discarding detail");
            }
        });
    }
}
