//! Polling sessions and their consumer-facing handles.

use aastocks_types::{PriceEvent, QuoteSource};
use futures::stream::{self, Stream};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Undelivered events a session may hold. Publishing blocks beyond this.
const PENDING_EVENTS: usize = 1;

/// Shortest polling interval accepted.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Starts polling `source` every `interval` in a background task.
///
/// The session polls its own clone of `source`. The first refresh happens
/// immediately; each following one is scheduled `interval` after the
/// previous tick. Every outcome, price or error, is delivered through the
/// returned [`PriceEvents`] in tick order.
///
/// At most two outcomes are ever outstanding: one queued in the channel and
/// one already fetched and held until the queue frees. No further refresh
/// runs until the held outcome is published, so a slow consumer stretches
/// the cadence instead of building a backlog. The held outcome can be as
/// old as the time the consumer stayed idle.
///
/// The session runs until [`CancelHandle::cancel`] is called or the
/// [`PriceEvents`] receiver is dropped. Dropping the [`CancelHandle`] alone
/// does not stop it. A zero `interval` is raised to one millisecond.
///
/// # Panics
///
/// Panics if called outside of a Tokio runtime.
pub fn start_streaming<S>(source: &S, interval: Duration) -> (PriceEvents, CancelHandle)
where
    S: QuoteSource + Clone + 'static,
{
    let (sender, receiver) = mpsc::channel(PENDING_EVENTS);
    let cancel = CancellationToken::new();

    let poller = Poller {
        source: source.clone(),
        interval: interval.max(MIN_INTERVAL),
        events: sender,
        cancel: cancel.clone(),
    };
    let task = tokio::spawn(poller.run());

    (
        PriceEvents {
            events: receiver,
            cancel: cancel.clone(),
        },
        CancelHandle { cancel, task },
    )
}

/// Background half of a session.
struct Poller<S> {
    source: S,
    interval: Duration,
    events: mpsc::Sender<PriceEvent>,
    cancel: CancellationToken,
}

impl<S: QuoteSource> Poller<S> {
    async fn run(self) {
        let Self {
            mut source,
            interval,
            events,
            cancel,
        } = self;
        let symbol = source.symbol().to_string();
        info!(%symbol, ?interval, "price stream started");

        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tick: u64 = 0;

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            tick += 1;

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                outcome = source.refresh() => outcome,
            };
            match &outcome {
                Ok(snapshot) => debug!(%symbol, tick, price = snapshot.price, "quote refreshed"),
                Err(err) => warn!(%symbol, tick, error = %err, "quote refresh failed"),
            }

            let event = PriceEvent::from(outcome);
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                sent = events.send(event) => {
                    if sent.is_err() {
                        debug!(%symbol, tick, "price consumer dropped");
                        break;
                    }
                }
            }
        }

        info!(%symbol, ticks = tick, "price stream stopped");
    }
}

/// Consumer half of a session.
///
/// Yields events in tick order and `None` once the session has stopped.
/// After cancellation nothing more is yielded, including an event that was
/// already waiting.
#[derive(Debug)]
pub struct PriceEvents {
    events: mpsc::Receiver<PriceEvent>,
    cancel: CancellationToken,
}

impl PriceEvents {
    /// Receives the next event, waiting for the next tick if needed.
    pub async fn recv(&mut self) -> Option<PriceEvent> {
        let event = tokio::select! {
            biased;
            () = self.cancel.cancelled() => None,
            event = self.events.recv() => event,
        };
        if event.is_none() {
            self.events.close();
        }
        event
    }

    /// Returns true once the session has been cancelled.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Adapts the receiver into a [`Stream`] of events.
    pub fn into_stream(self) -> impl Stream<Item = PriceEvent> {
        stream::unfold(self, |mut events| async move {
            events.recv().await.map(|event| (event, events))
        })
    }
}

/// Control half of a session.
#[derive(Debug)]
pub struct CancelHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl CancelHandle {
    /// Signals the session to stop.
    ///
    /// Returns immediately. Calling it again has no further effect.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns true once the background task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels the session and waits for the background task to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the task panicked.
    pub async fn stop(self) -> Result<(), JoinError> {
        self.cancel.cancel();
        self.task.await
    }
}
