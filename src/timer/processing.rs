use std::future::Future;

use anyhow::Result;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error};

use super::runner::TimerEvent;

/// Consumer of timer events. The page hosting the timer plugs its completion handling in here.
pub trait TimerEventProcessor {
    fn process_next(&mut self, event: TimerEvent) -> impl Future<Output = Result<()>>;

    fn finalize(&mut self) -> impl Future<Output = Result<()>>;
}

/// Runs both processors on every event, first to second.
impl<A: TimerEventProcessor, B: TimerEventProcessor> TimerEventProcessor for (A, B) {
    async fn process_next(&mut self, event: TimerEvent) -> Result<()> {
        let first = self.0.process_next(event).await;
        let second = self.1.process_next(event).await;
        first.and(second)
    }

    async fn finalize(&mut self) -> Result<()> {
        let first = self.0.finalize().await;
        let second = self.1.finalize().await;
        first.and(second)
    }
}

/// Drains the event channel of a [TimerRunner](super::runner::TimerRunner). A failing event is
/// logged and skipped, the timer keeps going.
pub struct ProcessingModule<Processor> {
    receiver: Receiver<TimerEvent>,
    processor: Processor,
}

impl<P: TimerEventProcessor> ProcessingModule<P> {
    pub fn new(receiver: Receiver<TimerEvent>, processor: P) -> Self {
        Self {
            receiver,
            processor,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        while let Some(event) = self.receiver.recv().await {
            debug!("Processing event {:?}", event);
            if let Err(e) = self.processor.process_next(event).await {
                error!("Error processing event {:?}: {e:?}", event)
            }
        }

        let result = self.processor.finalize().await;
        self.receiver.close();
        result
    }
}
