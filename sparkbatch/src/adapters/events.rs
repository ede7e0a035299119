// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use tokio::sync::mpsc;

use crate::app::ports::EventSinkPort;
use crate::app::types::JobEvent;

/// Event sink backed by an unbounded channel; the receiver side renders events.
#[derive(Clone, Debug)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<JobEvent>,
}

impl ChannelEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<JobEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSinkPort for ChannelEventSink {
    fn send(&self, event: JobEvent) {
        // receiver dropped: nobody is listening any more
        let _ = self.tx.send(event);
    }

    fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
