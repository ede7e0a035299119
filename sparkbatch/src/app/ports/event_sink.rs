// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::types::JobEvent;

/// Append-only progress channel shared by the pipeline and the built job.
/// Writers never read back; a closed sink drops events silently.
pub trait EventSinkPort: Send + Sync {
    fn send(&self, event: JobEvent);

    fn is_closed(&self) -> bool {
        false
    }
}
