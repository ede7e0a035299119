// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod cli;
pub mod deploy;
pub mod events;
pub mod inventory;
pub mod jobfile;
pub mod secrets;
pub mod telemetry;
pub mod time;
