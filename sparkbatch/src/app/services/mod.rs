// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

pub mod credentials;
pub mod job_builder;
pub mod livy;
pub mod resolver;
pub mod strategy;
pub mod validation;
pub mod wasb;
