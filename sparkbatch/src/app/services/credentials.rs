// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use crate::app::ports::EventSinkPort;
use crate::app::services::wasb::WasbUri;
use crate::app::types::{JobConfiguration, JobEvent, Secret};

pub const STORAGE_KEY_NAMESPACE: &str = "spark.hadoop.fs.azure.account.key";
/// Secret-provider service under which storage account keys are stored.
pub const STORAGE_KEY_SECRET_SERVICE: &str = "azure.storage";

/// Hadoop property carrying the account key for `root`'s storage account.
pub fn storage_key_property(root: &WasbUri) -> String {
    format!("{STORAGE_KEY_NAMESPACE}.{}", root.blob_host())
}

/// Merges the storage key for `root` into `conf`, replacing any previous value.
/// Returns whether a key was written; a missing credential only warns.
pub fn inject_storage_key(
    conf: &mut JobConfiguration,
    root: &WasbUri,
    credential: Option<&Secret>,
    events: &dyn EventSinkPort,
) -> bool {
    let property = storage_key_property(root);
    let Some(credential) = credential.filter(|credential| !credential.is_blank()) else {
        tracing::warn!(property = %property, "no storage key supplied");
        events.send(JobEvent::warning(format!(
            "No access key for storage account {}; the job may not be able to read its artifacts",
            root.storage_account()
        )));
        return false;
    };
    if conf
        .merge_entry(property.clone(), credential.expose())
        .is_some()
    {
        tracing::debug!(property = %property, "replaced existing storage key");
    }
    true
}
