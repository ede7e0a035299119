// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use serde::Serialize;
use serde_json::Value;

use crate::app::types::{JobConfiguration, SubmissionParameters};

/// Body of a Livy `POST /batches` request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_list")]
    args: &'a [String],
    #[serde(skip_serializing_if = "is_empty_list")]
    jars: &'a [String],
    #[serde(skip_serializing_if = "is_empty_list")]
    files: &'a [String],
    #[serde(skip_serializing_if = "is_empty_list")]
    py_files: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    driver_memory: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    driver_cores: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    executor_memory: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    executor_cores: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_executors: Option<u32>,
    #[serde(skip_serializing_if = "is_empty_conf")]
    conf: &'a JobConfiguration,
}

fn is_empty_list(values: &&[String]) -> bool {
    values.is_empty()
}

fn is_empty_conf(conf: &&JobConfiguration) -> bool {
    conf.is_empty()
}

pub fn batch_request(parameters: &SubmissionParameters) -> Value {
    let request = BatchRequest {
        file: parameters.file.as_deref(),
        class_name: parameters.class_name.as_deref(),
        name: parameters.name.as_deref(),
        args: &parameters.args,
        jars: &parameters.jars,
        files: &parameters.files,
        py_files: &parameters.py_files,
        driver_memory: parameters.driver_memory.as_deref(),
        driver_cores: parameters.driver_cores,
        executor_memory: parameters.executor_memory.as_deref(),
        executor_cores: parameters.executor_cores,
        num_executors: parameters.num_executors,
        conf: &parameters.conf,
    };
    // Only strings, integers and string maps; serialization cannot fail.
    serde_json::to_value(request).unwrap_or(Value::Null)
}
