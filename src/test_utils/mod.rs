//! Shared test components: an in-memory cluster speaking each watcher API
//! generation, and small declaration fixtures.
mod fake_cluster;

pub use fake_cluster::*;

pub(crate) const SAMPLE_WATCH: &str = r#"{
  "trigger": { "schedule": { "interval": "10m" } },
  "input": { "simple": { "payload": { "send": "yes" } } },
  "condition": { "always": {} },
  "actions": { "log": { "logging": { "text": "executed" } } }
}"#;

pub(crate) const SAMPLE_WATCH_HOURLY: &str = r#"{
  "trigger": { "schedule": { "interval": "1h" } },
  "input": { "simple": {} },
  "condition": { "never": {} },
  "actions": {}
}"#;
