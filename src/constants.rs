// -
// Backend operation names, used as metric labels and in error messages

pub(crate) const OP_PING: &str = "ping";
pub(crate) const OP_GET_WATCH: &str = "get_watch";
pub(crate) const OP_PUT_WATCH: &str = "put_watch";
pub(crate) const OP_DELETE_WATCH: &str = "delete_watch";
pub(crate) const OP_ACTIVATE_WATCH: &str = "activate_watch";
pub(crate) const OP_DEACTIVATE_WATCH: &str = "deactivate_watch";

// -
// Lifecycle operation names

pub(crate) const LIFECYCLE_CREATE: &str = "create";
pub(crate) const LIFECYCLE_READ: &str = "read";
pub(crate) const LIFECYCLE_UPDATE: &str = "update";
pub(crate) const LIFECYCLE_DELETE: &str = "delete";
pub(crate) const LIFECYCLE_IMPORT: &str = "import";
pub(crate) const LIFECYCLE_ACTIVATE: &str = "activate";
pub(crate) const LIFECYCLE_DEACTIVATE: &str = "deactivate";

/// Environment variable prefix for configuration overrides
pub(crate) const ENV_PREFIX: &str = "WATCH_RECONCILER";

/// Fallback configuration file path when `--config` is not given
pub(crate) const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
