//! Declarative management of Elasticsearch watcher watches across client
//! generations 5.x, 6.x and 7.x.
//!
//! A [`BackendHandle`] is built once per connection and carries the adapter for its
//! generation. [`WatchController`] drives the create/read/update/delete lifecycle of a
//! watch through that adapter, and [`discover_host`] reports the endpoint the
//! connection is using.

mod backend;
mod config;
mod constants;
mod discovery;
mod errors;
mod metrics;
mod watch;

pub use backend::*;
pub use config::*;
pub use discovery::*;
pub use errors::*;
pub use metrics::*;
pub use watch::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod errors_test;
