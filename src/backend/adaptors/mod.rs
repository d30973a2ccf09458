#[macro_use]
mod watcher_client;

mod elastic_v5;
mod elastic_v6;
mod elastic_v7;
pub(crate) mod rest;

pub use elastic_v5::*;
pub use elastic_v6::*;
pub use elastic_v7::*;
