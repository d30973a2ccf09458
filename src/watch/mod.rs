//! Declarative lifecycle of a single watcher watch.

mod controller;
mod resource;


pub use controller::*;
pub use resource::*;
