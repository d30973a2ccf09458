mod host;


pub use host::*;
