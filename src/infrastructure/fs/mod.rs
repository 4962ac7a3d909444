//! Local file system helpers

mod local;

pub use local::LocalFs;
