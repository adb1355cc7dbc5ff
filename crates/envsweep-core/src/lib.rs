pub mod config;
pub mod envkey;
pub mod error;
pub mod io;
pub mod logs;
pub mod pipeline;
pub mod remediate;
pub mod report;
pub mod rewrite;
pub mod runner;
pub mod template;
pub mod visibility;

pub use error::{Result, SweepError};
