pub mod classify;
pub mod explain;
