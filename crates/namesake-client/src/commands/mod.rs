pub mod batch;
pub mod classify;
mod common;
pub mod nicknames;
