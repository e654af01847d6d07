//! Persisted login state.

pub mod storage;
