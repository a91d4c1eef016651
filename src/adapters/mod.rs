// Adapters layer: concrete implementations for external systems (input tables, REST backend, local files).

pub mod rest;
pub mod storage;
pub mod table;
