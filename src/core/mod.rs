// src/core/mod.rs
pub mod casing;
pub mod engine;
pub mod mapping;
pub mod stats;
pub mod tokenizer;
pub mod types;
