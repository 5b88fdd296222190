#![forbid(unsafe_code)]

//! Compiles game assets into tagged, compressed frames and packs compiled
//! assets into `.pla` archives read by the runtime content manager.

pub mod pak;
