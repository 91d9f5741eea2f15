// rosterhub/src/services/mod.rs
pub mod sync;
