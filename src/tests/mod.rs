// rosterhub/src/tests/mod.rs
pub mod common;

mod auth_tests;
mod mailbox_tests;
