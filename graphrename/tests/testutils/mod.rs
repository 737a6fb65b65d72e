//! Test utilities for GraphRename integration tests
//!
//! - TestFixture: a populated in-memory store plus coordinator access
//! - FaultyStore: a store wrapper that injects failures and cancellation

#![allow(dead_code)]

pub mod faulty_store;
pub mod test_fixture;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
