//! Unit tests.

mod cache;
mod links;
