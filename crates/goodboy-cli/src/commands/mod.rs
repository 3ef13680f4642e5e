//! Command handlers. Each owns one user-visible action.

pub mod create;
