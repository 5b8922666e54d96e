//! Behavioural tests for deep merging using `rstest-bdd`.
//!
//! Steps live in [`steps`], shared state in [`fixtures`], and [`scenarios`]
//! binds the feature files to both.

mod fixtures;
mod scenarios;
mod steps;
