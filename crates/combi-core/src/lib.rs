//! Data-driven test execution over combinatorial matrices.
//!
//! Builds a [`CombinatorialEngine`](combi_engine::CombinatorialEngine) from
//! a JSON [`MatrixDef`](combi_ir::MatrixDef) and runs a test case once per
//! accepted combination, collecting failures and coverage.

pub mod config;
pub mod matrix;
pub mod runner;

pub use config::RunConfig;
pub use matrix::{build_engine, load_engine, BuildError};
pub use runner::{run_combinations, run_matrix, CaseFailure, RunError, RunReport};
