//! Transpiler tests.

mod core;
