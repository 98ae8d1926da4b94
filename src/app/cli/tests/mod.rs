//! Tests for the CLI module

mod config_tests;
