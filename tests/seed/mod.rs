//! Integration tests for seed tables

mod seed_table_tests;
