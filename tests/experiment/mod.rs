//! Integration tests for experiments and case assembly

mod case_assembly_tests;
