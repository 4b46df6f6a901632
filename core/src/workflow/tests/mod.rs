//! Unit tests for the verification workflow.


mod code_entry_tests;
