//! Engine-level tests that drive update and synthesis together.

mod property_tests;
