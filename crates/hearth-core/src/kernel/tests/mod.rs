mod application_tests;
mod global_tests;
