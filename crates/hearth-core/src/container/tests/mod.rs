mod alias_tests;
mod deferred_tests;
