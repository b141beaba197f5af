#[cfg(test)]
mod fs_tests;
