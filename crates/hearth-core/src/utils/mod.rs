pub mod fs;

pub use fs::{find_config_files, find_files, normalize_path};

#[cfg(test)]
mod tests;
