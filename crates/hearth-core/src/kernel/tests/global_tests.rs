use std::sync::Arc;

use tempfile::tempdir;

use crate::env::Env;
use crate::kernel::application::Application;
use crate::kernel::global;

// The slot is process-wide; this is the only test in the crate that fills it.
#[test]
fn test_first_install_wins() {
    let dir = tempdir().unwrap();
    let env = Arc::new(Env::from_pairs(Vec::<(String, String)>::new()));
    let first = Arc::new(Application::new(dir.path(), env.clone()));
    let second = Arc::new(Application::new(dir.path(), env));

    assert!(global::install(first.clone()));
    assert!(global::is_installed());
    assert!(!global::install(second));

    let installed = global::app().unwrap();
    assert!(Arc::ptr_eq(&installed, &first));
}
