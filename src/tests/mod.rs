
use log::LevelFilter;
use std::{
    path::{Path, PathBuf},
    sync::Once,
};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// Path to a test resource
pub fn data_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(relative)
}

/// Returns a clean temporary directory, dedicated to one test
pub fn temporary_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("brdc2agnss-{}", std::process::id()))
        .join(name);

    let _ = std::fs::remove_dir_all(&dir);

    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("failed to create {}: {}", dir.display(), e));

    dir
}
