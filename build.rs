// build.rs

use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Cargo always sets OUT_DIR for build scripts
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set by cargo");
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    // Stamp shown in the startup banner
    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    fs::write(
        &dest_path,
        format!("pub const BUILD_DATE: &str = \"{}\";", build_date),
    )
    .expect("failed to write build_info.rs");

    println!("cargo:rerun-if-changed=build.rs");
}
