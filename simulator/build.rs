//! Build script for noise-monitor-simulator
//!
//! On Windows, links against a vendored SDL2 and places SDL2.dll next to the
//! simulator binary. Other platforms use the system SDL2.

use std::path::{Path, PathBuf};
use std::{env, fs};

/// `target/<profile>` for this build, found by walking up from OUT_DIR.
fn profile_dir(out_dir: &Path) -> Option<&Path> {
    out_dir
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
}

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let sdl2_dir = PathBuf::from(manifest_dir).join("vendor").join("sdl2");
    println!("cargo:rerun-if-changed={}", sdl2_dir.display());

    if !sdl2_dir.exists() {
        println!("cargo:warning=SDL2 not found at {}", sdl2_dir.display());
        println!("cargo:warning=Place SDL2.lib and SDL2.dll in simulator/vendor/sdl2/");
        return;
    }
    println!("cargo:rustc-link-search=native={}", sdl2_dir.display());

    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };
    let out_dir = PathBuf::from(out_dir);
    let Some(target_dir) = profile_dir(&out_dir) else {
        return;
    };

    let dll_src = sdl2_dir.join("SDL2.dll");
    let dll_dst = target_dir.join("SDL2.dll");
    if dll_src.exists() && !dll_dst.exists() {
        if let Err(e) = fs::copy(&dll_src, &dll_dst) {
            println!("cargo:warning=Failed to copy SDL2.dll: {e}");
        }
    }
}
