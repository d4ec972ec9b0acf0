//! Build script for the NB-IoT node firmware
//!
//! Handles:
//! - Memory layout configuration
//! - cortex-m-rt and defmt linker scripts for the firmware binary

fn main() {
    // Tell Cargo to re-run this if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Link memory.x from project directory
    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }

    // Only the bare-metal binary needs the runtime and defmt sections;
    // host test builds link against std.
    #[cfg(feature = "embedded")]
    {
        println!("cargo:rustc-link-arg-bins=--nmagic");
        println!("cargo:rustc-link-arg-bins=-Tlink.x");
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }
}
