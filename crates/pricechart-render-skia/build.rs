// File: crates/pricechart-render-skia/build.rs
// Summary: Links the Windows system libraries Skia/ICU need.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW, RegQueryInfoKeyW (font manager).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
