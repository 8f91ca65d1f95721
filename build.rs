// Regenerate the C header for the FFI functions with `--features headers`
#[cfg(feature = "headers")]
fn main() {
    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("JENKS_H")
        .generate()
        .expect("Unable to generate bindings")
        .write_to_file("include/jenks.h");
}

#[cfg(not(feature = "headers"))]
fn main() {}
