use std::{env, path::PathBuf};

fn main() {
    println!("cargo::rustc-check-cfg=cfg(rubikdetector_native)");
    println!("cargo:rerun-if-changed=native/rubikdetector.h");
    println!("cargo:rerun-if-env-changed=RUBIKDETECTOR_LIB_DIR");

    let Ok(lib_dir) = env::var("RUBIKDETECTOR_LIB_DIR") else {
        println!("cargo:warning=Building without the native vision engine (RUBIKDETECTOR_LIB_DIR not set)");
        return;
    };

    println!("cargo:rustc-cfg=rubikdetector_native");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    println!("cargo:rustc-link-search=native={lib_dir}");
    println!("cargo:rustc-link-lib=dylib=rubikdetector_native");

    //
    // ---- Generate vision engine bindings ----
    //
    let bindings = bindgen::Builder::default()
        .header("native/rubikdetector.h")
        .allowlist_function("rbdt_.*")
        .allowlist_type("rbdt_processor")
        .allowlist_var("RBDT_.*")
        .raw_line("// Mark extern blocks as unsafe for Rust 2024")
        .generate()
        .expect("Unable to generate vision engine bindings");

    let out_path = out_dir.join("rubikdetector_bindings.rs");
    bindings
        .write_to_file(&out_path)
        .expect("Couldn't write vision engine bindings!");

    // Read the generated file and add unsafe to extern blocks
    let contents = std::fs::read_to_string(&out_path).unwrap();
    let fixed = contents.replace("extern \"C\" {", "unsafe extern \"C\" {");
    std::fs::write(&out_path, fixed).unwrap();
}
