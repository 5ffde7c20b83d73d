use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let n = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    println!("cargo:rustc-env=DISCRETE_BUILD_N={n}");
    println!(
        "cargo:rustc-env=DISCRETE_DISPLAY_VERSION={}",
        env!("CARGO_PKG_VERSION")
    );
}
