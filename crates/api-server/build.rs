fn main() {
    // Re-embed dashboard files when they change
    println!("cargo:rerun-if-changed=dashboard/");
}
