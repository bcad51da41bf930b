use std::process::Command;

fn main() {
    // Release tarballs have no .git, so TRELLIS_GIT_SHA can be passed in instead
    let git_sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|sha| !sha.is_empty())
        .or_else(|| std::env::var("TRELLIS_GIT_SHA").ok())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_SHA={git_sha}");
    println!("cargo:rerun-if-env-changed=TRELLIS_GIT_SHA");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
