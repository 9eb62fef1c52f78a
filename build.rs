use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn exe_cmd(cmd: &mut Command) -> anyhow::Result<String> {
    let output = cmd.output()?;

    anyhow::ensure!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?)
}

fn main() {
    // 不在git仓库中构建时只输出版本号和构建时间
    let git_commit_hash = match exe_cmd(Command::new("git").args([
        "log",
        "-n",
        "1",
        "--pretty=format:%H",
    ])) {
        Ok(s) => s[..8.min(s.len())].trim().to_string(),
        Err(e) => {
            println!("cargo:warning=git log run failed: {}", e.to_string().trim());
            String::default()
        }
    };

    let build_time = DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S:%Z");
    if git_commit_hash.is_empty() {
        println!(
            "cargo:rustc-env=GBMAC_VERSION_INFO={}-{}",
            env!("CARGO_PKG_VERSION"),
            build_time
        );
    } else {
        println!(
            "cargo:rustc-env=GBMAC_VERSION_INFO={}-{}-{}",
            env!("CARGO_PKG_VERSION"),
            git_commit_hash,
            build_time
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}
