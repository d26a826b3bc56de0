//! Build script for watchsync.
//!
//! Copies the settings and environment templates into the user's local data
//! directory so a fresh install has ready-to-edit examples next to where the
//! binary looks for its real settings:
//!
//! - Linux: `~/.local/share/watchsync/`
//! - macOS: `~/Library/Application Support/watchsync/`
//! - Windows: `%LOCALAPPDATA%/watchsync/`
//!
//! Missing templates or an unwritable data directory produce a cargo warning
//! instead of failing the build.
//! Existing real settings are never touched; only the `*.example` files are
//! written.

use std::{env, fs, path::PathBuf};

const TEMPLATES: [&str; 2] = ["sync_settings.example.ini", ".env.example"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for template in TEMPLATES {
        println!("cargo:rerun-if-changed={template}");
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("watchsync");
    if let Err(e) = fs::create_dir_all(&out_dir) {
        println!("cargo:warning=cannot create {}: {e}", out_dir.display());
        return Ok(());
    }

    for template in TEMPLATES {
        let source = manifest_dir.join(template);
        if source.is_file() {
            if let Err(e) = fs::copy(&source, out_dir.join(template)) {
                println!("cargo:warning=cannot copy {template}: {e}");
            }
        } else {
            println!("cargo:warning={template} not found at {}", source.display());
        }
    }

    Ok(())
}
