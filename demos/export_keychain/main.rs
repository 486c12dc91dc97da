//! Builds a keychain from a TrueType font and writes it as binary STL.
//!
//! Usage:
//! ```text
//! cargo run --example export_keychain -- <font.ttf> [text] [design] [out.stl]
//! ```
//!
//! `design` is one of `outline` (default), `initial`, `flower` or `tag`.
//! One extra STL per material is written next to `out.stl` for
//! multi-material printing.

use std::error::Error;
use std::path::{Path, PathBuf};

use keysmith::builder::{
    Design, FlowerKeychain, InitialKeychain, NameTag, OutlineKeychain, SolidBuilder,
};
use keysmith::export::{export_by_material, StlSummary};
use keysmith::outline::TtfOutliner;
use keysmith::workbench::{AllowAll, Workbench};

fn design(kind: &str, text: &str) -> Result<Design, String> {
    let text = text.to_owned();
    Ok(match kind {
        "outline" => OutlineKeychain {
            text,
            ..OutlineKeychain::default()
        }
        .into(),
        "initial" => InitialKeychain {
            initial: text.chars().next().map(String::from).unwrap_or_default(),
            text,
            ..InitialKeychain::default()
        }
        .into(),
        "flower" => FlowerKeychain {
            text: text.chars().next().map(String::from).unwrap_or_default(),
            ..FlowerKeychain::default()
        }
        .into(),
        "tag" => NameTag {
            text,
            ..NameTag::default()
        }
        .into(),
        other => return Err(format!("unknown design `{other}`")),
    })
}

fn sibling(out: &Path, suffix: &str) -> PathBuf {
    let stem = out.file_stem().and_then(|s| s.to_str()).unwrap_or("keychain");
    out.with_file_name(format!("{stem}-{suffix}.stl"))
}

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for keysmith.
    // Override with RUST_LOG env var (e.g. RUST_LOG=keysmith=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("keysmith=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let Some(font) = args.next() else {
        return Err("usage: export_keychain <font.ttf> [text] [design] [out.stl]".into());
    };
    let text = args.next().unwrap_or_else(|| "Name".to_owned());
    let kind = args.next().unwrap_or_else(|| "outline".to_owned());
    let out = PathBuf::from(args.next().unwrap_or_else(|| "keychain.stl".to_owned()));

    let outliner = TtfOutliner::new(std::fs::read(&font)?)?;
    let mut bench = Workbench::new(SolidBuilder::with_outliner(outliner));
    let design = design(&kind, &text)?;

    let bytes = bench.export(&mut AllowAll, || design.clone())?;
    std::fs::write(&out, &bytes)?;
    let summary = StlSummary::parse(&bytes)?;
    println!(
        "{}: {} triangles, {} bytes",
        out.display(),
        summary.triangles,
        bytes.len()
    );
    if let Some(bounds) = summary.bounds {
        let size = bounds.size();
        println!("  size {:.2} x {:.2} x {:.2} mm", size.x, size.y, size.z);
    }

    if let Some(composite) = bench.composite() {
        for (material, part) in export_by_material(composite)? {
            let path = sibling(&out, material.name());
            std::fs::write(&path, &part)?;
            println!("  {material}: {}", path.display());
        }
    }
    Ok(())
}
