use anyhow::{Context, Result};
use page_data_architecture::logic::integrity_violations;
use page_data_architecture::model::PageDataArchitectureDocument;

/// Replays the operation log of a `.pharch` file and checks the result
/// against the stored state.
///
/// Usage: replay-document <file.pharch> [--write-fixed]
///
/// With `--write-fixed` a document whose stored state drifted from its log is
/// rewritten with the replayed state.
fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: replay-document <file.pharch> [--write-fixed]")?;
    let write_fixed = args.any(|arg| arg == "--write-fixed");

    let bytes = std::fs::read(&path).with_context(|| format!("failed to read {}", path))?;
    let mut document = PageDataArchitectureDocument::from_bytes(&bytes)
        .with_context(|| format!("failed to decode {}", path))?;

    println!(
        "Document {} '{}' at revision {} ({} operations)",
        document.header.id,
        document.header.name,
        document.header.revision,
        document.operations.len()
    );

    let replayed = document
        .replay()
        .with_context(|| format!("operation log of {} does not replay", path))?;
    println!("Operation log replays cleanly; all hashes match");

    let violations = integrity_violations(&replayed);
    for violation in &violations {
        println!("  integrity: [{}] {}", violation.error_code(), violation);
    }

    if replayed == document.state {
        println!("Stored state matches the operation log");
        return Ok(());
    }

    println!("Stored state differs from the operation log");
    if !write_fixed {
        anyhow::bail!("state mismatch in {}", path);
    }
    if !violations.is_empty() {
        anyhow::bail!("refusing to write a state with {} integrity violation(s)", violations.len());
    }

    document.state = replayed;
    document.touch();
    std::fs::write(&path, document.to_bytes()?)
        .with_context(|| format!("failed to write {}", path))?;
    println!("Rewrote {} with the replayed state", path);

    Ok(())
}
