use modfeed::core::ModfeedResult;
use modfeed::package::repack_file;
use std::path::Path;

pub fn run(input: &Path, output: &Path, required_entry: &str) -> ModfeedResult<()> {
    let report = repack_file(input, output, required_entry)?;

    println!("✓ Repacked {} -> {}", input.display(), output.display());
    println!("  {} entries stored", report.entries.len());
    for skipped in &report.skipped {
        println!("  ⚠️  skipped {}: {}", skipped.name, skipped.reason);
    }

    match report.required_entry_content {
        Some(content) => {
            println!("  {}:", required_entry);
            for line in content.lines() {
                println!("    {}", line);
            }
        }
        None if report.required_entry_found => {
            println!("  ⚠️  {} is present but not readable as text", required_entry)
        }
        None => println!("  ⚠️  {} not found in archive", required_entry),
    }

    Ok(())
}
