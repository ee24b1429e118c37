//! Compile statistics from the `meta.json` sidecar.

use crate::config::META_FILE;
use crate::error::{CompileError, Result};
use crate::format::meta::CompileMeta;
use std::path::Path;

/// Print a summary of the last compile under `dir`.
pub fn show_stats(dir: &Path) -> Result<()> {
    let path = dir.join(META_FILE);
    if !path.exists() {
        return Err(CompileError::format(
            &path,
            "no compile metadata found. Run `kidx charmap` first.",
        ));
    }
    let meta = CompileMeta::load(dir)?;

    println!("Compile Statistics");
    println!("==================");
    println!();
    println!("Directory:        {}", dir.display());
    println!("Meta version:     {}", meta.version);

    if let Some(charmap) = &meta.charmap {
        println!();
        println!("charmap ({:?}):", charmap.format);
        println!("  Chardef entries:     {}", charmap.entries);
        println!("  Distinct characters: {}", charmap.distinct_words);
        println!("  Not in dictionary:   {}", charmap.skipped_words);
    }
    if let Some(phrases) = &meta.phrases {
        println!();
        println!("phrases ({:?}):", phrases.format);
        println!("  Dictionary records:  {}", phrases.records);
        println!("  Distinct phrases:    {}", phrases.merged);
        println!("  Unsupported:         {}", phrases.unsupported);
        println!("  Keyin variants:      {}", phrases.variants);
        println!("  Distinct sequences:  {}", phrases.distinct_sequences);
    }
    if let Some(tree) = &meta.tree {
        println!();
        println!("tree ({:?}):", tree.format);
        println!("  Sequences:           {}", tree.sequences);
        println!("  Nodes:               {}", tree.nodes);
    }
    Ok(())
}
