//! Plain-text summary export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::pipeline::Generation;

/// Prompt, a blank line, then the syntax block.
pub fn summary_text(prompt: &str, syntax: &str) -> String {
    format!("{prompt}\n\n{syntax}")
}

/// Write the plain-text summary for a generation.
pub fn export_summary_txt(generation: &Generation, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(summary_text(&generation.prompt, &generation.syntax).as_bytes())?;
    writer.flush()?;

    info!(path = %path.display(), "summary exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::ClimateInputs;
    use crate::pipeline::derive;
    use tempfile::tempdir;

    #[test]
    fn summary_layout() {
        assert_eq!(summary_text("P", "S"), "P\n\nS");
    }

    #[test]
    fn export_summary_smoke() {
        let g = derive(&ClimateInputs::default()).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("climate_profile.txt");
        export_summary_txt(&g, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let (prompt, syntax) = text.split_once("\n\n").unwrap();
        assert_eq!(prompt, g.prompt);
        assert_eq!(syntax, g.syntax);
    }
}
