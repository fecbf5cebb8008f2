use std::path::Path;

use anyhow::{Context, Result};

/// Written byte-for-byte. The icon list is hand-authored and only carries
/// the two android-chrome sizes, not the full favicon table.
pub const MANIFEST: &str = r##"{
  "name": "Zendesk App Icon Generator",
  "short_name": "ZDK Icon Gen",
  "description": "Generate compliant Zendesk app icon bundles",
  "icons": [
    {"src": "/android-chrome-192x192.png", "sizes": "192x192", "type": "image/png"},
    {"src": "/android-chrome-512x512.png", "sizes": "512x512", "type": "image/png"}
  ],
  "theme_color": "#063940",
  "background_color": "#063940",
  "display": "standalone",
  "start_url": "/"
}
"##;

pub fn write(path: &Path) -> Result<()> {
    tracing::info!("generating site.webmanifest");
    std::fs::write(path, MANIFEST)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("created {}", path.display());
    Ok(())
}
