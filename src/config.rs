use std::path::PathBuf;

/// Theme color #063940, used as the matte for the opaque PNG variants.
pub const BACKGROUND_RGB: [u8; 3] = [6, 57, 64];

/// PNG favicons to generate, in emission order.
pub const FAVICON_SIZES: [(&str, u32); 5] = [
    ("favicon-16x16.png", 16),
    ("favicon-32x32.png", 32),
    ("apple-touch-icon.png", 180),
    ("android-chrome-192x192.png", 192),
    ("android-chrome-512x512.png", 512),
];

/// Single-size ICO; multi-size bundles trip up some asset pipelines.
pub const ICO_SIZE: u32 = 32;

pub const LOGO_FILENAME: &str = "logo.png";
pub const ICO_FILENAME: &str = "favicon.ico";
pub const MANIFEST_FILENAME: &str = "site.webmanifest";

#[derive(Debug, Clone)]
pub struct Config {
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    pub fn logo_path(&self) -> PathBuf {
        self.public_dir.join(LOGO_FILENAME)
    }

    pub fn ico_path(&self) -> PathBuf {
        self.public_dir.join(ICO_FILENAME)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.public_dir.join(MANIFEST_FILENAME)
    }

    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.public_dir.join(filename)
    }
}
