use std::env;
use std::path::PathBuf;

/// Width uploads are resized down to when wider.
pub const DEFAULT_MAX_IMAGE_WIDTH: u32 = 800;
/// Quality used when re-encoding uploads as JPEG.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Server-wide settings built once in `main` and shared through `web::Data`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub jwt_secret: String,
}

/// Settings for the image transform and upload storage.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Root directory uploads are stored under.
    pub storage_root: PathBuf,
    /// Public base URL the stored files are served from.
    pub public_base_url: String,
    /// Images wider than this are resized down, preserving aspect ratio.
    pub max_width: u32,
    /// JPEG re-encode quality.
    pub jpeg_quality: u8,
}

impl ImageConfig {
    /// Read the image settings from the environment, falling back to the
    /// development defaults.
    pub fn from_env() -> Self {
        let storage_root = env::var("UPLOAD_ROOT").unwrap_or("./uploads".to_string());
        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or("http://localhost:8080/uploads".to_string());

        Self {
            storage_root: PathBuf::from(storage_root),
            public_base_url,
            max_width: DEFAULT_MAX_IMAGE_WIDTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}
