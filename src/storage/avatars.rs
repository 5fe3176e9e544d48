use rand::Rng;
use std::path::Path;

/// Display bound for profile images, applied where avatars are rendered.
pub const THUMBNAIL_SIZE: (u32, u32) = (125, 125);

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    #[error("Unsupported image type")]
    UnsupportedType,

    #[error("Image is too large")]
    TooLarge,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Store uploaded avatar bytes under a random filename that keeps the
/// original extension. Returns the generated filename; only that reference
/// string is persisted on the user record.
pub fn save_avatar(
    uploads_dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, AvatarError> {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or(AvatarError::UnsupportedType)?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AvatarError::UnsupportedType);
    }
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge);
    }

    let filename = format!("{}.{}", random_hex(), ext);

    std::fs::create_dir_all(uploads_dir)?;
    std::fs::write(uploads_dir.join(&filename), bytes)?;

    Ok(filename)
}

/// Random 16-char hex filename stem.
fn random_hex() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 8] = rng.gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
