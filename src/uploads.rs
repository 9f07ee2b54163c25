// Validation and on-disk placement for uploaded images.
//
// Files land under `<static root>/uploads/` with a timestamped name so
// repeat uploads of the same filename never collide. Nothing here removes
// files: deleting a post leaves its image behind.

use std::{fs, io, path::Path};

use crate::errors::ApiError;
use crate::models::now_fixed_offset;

pub const UPLOAD_SUBDIR: &str = "uploads";
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Whether the filename carries an extension from the image allow-list.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}

/// Strip directory components and anything outside [A-Za-z0-9._-].
/// Prevents traversal via crafted filenames like "../../etc/passwd".
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Validate an uploaded file and write it into the uploads directory.
///
/// Returns the path relative to the static root (what gets stored in a
/// Post's image field). `prefix` distinguishes header images from post
/// images in the generated name.
pub fn store_upload(
    static_dir: &Path,
    prefix: Option<&str>,
    filename: &str,
    bytes: &[u8],
) -> Result<String, ApiError> {
    if !allowed_file(filename) {
        return Err(ApiError::Validation(format!(
            "file type not allowed: {filename}"
        )));
    }
    if bytes.is_empty() {
        return Err(ApiError::Validation("empty file".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::Validation("file too large".to_string()));
    }

    let safe = sanitize_filename(filename);
    if !allowed_file(&safe) {
        return Err(ApiError::Validation(format!(
            "file type not allowed: {filename}"
        )));
    }

    let timestamp = now_fixed_offset().format("%Y%m%d-%H%M%S");
    let stored_name = match prefix {
        Some(p) => format!("{p}-{timestamp}-{safe}"),
        None => format!("{timestamp}-{safe}"),
    };

    let upload_dir = static_dir.join(UPLOAD_SUBDIR);
    fs::create_dir_all(&upload_dir).map_err(ApiError::Storage)?;
    fs::write(upload_dir.join(&stored_name), bytes).map_err(ApiError::Storage)?;

    Ok(format!("{UPLOAD_SUBDIR}/{stored_name}"))
}

/// Best-effort removal of a previously stored file (old header images).
pub fn remove_stored(static_dir: &Path, relative: &str) {
    // Refuse anything that could escape the static root.
    if relative.contains("..") {
        return;
    }
    let path = static_dir.join(relative);
    if let Err(e) = fs::remove_file(&path) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove old file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_images() {
        assert!(allowed_file("photo.png"));
        assert!(allowed_file("photo.JPG"));
        assert!(allowed_file("a.b.jpeg"));
        assert!(allowed_file("anim.gif"));
    }

    #[test]
    fn allow_list_rejects_everything_else() {
        assert!(!allowed_file("script.sh"));
        assert!(!allowed_file("page.html"));
        assert!(!allowed_file("noextension"));
        assert!(!allowed_file(".png"));
        assert!(!allowed_file(""));
    }

    #[test]
    fn sanitize_strips_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("my photo (1).png"), "myphoto1.png");
        assert_eq!(sanitize_filename("ok-name_1.jpg"), "ok-name_1.jpg");
    }

    #[test]
    fn store_upload_writes_under_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let rel = store_upload(dir.path(), None, "pic.png", b"bytes").unwrap();
        assert!(rel.starts_with("uploads/"));
        assert!(rel.ends_with("-pic.png"));
        assert_eq!(std::fs::read(dir.path().join(&rel)).unwrap(), b"bytes");
    }

    #[test]
    fn store_upload_rejects_disallowed_type() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_upload(dir.path(), None, "evil.exe", b"bytes").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn store_upload_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_upload(dir.path(), None, "pic.png", b"").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn header_prefix_lands_in_name() {
        let dir = tempfile::tempdir().unwrap();
        let rel = store_upload(dir.path(), Some("header"), "bg.jpg", b"x").unwrap();
        assert!(rel.starts_with("uploads/header-"));
    }

    #[test]
    fn remove_stored_ignores_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let outside = dir.path().join("outside.txt");
        std::fs::write(&outside, "keep").unwrap();
        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(&static_dir).unwrap();
        remove_stored(&static_dir, "../outside.txt");
        assert!(outside.exists());
    }
}
