//! Path utilities for uploaded image files.
//!
//! Uploaded files are accepted by extension and stored under generated names.
//! Stored names are always a single plain path component, never a path.

use std::path::{Component, Path};

/// List of accepted image file extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

/// Return the lowercase extension of `path` if it is an image extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use angle_catalog_common::paths::image_extension;
///
/// assert_eq!(image_extension(Path::new("Corner.JPEG")).as_deref(), Some("jpeg"));
/// assert_eq!(image_extension(Path::new("corner")), None);
/// ```
pub fn image_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .filter(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Check that `name` is a single normal path component.
///
/// Rejects empty names, `.`/`..`, absolute paths and anything containing a
/// separator, so the name can be joined onto a directory safely.
pub fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(first)), None) => first == name,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_image_file(path: &Path) -> bool {
        image_extension(path).is_some()
    }

    #[test]
    fn test_image_extension_accepts_image_types() {
        assert!(is_image_file(Path::new("corner.jpg")));
        assert!(is_image_file(Path::new("corner.jpeg")));
        assert!(is_image_file(Path::new("corner.png")));
        assert!(is_image_file(Path::new("corner.gif")));
        assert!(is_image_file(Path::new("corner.webp")));
        assert!(is_image_file(Path::new("corner.bmp")));
        assert!(is_image_file(Path::new("corner.svg")));

        // Case insensitive
        assert!(is_image_file(Path::new("corner.JPG")));
        assert!(is_image_file(Path::new("corner.Png")));

        assert!(!is_image_file(Path::new("corner.exe")));
        assert!(!is_image_file(Path::new("corner.jpg.sh")));
        assert!(!is_image_file(Path::new("no_extension")));
    }

    #[test]
    fn test_image_extension_is_lowercased() {
        assert_eq!(image_extension(Path::new("a.WebP")).as_deref(), Some("webp"));
        assert_eq!(image_extension(Path::new(".png")), None);
    }

    #[test]
    fn test_is_plain_file_name() {
        assert!(is_plain_file_name("3f2c.png"));
        assert!(is_plain_file_name("name with spaces.jpg"));

        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name("."));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("../secret.png"));
        assert!(!is_plain_file_name("nested/file.png"));
        assert!(!is_plain_file_name("/etc/passwd"));
        assert!(!is_plain_file_name("trailing/"));
    }
}
