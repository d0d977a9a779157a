use axum::body::Bytes;
use axum_typed_multipart::FieldData;
use uuid::Uuid;

use super::error::ApiError;

/// asserts a multipart/form-data field is a image with a valid extension, returning the extension
pub fn image_extension_from_field(field: &FieldData<Bytes>) -> Result<String, ApiError> {
    let file_name = field
        .metadata
        .file_name
        .clone()
        .ok_or(ApiError::Validation(String::from("empty filename")))?;

    let allowed_file_types = vec!["jpe", "jpg", "jpeg", "png", "webp"];

    let (_, file_extension) = file_name
        .rsplit_once('.')
        .ok_or(ApiError::Validation(String::from("empty file extension")))?;

    if allowed_file_types.contains(&file_extension) {
        Ok(String::from(file_extension))
    } else {
        Err(ApiError::Validation(String::from("invalid file extension")))
    }
}

/// validates the field is a image and derives a collision free filename for it:
///
/// `<uuid-v4>.<uploaded_file_extension>`
///
/// the filename informed by the caller is never used for storage.
pub fn unique_image_filename(img: &FieldData<Bytes>) -> Result<String, ApiError> {
    let file_extension = image_extension_from_field(img)?;

    Ok(format!("{}.{}", Uuid::new_v4(), file_extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_typed_multipart::FieldMetadata;

    fn image_field(file_name: Option<&str>) -> FieldData<Bytes> {
        let mut metadata = FieldMetadata::default();
        metadata.file_name = file_name.map(String::from);

        FieldData {
            metadata,
            contents: Bytes::from_static(b"fake image bytes"),
        }
    }

    #[test]
    fn accepts_known_image_extensions() {
        let field = image_field(Some("avatar.png"));
        assert_eq!(image_extension_from_field(&field).unwrap(), "png");
    }

    #[test]
    fn rejects_missing_filename() {
        let field = image_field(None);
        assert!(image_extension_from_field(&field).is_err());
    }

    #[test]
    fn rejects_non_image_extensions() {
        let field = image_field(Some("notes.txt"));
        assert!(image_extension_from_field(&field).is_err());
    }

    #[test]
    fn derived_filenames_keep_the_extension_and_never_collide() {
        let field = image_field(Some("photo.jpeg"));

        let first = unique_image_filename(&field).unwrap();
        let second = unique_image_filename(&field).unwrap();

        assert!(first.ends_with(".jpeg"));
        assert_ne!(first, second);
    }
}
