//! Rules a listing and its photos must satisfy before they are sent.

use super::Property;

/// Largest accepted photo, in bytes
pub const MAX_IMAGE_BYTES: usize = 1_048_576;
/// Most photos a single listing may carry
pub const MAX_IMAGES: usize = 10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListingError {
    #[error("A listing needs at least one image")]
    NoImages,
    #[error("A listing may have at most {max} images, got {count}")]
    TooManyImages { count: usize, max: usize },
    #[error("{name} is {size} bytes; images may be at most {max} bytes")]
    ImageTooLarge { name: String, size: usize, max: usize },
    #[error("{0} is not a JPEG, PNG or WebP image")]
    UnsupportedImage(String),
}

impl Property {
    pub fn validate(&self) -> Result<(), ListingError> {
        match self.media.len() {
            0 => Err(ListingError::NoImages),
            count if count > MAX_IMAGES => Err(ListingError::TooManyImages {
                count,
                max: MAX_IMAGES,
            }),
            _ => Ok(()),
        }
    }
}

/// Content type for an uploadable photo, judged by its extension
pub fn image_mime(file_name: &str) -> Result<&'static str, ListingError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "webp" => Ok("image/webp"),
        _ => Err(ListingError::UnsupportedImage(file_name.to_string())),
    }
}

/// Check type and size of a photo before uploading it
pub fn validate_image(file_name: &str, size: usize) -> Result<&'static str, ListingError> {
    let mime = image_mime(file_name)?;
    if size > MAX_IMAGE_BYTES {
        return Err(ListingError::ImageTooLarge {
            name: file_name.to_string(),
            size,
            max: MAX_IMAGE_BYTES,
        });
    }
    Ok(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("https://cdn.example/{}.jpg", i)).collect()
    }

    #[test]
    fn test_listing_needs_an_image() {
        let property = Property::default().with_media_urls(Vec::<String>::new());
        assert_eq!(property.validate(), Err(ListingError::NoImages));

        let property = Property::default().with_media_urls(urls(1));
        assert_eq!(property.validate(), Ok(()));
    }

    #[test]
    fn test_image_count_limit() {
        let property = Property::default().with_media_urls(urls(10));
        assert_eq!(property.validate(), Ok(()));

        let property = Property::default().with_media_urls(urls(11));
        assert_eq!(
            property.validate(),
            Err(ListingError::TooManyImages { count: 11, max: 10 })
        );
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("fachada.JPG"), Ok("image/jpeg"));
        assert_eq!(image_mime("sala.jpeg"), Ok("image/jpeg"));
        assert_eq!(image_mime("planta.png"), Ok("image/png"));
        assert_eq!(image_mime("quarto.webp"), Ok("image/webp"));
        assert!(image_mime("animacao.gif").is_err());
        assert!(image_mime("contrato.pdf").is_err());
        assert!(image_mime("sem-extensao").is_err());
    }

    #[test]
    fn test_image_size_limit() {
        assert_eq!(validate_image("a.png", MAX_IMAGE_BYTES), Ok("image/png"));
        assert_eq!(
            validate_image("a.png", MAX_IMAGE_BYTES + 1),
            Err(ListingError::ImageTooLarge {
                name: "a.png".to_string(),
                size: MAX_IMAGE_BYTES + 1,
                max: MAX_IMAGE_BYTES,
            })
        );
        assert_eq!(
            validate_image("a.gif", 10),
            Err(ListingError::UnsupportedImage("a.gif".to_string()))
        );
    }
}
