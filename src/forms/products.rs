use std::path::Path;

use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::product::ProductStatus;
use crate::domain::tag::TagSelection;
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};
use crate::services::images::ImageUpload;

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 100;

/// Maximum accepted size for an uploaded product image.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// MIME types accepted for product images.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Extensions used as the fallback check when the client sent no MIME type.
const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("product name is longer than {max} characters", max = NAME_MAX_LEN)]
    NameTooLong,
    /// The price is missing, malformed, zero or negative.
    #[error("product price must be a positive amount with at most two decimals")]
    InvalidPrice,
    #[error("product stock must be a non-negative integer")]
    InvalidStock,
    #[error("category id must be a positive integer")]
    InvalidCategory,
    #[error("unknown product status `{value}`")]
    InvalidStatus { value: String },
    /// The tags field did not parse into a list of `{tag_id, option_ids}`.
    #[error("tag payload is malformed")]
    InvalidTags,
    #[error("unsupported image type `{value}`")]
    UnsupportedImageType { value: String },
    #[error("image exceeds the {max} byte limit", max = MAX_IMAGE_SIZE)]
    ImageTooLarge,
    #[error("uploaded image could not be read")]
    UnreadableImage,
}

/// One tag entry of the `tags` payload, accepting both snake_case and the
/// legacy camelCase field names.
#[derive(Debug, Deserialize)]
pub struct TagSelectionForm {
    #[serde(alias = "tagId")]
    pub tag_id: i32,
    #[serde(alias = "optionIds")]
    pub option_ids: Vec<i32>,
}

impl From<TagSelectionForm> for TagSelection {
    fn from(value: TagSelectionForm) -> Self {
        TagSelection::new(value.tag_id, value.option_ids)
    }
}

/// Multipart payload submitted when creating a product.
#[derive(Debug, MultipartForm)]
pub struct CreateProductForm {
    pub name: Text<String>,
    pub description: Option<Text<String>>,
    /// Decimal amount, e.g. `68.00`.
    pub price: Text<String>,
    pub stock: Option<Text<String>>,
    pub category_id: Text<String>,
    pub status: Option<Text<String>>,
    /// JSON array of `{tag_id, option_ids}` objects.
    pub tags: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub image: Option<TempFile>,
}

/// Validated product creation payload handed to the service layer.
#[derive(Debug)]
pub struct CreateProductData {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
    pub category_id: i32,
    pub status: ProductStatus,
    pub tags: Vec<TagSelection>,
    pub image: Option<ImageUpload>,
}

impl CreateProductForm {
    /// Validates and sanitizes the payload; no side effects happen here, so a
    /// rejected form leaves neither rows nor files behind.
    pub fn into_create_data(self) -> ProductFormResult<CreateProductData> {
        let name = sanitize_inline_text(&self.name.into_inner());
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }
        if name.chars().count() > NAME_MAX_LEN {
            return Err(ProductFormError::NameTooLong);
        }

        let description = self
            .description
            .map(|value| sanitize_multiline_text(&value.into_inner()))
            .filter(|value| !value.is_empty());

        let price_cents = parse_price_cents(&self.price.into_inner())?;
        let stock = parse_stock(self.stock)?;
        let category_id = parse_category_id(&self.category_id.into_inner())?;
        let status = parse_status(self.status)?;

        let tags = match self.tags {
            Some(raw) => parse_tag_selections(&raw.into_inner())?,
            None => Vec::new(),
        };

        let image = self.image.map(read_image_upload).transpose()?;

        Ok(CreateProductData {
            name,
            description,
            price_cents,
            stock,
            category_id,
            status,
            tags,
            image,
        })
    }
}

/// Multipart payload submitted when updating a product. Absent fields leave
/// the stored value untouched.
#[derive(Debug, MultipartForm)]
pub struct UpdateProductForm {
    pub name: Option<Text<String>>,
    /// An empty string clears the stored description.
    pub description: Option<Text<String>>,
    pub price: Option<Text<String>>,
    pub stock: Option<Text<String>>,
    pub category_id: Option<Text<String>>,
    pub status: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub image: Option<TempFile>,
}

/// Validated partial-update payload handed to the service layer.
#[derive(Debug)]
pub struct UpdateProductData {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
    pub status: Option<ProductStatus>,
    pub image: Option<ImageUpload>,
}

impl UpdateProductForm {
    /// Validates and sanitizes the payload into partial-update data.
    pub fn into_update_data(self) -> ProductFormResult<UpdateProductData> {
        let name = match self.name {
            Some(value) => {
                let sanitized = sanitize_inline_text(&value.into_inner());
                if sanitized.is_empty() {
                    return Err(ProductFormError::EmptyName);
                }
                if sanitized.chars().count() > NAME_MAX_LEN {
                    return Err(ProductFormError::NameTooLong);
                }
                Some(sanitized)
            }
            None => None,
        };

        let description = self.description.map(|value| {
            let sanitized = sanitize_multiline_text(&value.into_inner());
            if sanitized.is_empty() {
                None
            } else {
                Some(sanitized)
            }
        });

        let price_cents = match self.price {
            Some(value) => Some(parse_price_cents(&value.into_inner())?),
            None => None,
        };

        let stock = match self.stock {
            Some(value) => {
                let raw = value.into_inner();
                let trimmed = raw.trim();
                let parsed = trimmed
                    .parse::<i32>()
                    .map_err(|_| ProductFormError::InvalidStock)?;
                if parsed < 0 {
                    return Err(ProductFormError::InvalidStock);
                }
                Some(parsed)
            }
            None => None,
        };

        let category_id = match self.category_id {
            Some(value) => Some(parse_category_id(&value.into_inner())?),
            None => None,
        };

        let status = match self.status {
            Some(value) => {
                let raw = value.into_inner();
                let trimmed = raw.trim();
                Some(
                    ProductStatus::parse(trimmed).ok_or_else(|| {
                        ProductFormError::InvalidStatus {
                            value: trimmed.to_string(),
                        }
                    })?,
                )
            }
            None => None,
        };

        let image = self.image.map(read_image_upload).transpose()?;

        Ok(UpdateProductData {
            name,
            description,
            price_cents,
            stock,
            category_id,
            status,
            image,
        })
    }
}

/// JSON body of the batch tag-attach endpoint.
#[derive(Debug, Deserialize)]
pub struct AddProductTagsForm {
    pub tags: Vec<TagSelectionForm>,
}

impl AddProductTagsForm {
    pub fn into_selections(self) -> ProductFormResult<Vec<TagSelection>> {
        if self.tags.is_empty() {
            return Err(ProductFormError::InvalidTags);
        }
        Ok(self.tags.into_iter().map(TagSelection::from).collect())
    }
}

/// JSON body of the batch tag-detach endpoint.
#[derive(Debug, Deserialize)]
pub struct RemoveProductTagsForm {
    pub tag_ids: Vec<i32>,
}

fn parse_price_cents(raw: &str) -> ProductFormResult<i64> {
    let trimmed = raw.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };

    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(ProductFormError::InvalidPrice);
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(ProductFormError::InvalidPrice);
    }

    let whole: i64 = whole.parse().map_err(|_| ProductFormError::InvalidPrice)?;
    let frac_cents = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| ProductFormError::InvalidPrice)? * 10,
        _ => frac.parse::<i64>().map_err(|_| ProductFormError::InvalidPrice)?,
    };

    let cents = whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac_cents))
        .ok_or(ProductFormError::InvalidPrice)?;
    if cents == 0 {
        return Err(ProductFormError::InvalidPrice);
    }

    Ok(cents)
}

fn parse_stock(raw: Option<Text<String>>) -> ProductFormResult<i32> {
    let Some(raw) = raw else {
        return Ok(0);
    };

    let raw = raw.into_inner();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let parsed = trimmed
        .parse::<i32>()
        .map_err(|_| ProductFormError::InvalidStock)?;
    if parsed < 0 {
        return Err(ProductFormError::InvalidStock);
    }

    Ok(parsed)
}

fn parse_category_id(raw: &str) -> ProductFormResult<i32> {
    let parsed = raw
        .trim()
        .parse::<i32>()
        .map_err(|_| ProductFormError::InvalidCategory)?;
    if parsed <= 0 {
        return Err(ProductFormError::InvalidCategory);
    }
    Ok(parsed)
}

fn parse_status(raw: Option<Text<String>>) -> ProductFormResult<ProductStatus> {
    let Some(raw) = raw else {
        return Ok(ProductStatus::Active);
    };

    let raw = raw.into_inner();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(ProductStatus::Active);
    }

    ProductStatus::parse(trimmed).ok_or_else(|| ProductFormError::InvalidStatus {
        value: trimmed.to_string(),
    })
}

fn parse_tag_selections(raw: &str) -> ProductFormResult<Vec<TagSelection>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let inputs: Vec<TagSelectionForm> =
        serde_json::from_str(trimmed).map_err(|_| ProductFormError::InvalidTags)?;

    Ok(inputs.into_iter().map(TagSelection::from).collect())
}

/// Check and read an uploaded image into memory. The temporary upload file is
/// removed when the `TempFile` handle drops at the end of this call.
fn read_image_upload(file: TempFile) -> ProductFormResult<ImageUpload> {
    if file.size > MAX_IMAGE_SIZE {
        return Err(ProductFormError::ImageTooLarge);
    }

    let original_name = file
        .file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());

    match file.content_type.as_ref() {
        Some(mime) => {
            let essence = mime.essence_str();
            if !ALLOWED_IMAGE_TYPES.contains(&essence) {
                return Err(ProductFormError::UnsupportedImageType {
                    value: essence.to_string(),
                });
            }
        }
        None => {
            let extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase())
                .unwrap_or_default();
            if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
                return Err(ProductFormError::UnsupportedImageType { value: extension });
            }
        }
    }

    let bytes =
        std::fs::read(file.file.path()).map_err(|_| ProductFormError::UnreadableImage)?;

    Ok(ImageUpload::new(bytes, original_name))
}
