use serde::Deserialize;

use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::tag::{Tag, TagOption};
use crate::forms::products::{
    AddProductTagsForm, CreateProductForm, RemoveProductTagsForm, UpdateProductForm,
};
use crate::idgen::{self, IdKind};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{CategoryReader, ProductReader, ProductWriter, TagReader};
use crate::services::images::{ImageStore, StoredImage};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the product listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional name or description search term.
    pub search: Option<String>,
    /// Optional category filter.
    pub category_id: Option<i32>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Fetches a page of products.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .clamp(1, 100);

    let mut list_query = ProductListQuery::new().paginate(page, per_page);
    if let Some(term) = query.search.as_ref() {
        list_query = list_query.search(term);
    }
    if let Some(category_id) = query.category_id {
        list_query = list_query.category_id(category_id);
    }

    let (total, items) = repo.list_products(list_query)?;

    Ok(Paginated::new(items, total, page, per_page))
}

/// Fetches a single product.
pub fn get_product<R>(repo: &R, product_id: &str) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product together with its tag associations.
///
/// The steps run cheapest-first: field validation, category and tag-policy
/// checks, then the image transform, then one database transaction inserting
/// the product row plus all association rows. The image file is durable
/// before the transaction starts, so a failed insert triggers a compensating
/// delete of the file before the error is propagated. Either everything is
/// durable or nothing is observable.
pub fn create_product<R>(
    repo: &R,
    images: &ImageStore,
    form: CreateProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + TagReader + CategoryReader + ?Sized,
{
    let data = form
        .into_create_data()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if repo.get_category_by_id(data.category_id)?.is_none() {
        return Err(ServiceError::Validation(format!(
            "unknown category id {}",
            data.category_id
        )));
    }

    for selection in &data.tags {
        let tag = repo.get_tag_by_id(selection.tag_id)?.ok_or_else(|| {
            ServiceError::Validation(format!("unknown tag id {}", selection.tag_id))
        })?;
        tag.validate_selection(&selection.option_ids)?;
    }

    let stored = match &data.image {
        Some(upload) => Some(images.store_product_image(upload, data.category_id)?),
        None => None,
    };

    let mut new_product = NewProduct::new(
        idgen::generate(IdKind::Product),
        data.name,
        data.price_cents,
    )
    .with_stock(data.stock)
    .with_category_id(data.category_id)
    .with_status(data.status);
    if let Some(description) = data.description {
        new_product = new_product.with_description(description);
    }
    if let Some(stored) = &stored {
        new_product = new_product.with_image_url(stored.url.clone());
    }

    match repo.create_product(&new_product, &data.tags) {
        Ok(product) => Ok(product),
        Err(err) => {
            discard_stored_image(images, stored.as_ref());
            Err(ServiceError::from(err))
        }
    }
}

/// Applies a partial update to a product, optionally replacing its image.
///
/// A new image is transformed under the effective category (the new one if
/// the update moves the product, otherwise the current one). Once the new
/// file exists the old one is deleted best-effort; the update itself then
/// runs under the same transaction discipline as create, removing the new
/// file again if the row update fails.
pub fn update_product<R>(
    repo: &R,
    images: &ImageStore,
    product_id: &str,
    form: UpdateProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader + ?Sized,
{
    let data = form
        .into_update_data()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let existing = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    if let Some(category_id) = data.category_id {
        if repo.get_category_by_id(category_id)?.is_none() {
            return Err(ServiceError::Validation(format!(
                "unknown category id {category_id}"
            )));
        }
    }

    let stored = match &data.image {
        Some(upload) => {
            let effective_category = data.category_id.or(existing.category_id).unwrap_or(0);
            Some(images.store_product_image(upload, effective_category)?)
        }
        None => None,
    };

    if stored.is_some() {
        if let Some(old_url) = existing.image_url.as_ref() {
            // The new image is already authoritative; a leftover old file is
            // logged, not fatal.
            if let Err(err) = images.delete_image_by_url(old_url) {
                log::warn!("failed to remove replaced image {old_url}: {err}");
            }
        }
    }

    let mut updates = UpdateProduct::new();
    if let Some(name) = data.name {
        updates = updates.name(name);
    }
    if let Some(description) = data.description {
        updates = updates.description(description);
    }
    if let Some(price_cents) = data.price_cents {
        updates = updates.price_cents(price_cents);
    }
    if let Some(stock) = data.stock {
        updates = updates.stock(stock);
    }
    if let Some(category_id) = data.category_id {
        updates = updates.category_id(category_id);
    }
    if let Some(status) = data.status {
        updates = updates.status(status);
    }
    if let Some(stored) = &stored {
        updates = updates.image_url(stored.url.clone());
    }

    match repo.update_product(product_id, &updates) {
        Ok(product) => Ok(product),
        Err(err) => {
            discard_stored_image(images, stored.as_ref());
            Err(ServiceError::from(err))
        }
    }
}

/// Deletes a product, its association rows and its stored image.
pub fn delete_product<R>(repo: &R, images: &ImageStore, product_id: &str) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    let existing = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.delete_product(product_id)?;

    if let Some(url) = existing.image_url.as_ref() {
        if let Err(err) = images.delete_image_by_url(url) {
            log::warn!("failed to remove image {url} for deleted product {product_id}: {err}");
        }
    }

    Ok(())
}

/// Tags associated with a product, options included.
pub fn get_product_tags<R>(repo: &R, product_id: &str) -> ServiceResult<Vec<Tag>>
where
    R: ProductReader + ?Sized,
{
    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    Ok(repo.list_product_tags(product_id)?)
}

/// Options selected for one `(product, tag)` pair.
pub fn get_product_tag_options<R>(
    repo: &R,
    product_id: &str,
    tag_id: i32,
) -> ServiceResult<Vec<TagOption>>
where
    R: ProductReader + ?Sized,
{
    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    Ok(repo.list_product_tag_options(product_id, tag_id)?)
}

/// Attaches tags (with selected options) to an existing product.
pub fn add_product_tags<R>(
    repo: &R,
    product_id: &str,
    form: AddProductTagsForm,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + TagReader + ?Sized,
{
    let selections = form
        .into_selections()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    for selection in &selections {
        let tag = repo.get_tag_by_id(selection.tag_id)?.ok_or_else(|| {
            ServiceError::Validation(format!("unknown tag id {}", selection.tag_id))
        })?;
        tag.validate_selection(&selection.option_ids)?;
    }

    Ok(repo.add_product_tags(product_id, &selections)?)
}

/// Detaches tags and their selected options from a product.
pub fn remove_product_tags<R>(
    repo: &R,
    product_id: &str,
    form: RemoveProductTagsForm,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if form.tag_ids.is_empty() {
        return Err(ServiceError::Validation(
            "tag_ids must not be empty".to_string(),
        ));
    }

    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    Ok(repo.remove_product_tags(product_id, &form.tag_ids)?)
}

/// Removes one selected option from a product; the tag link goes with it when
/// this was its last option.
pub fn remove_product_tag_option<R>(
    repo: &R,
    product_id: &str,
    tag_id: i32,
    option_id: i32,
) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter + ?Sized,
{
    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    Ok(repo.remove_product_tag_option(product_id, tag_id, option_id)?)
}

fn discard_stored_image(images: &ImageStore, stored: Option<&StoredImage>) {
    if let Some(stored) = stored {
        if let Err(err) = images.delete_image(&stored.path) {
            log::error!(
                "failed to remove image {} after aborted write: {err}",
                stored.path.display()
            );
        }
    }
}
