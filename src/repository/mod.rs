use crate::db::{DbConnection, DbPool};
use crate::domain::admin::{Admin, NewAdmin, UpdateAdmin};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::order::{NewOrder, NewOrderItem, Order, OrderListQuery, UpdateOrder};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::tag::{NewTag, NewTagOption, Tag, TagListQuery, TagOption, TagSelection, UpdateTag};
use crate::repository::errors::RepositoryResult;

pub mod admin;
pub mod category;
pub mod errors;
pub mod order;
pub mod product;
pub mod tag;

#[cfg(test)]
pub mod mock;

/// Diesel-backed repository implementation that wraps an r2d2 pool.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over admin accounts.
pub trait AdminReader {
    fn get_admin_by_id(&self, id: i32) -> RepositoryResult<Option<Admin>>;
    fn get_admin_by_username(&self, username: &str) -> RepositoryResult<Option<Admin>>;
    fn list_admins(&self) -> RepositoryResult<Vec<Admin>>;
}

/// Write operations over admin accounts.
pub trait AdminWriter {
    fn create_admin(&self, new_admin: &NewAdmin) -> RepositoryResult<Admin>;
    fn update_admin(&self, admin_id: i32, updates: &UpdateAdmin) -> RepositoryResult<Admin>;
    fn delete_admin(&self, admin_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over categories.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    fn get_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

/// Write operations over categories.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    /// Deletes the category, clearing the category reference of any product
    /// that still points at it.
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over tags and their options.
pub trait TagReader {
    fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
    fn list_tags(&self, query: TagListQuery) -> RepositoryResult<(usize, Vec<Tag>)>;
    fn get_option_by_id(&self, option_id: i32) -> RepositoryResult<Option<TagOption>>;
}

/// Write operations over tags and their options.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag, options: &[NewTagOption]) -> RepositoryResult<Tag>;
    fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
    /// Fails with [`errors::RepositoryError::InUse`] while products still
    /// reference the tag.
    fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
    fn add_tag_option(&self, tag_id: i32, option: &NewTagOption) -> RepositoryResult<TagOption>;
    fn delete_tag_option(&self, tag_id: i32, option_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over products and their tag associations.
pub trait ProductReader {
    fn get_product_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>>;
    fn get_product_by_name(&self, name: &str) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Tags associated with the product, options included.
    fn list_product_tags(&self, product_id: &str) -> RepositoryResult<Vec<Tag>>;
    /// Options selected for one `(product, tag)` pair.
    fn list_product_tag_options(
        &self,
        product_id: &str,
        tag_id: i32,
    ) -> RepositoryResult<Vec<TagOption>>;
}

/// Write operations over products and their tag associations.
pub trait ProductWriter {
    /// Inserts the product row plus one association row per selected tag and
    /// one per selected option, all inside a single transaction. No rows
    /// survive a failure.
    fn create_product(
        &self,
        new_product: &NewProduct,
        selections: &[TagSelection],
    ) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: &str,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    /// Removes the product and all of its association rows.
    fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
    fn add_product_tags(
        &self,
        product_id: &str,
        selections: &[TagSelection],
    ) -> RepositoryResult<()>;
    fn remove_product_tags(&self, product_id: &str, tag_ids: &[i32]) -> RepositoryResult<()>;
    /// Removes one option association; when it was the last one for the
    /// `(product, tag)` pair the tag association row is removed as well.
    fn remove_product_tag_option(
        &self,
        product_id: &str,
        tag_id: i32,
        option_id: i32,
    ) -> RepositoryResult<()>;
}

/// Read-only operations over orders.
pub trait OrderReader {
    fn get_order_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

/// Write operations over orders.
pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder, items: &[NewOrderItem])
    -> RepositoryResult<Order>;
    fn update_order(&self, order_id: &str, updates: &UpdateOrder) -> RepositoryResult<Order>;
    fn delete_order(&self, order_id: &str) -> RepositoryResult<()>;
}
