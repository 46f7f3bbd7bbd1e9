use mockall::mock;

use super::{
    AdminReader, AdminWriter, CategoryReader, CategoryWriter, OrderReader, OrderWriter,
    ProductReader, ProductWriter, TagReader, TagWriter,
};
use crate::domain::{
    admin::{Admin, NewAdmin, UpdateAdmin},
    category::{Category, NewCategory, UpdateCategory},
    order::{NewOrder, NewOrderItem, Order, OrderListQuery, UpdateOrder},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
    tag::{NewTag, NewTagOption, Tag, TagListQuery, TagOption, TagSelection, UpdateTag},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub AdminReader {}

    impl AdminReader for AdminReader {
        fn get_admin_by_id(&self, id: i32) -> RepositoryResult<Option<Admin>>;
        fn get_admin_by_username(&self, username: &str) -> RepositoryResult<Option<Admin>>;
        fn list_admins(&self) -> RepositoryResult<Vec<Admin>>;
    }
}

mock! {
    pub AdminWriter {}

    impl AdminWriter for AdminWriter {
        fn create_admin(&self, new_admin: &NewAdmin) -> RepositoryResult<Admin>;
        fn update_admin(&self, admin_id: i32, updates: &UpdateAdmin) -> RepositoryResult<Admin>;
        fn delete_admin(&self, admin_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
        fn get_category_by_name(&self, name: &str) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn get_tag_by_id(&self, id: i32) -> RepositoryResult<Option<Tag>>;
        fn list_tags(&self, query: TagListQuery) -> RepositoryResult<(usize, Vec<Tag>)>;
        fn get_option_by_id(&self, option_id: i32) -> RepositoryResult<Option<TagOption>>;
    }
}

mock! {
    pub TagWriter {}

    impl TagWriter for TagWriter {
        fn create_tag(&self, new_tag: &NewTag, options: &[NewTagOption]) -> RepositoryResult<Tag>;
        fn update_tag(&self, tag_id: i32, updates: &UpdateTag) -> RepositoryResult<Tag>;
        fn delete_tag(&self, tag_id: i32) -> RepositoryResult<()>;
        fn add_tag_option(&self, tag_id: i32, option: &NewTagOption) -> RepositoryResult<TagOption>;
        fn delete_tag_option(&self, tag_id: i32, option_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, product_id: &str) -> RepositoryResult<Option<Product>>;
        fn get_product_by_name(&self, name: &str) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
        fn list_product_tags(&self, product_id: &str) -> RepositoryResult<Vec<Tag>>;
        fn list_product_tag_options(&self, product_id: &str, tag_id: i32) -> RepositoryResult<Vec<TagOption>>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct, selections: &[TagSelection]) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: &str, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: &str) -> RepositoryResult<()>;
        fn add_product_tags(&self, product_id: &str, selections: &[TagSelection]) -> RepositoryResult<()>;
        fn remove_product_tags(&self, product_id: &str, tag_ids: &[i32]) -> RepositoryResult<()>;
        fn remove_product_tag_option(&self, product_id: &str, tag_id: i32, option_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub OrderReader {}

    impl OrderReader for OrderReader {
        fn get_order_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>>;
        fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
    }
}

mock! {
    pub OrderWriter {}

    impl OrderWriter for OrderWriter {
        fn create_order(&self, new_order: &NewOrder, items: &[NewOrderItem]) -> RepositoryResult<Order>;
        fn update_order(&self, order_id: &str, updates: &UpdateOrder) -> RepositoryResult<Order>;
        fn delete_order(&self, order_id: &str) -> RepositoryResult<()>;
    }
}
