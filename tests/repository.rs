use bakery_admin::domain::category::{NewCategory, UpdateCategory};
use bakery_admin::domain::order::{DeliveryType, NewOrder, NewOrderItem, OrderListQuery, OrderStatus, UpdateOrder};
use bakery_admin::domain::product::{NewProduct, ProductListQuery, ProductStatus};
use bakery_admin::domain::tag::{NewTag, NewTagOption, TagListQuery, TagSelection, UpdateTag};
use bakery_admin::repository::errors::RepositoryError;
use bakery_admin::repository::{
    CategoryReader, CategoryWriter, DieselRepository, OrderReader, OrderWriter, ProductReader,
    ProductWriter, TagReader, TagWriter,
};

mod common;

#[test]
fn test_category_repository_crud() {
    let test_db = common::TestDb::new("test_category_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let cakes = repo
        .create_category(&NewCategory::new("Cakes"))
        .expect("create category");
    let breads = repo
        .create_category(&NewCategory::new("Breads"))
        .expect("create category");

    // Duplicate names violate the unique constraint.
    let err = repo
        .create_category(&NewCategory::new("Cakes"))
        .expect_err("duplicate name should fail");
    assert!(matches!(err, RepositoryError::Conflict));

    let listed = repo.list_categories().expect("list categories");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Breads"); // ordered by name

    let renamed = repo
        .update_category(breads.id, &UpdateCategory::new("Sourdough"))
        .expect("rename category");
    assert_eq!(renamed.name, "Sourdough");

    let by_name = repo
        .get_category_by_name("Sourdough")
        .expect("get by name");
    assert_eq!(by_name.map(|category| category.id), Some(breads.id));

    repo.delete_category(cakes.id).expect("delete category");
    assert!(repo.get_category_by_id(cakes.id).expect("get").is_none());

    let err = repo
        .delete_category(cakes.id)
        .expect_err("second delete should fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_category_delete_clears_product_references() {
    let test_db = common::TestDb::new("test_category_delete_clears_product_references.db");
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&NewCategory::new("Cakes"))
        .expect("create category");

    let product = repo
        .create_product(
            &NewProduct::new("P20250300001", "Chocolate Cake", 6800)
                .with_category_id(category.id),
            &[],
        )
        .expect("create product");
    assert_eq!(product.category_id, Some(category.id));

    repo.delete_category(category.id).expect("delete category");

    let reloaded = repo
        .get_product_by_id("P20250300001")
        .expect("get product")
        .expect("product still exists");
    assert_eq!(reloaded.category_id, None);
}

#[test]
fn test_tag_repository_crud() {
    let test_db = common::TestDb::new("test_tag_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let options = vec![
        NewTagOption::new("Regular").default_option(),
        NewTagOption::new("Less sweet").with_recommendation_level(1),
        NewTagOption::new("Extra sweet")
            .with_additional_price_cents(50)
            .with_recommendation_level(-1),
    ];
    let tag = repo
        .create_tag(&NewTag::new("Sweetness", true, false), &options)
        .expect("create tag");

    assert_eq!(tag.options.len(), 3);
    assert!(tag.required);
    assert!(!tag.multi_select);
    assert!(tag.options[0].is_default);
    assert_eq!(tag.options[2].additional_price_cents, 50);

    let reloaded = repo
        .get_tag_by_id(tag.id)
        .expect("get tag")
        .expect("tag exists");
    assert_eq!(reloaded.options.len(), 3);

    let updated = repo
        .update_tag(tag.id, &UpdateTag::new().name("Sugar level").multi_select(true))
        .expect("update tag");
    assert_eq!(updated.name, "Sugar level");
    assert!(updated.multi_select);
    assert_eq!(updated.options.len(), 3);

    let (total, listed) = repo
        .list_tags(TagListQuery::new().search("Sugar"))
        .expect("list tags");
    assert_eq!(total, 1);
    assert_eq!(listed[0].options.len(), 3);

    let extra = repo
        .add_tag_option(tag.id, &NewTagOption::new("Half sweet"))
        .expect("add option");
    assert_eq!(extra.tag_id, tag.id);

    repo.delete_tag_option(tag.id, extra.id)
        .expect("delete option");
    let err = repo
        .delete_tag_option(tag.id, extra.id)
        .expect_err("second option delete should fail");
    assert!(matches!(err, RepositoryError::NotFound));

    repo.delete_tag(tag.id).expect("delete tag");
    assert!(repo.get_tag_by_id(tag.id).expect("get").is_none());
}

#[test]
fn test_product_create_persists_tag_associations() {
    let test_db = common::TestDb::new("test_product_create_persists_tag_associations.db");
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&NewCategory::new("Drinks"))
        .expect("create category");
    let tag = repo
        .create_tag(
            &NewTag::new("Ice", true, false),
            &[NewTagOption::new("Regular"), NewTagOption::new("No ice")],
        )
        .expect("create tag");

    let selections = vec![TagSelection::new(tag.id, vec![tag.options[0].id])];
    let product = repo
        .create_product(
            &NewProduct::new("P20250300010", "Milk Tea", 1200)
                .with_category_id(category.id)
                .with_stock(5),
            &selections,
        )
        .expect("create product");

    assert_eq!(product.product_id, "P20250300010");
    assert_eq!(product.stock, 5);
    assert_eq!(product.status, ProductStatus::Active);

    let tags = repo
        .list_product_tags("P20250300010")
        .expect("list product tags");
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, tag.id);

    let selected = repo
        .list_product_tag_options("P20250300010", tag.id)
        .expect("list selected options");
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, tag.options[0].id);

    // A second product with the same generated id collides on the primary key.
    let err = repo
        .create_product(&NewProduct::new("P20250300010", "Other", 100), &[])
        .expect_err("duplicate id should fail");
    assert!(matches!(err, RepositoryError::Conflict));
}

#[test]
fn test_product_create_rolls_back_on_bad_selection() {
    let test_db = common::TestDb::new("test_product_create_rolls_back_on_bad_selection.db");
    let repo = DieselRepository::new(test_db.pool());

    // Option id 999 does not exist, so the option insert violates the foreign
    // key after the product row was already written inside the transaction.
    let selections = vec![TagSelection::new(999, vec![999])];
    let result = repo.create_product(
        &NewProduct::new("P20250300011", "Phantom", 100),
        &selections,
    );

    assert!(result.is_err());
    assert!(
        repo.get_product_by_id("P20250300011")
            .expect("get product")
            .is_none(),
        "no partial product row may survive the rollback"
    );
}

#[test]
fn test_product_tag_detachment_rules() {
    let test_db = common::TestDb::new("test_product_tag_detachment_rules.db");
    let repo = DieselRepository::new(test_db.pool());

    let tag = repo
        .create_tag(
            &NewTag::new("Toppings", false, true),
            &[NewTagOption::new("Pearls"), NewTagOption::new("Pudding")],
        )
        .expect("create tag");

    let option_a = tag.options[0].id;
    let option_b = tag.options[1].id;

    repo.create_product(
        &NewProduct::new("P20250300020", "Bubble Tea", 1500),
        &[TagSelection::new(tag.id, vec![option_a, option_b])],
    )
    .expect("create product");

    // Removing one of two options keeps the tag link alive.
    repo.remove_product_tag_option("P20250300020", tag.id, option_a)
        .expect("remove first option");
    assert_eq!(
        repo.list_product_tags("P20250300020")
            .expect("list tags")
            .len(),
        1
    );

    // Removing the last option also removes the tag association row.
    repo.remove_product_tag_option("P20250300020", tag.id, option_b)
        .expect("remove last option");
    assert!(
        repo.list_product_tags("P20250300020")
            .expect("list tags")
            .is_empty()
    );

    let err = repo
        .remove_product_tag_option("P20250300020", tag.id, option_b)
        .expect_err("removing an absent selection should fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_product_delete_removes_association_rows() {
    let test_db = common::TestDb::new("test_product_delete_removes_association_rows.db");
    let repo = DieselRepository::new(test_db.pool());

    let tag = repo
        .create_tag(
            &NewTag::new("Size", true, false),
            &[NewTagOption::new("Large")],
        )
        .expect("create tag");

    repo.create_product(
        &NewProduct::new("P20250300030", "Latte", 900),
        &[TagSelection::new(tag.id, vec![tag.options[0].id])],
    )
    .expect("create product");

    // The tag is attached, so deleting it is rejected.
    let err = repo
        .delete_tag(tag.id)
        .expect_err("deleting an attached tag should fail");
    assert!(matches!(err, RepositoryError::InUse));

    repo.delete_product("P20250300030").expect("delete product");

    let err = repo
        .delete_product("P20250300030")
        .expect_err("second delete should fail");
    assert!(matches!(err, RepositoryError::NotFound));

    // With the associations gone the tag can be deleted.
    repo.delete_tag(tag.id).expect("delete tag after detach");
}

#[test]
fn test_product_list_filters_and_paginates() {
    let test_db = common::TestDb::new("test_product_list_filters_and_paginates.db");
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&NewCategory::new("Cakes"))
        .expect("create category");

    for i in 0..12 {
        repo.create_product(
            &NewProduct::new(
                format!("P202503000{i:02}"),
                format!("Cake {i}"),
                1000 + i,
            )
            .with_category_id(category.id),
            &[],
        )
        .expect("create product");
    }
    repo.create_product(&NewProduct::new("P20250300099", "Baguette", 400), &[])
        .expect("create product");

    let (total, items) = repo
        .list_products(ProductListQuery::new().category_id(category.id).paginate(1, 10))
        .expect("list products");
    assert_eq!(total, 12);
    assert_eq!(items.len(), 10);

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("Baguette"))
        .expect("search products");
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Baguette");

    let by_name = repo
        .get_product_by_name("Baguette")
        .expect("get by name")
        .expect("product exists");
    assert_eq!(by_name.product_id, "P20250300099");
}

#[test]
fn test_order_repository_crud() {
    let test_db = common::TestDb::new("test_order_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let items = vec![
        NewOrderItem::new("Chocolate Cake", 6800, 1),
        NewOrderItem::new("Croissant", 350, 2),
    ];
    let order = repo
        .create_order(
            &NewOrder::new("O202503011230000001", DeliveryType::Delivery, 7500)
                .with_address("1 Baker Street"),
            &items,
        )
        .expect("create order");

    assert_eq!(order.status, OrderStatus::Paid);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total_cents, 7500);

    let (total, listed) = repo
        .list_orders(OrderListQuery::new().status(OrderStatus::Paid))
        .expect("list orders");
    assert_eq!(total, 1);
    assert_eq!(listed[0].items.len(), 2);

    let completed = repo
        .update_order(
            "O202503011230000001",
            &UpdateOrder::new().status(OrderStatus::Completed),
        )
        .expect("update order");
    assert_eq!(completed.status, OrderStatus::Completed);

    let (total, _) = repo
        .list_orders(OrderListQuery::new().status(OrderStatus::Paid))
        .expect("list paid orders");
    assert_eq!(total, 0);

    repo.delete_order("O202503011230000001").expect("delete order");
    let err = repo
        .delete_order("O202503011230000001")
        .expect_err("second delete should fail");
    assert!(matches!(err, RepositoryError::NotFound));
}
