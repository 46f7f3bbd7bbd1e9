use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_tags)]
pub struct NewProductTag<'a> {
    pub product_id: &'a str,
    pub tag_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_tag_options)]
pub struct NewProductTagOption<'a> {
    pub product_id: &'a str,
    pub option_id: i32,
    pub is_default: bool,
}
