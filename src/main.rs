use std::env;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use bakery_admin::config::{ImageConfig, ServerConfig};
use bakery_admin::db::establish_connection_pool;
use bakery_admin::repository::DieselRepository;
use bakery_admin::routes::admins::{add_admin, edit_admin, login, remove_admin, show_admins};
use bakery_admin::routes::categories::{
    add_category, edit_category, remove_category, show_categories, show_category,
};
use bakery_admin::routes::health;
use bakery_admin::routes::orders::{edit_order_status, remove_order, show_order, show_orders};
use bakery_admin::routes::products::{
    add_product, attach_product_tags, detach_product_tag_option, detach_product_tags,
    edit_product, remove_product, show_product, show_product_tag_options, show_product_tags,
    show_products,
};
use bakery_admin::routes::tags::{
    add_tag, add_tag_option, edit_tag, remove_tag, remove_tag_option, show_tag, show_tags,
};
use bakery_admin::services::images::ImageStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("bakery.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let jwt_secret = match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            log::error!("JWT_SECRET environment variable not set");
            std::process::exit(1);
        }
    };

    let server_config = ServerConfig { jwt_secret };
    let image_config = ImageConfig::from_env();

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);
    let images = ImageStore::new(&image_config);
    let storage_root = image_config.storage_root.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/uploads", storage_root.clone()))
            .service(health)
            .service(
                web::scope("/api")
                    .service(login)
                    .service(show_admins)
                    .service(add_admin)
                    .service(edit_admin)
                    .service(remove_admin)
                    .service(show_categories)
                    .service(show_category)
                    .service(add_category)
                    .service(edit_category)
                    .service(remove_category)
                    .service(show_tags)
                    .service(show_tag)
                    .service(add_tag)
                    .service(edit_tag)
                    .service(remove_tag)
                    .service(add_tag_option)
                    .service(remove_tag_option)
                    .service(show_products)
                    .service(show_product)
                    .service(add_product)
                    .service(edit_product)
                    .service(remove_product)
                    .service(show_product_tags)
                    .service(show_product_tag_options)
                    .service(attach_product_tags)
                    .service(detach_product_tags)
                    .service(detach_product_tag_option)
                    .service(show_orders)
                    .service(show_order)
                    .service(edit_order_status)
                    .service(remove_order),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(images.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
