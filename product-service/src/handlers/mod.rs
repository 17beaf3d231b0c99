pub mod health;
pub mod info;
pub mod products;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use info::api_info;
pub use products::{
    create_product, delete_product, get_product, list_products, route_not_found, update_product,
};
