pub mod database;
pub mod memory;
pub mod metrics;
pub mod samples;
pub mod store;

pub use database::MongoProductStore;
pub use memory::InMemoryProductStore;
pub use self::metrics::{get_metrics, init_metrics, record_fallback, record_operation};
pub use samples::sample_products;
pub use store::{parse_product_id, product_not_found, ProductStore};
