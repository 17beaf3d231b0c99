//! Fixed sample catalogue served when the real store cannot answer.

use crate::dtos::ProductResponse;
use crate::models::Category;

const SAMPLES: [(&str, &str, f64, Category); 4] = [
    ("686f5c106b7e1b4605d09e60", "Laptop", 1200.0, Category::Electronics),
    (
        "686f5c106b7e1b4605d09e61",
        "Wireless Mouse",
        25.0,
        Category::Accessories,
    ),
    ("686f5c106b7e1b4605d09e62", "Notebook", 5.0, Category::Stationery),
    (
        "686f5c106b7e1b4605d09e63",
        "Smartphone",
        699.0,
        Category::Electronics,
    ),
];

pub fn sample_products() -> Vec<ProductResponse> {
    SAMPLES
        .iter()
        .map(|(id, name, price, category)| ProductResponse {
            id: id.to_string(),
            name: name.to_string(),
            price: *price,
            category: *category,
            created_at: None,
            updated_at: None,
        })
        .collect()
}
