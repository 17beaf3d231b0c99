use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    #[default]
    Other,
    Accessories,
    Stationery,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Clothing,
        Category::Food,
        Category::Other,
        Category::Accessories,
        Category::Stationery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Food => "Food",
            Category::Other => "Other",
            Category::Accessories => "Accessories",
            Category::Stationery => "Stationery",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product as persisted in the `products` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub price: f64,
    pub category: Category,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Field values for a product that passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: Category,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category.is_none()
    }
}

impl Product {
    pub fn new(new: NewProduct) -> Self {
        let now = now_millis();
        Self {
            id: ObjectId::new(),
            name: new.name,
            price: new.price,
            category: new.category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        self.updated_at = now_millis();
    }
}

/// Current time truncated to milliseconds, the precision BSON datetimes keep,
/// so a freshly built document equals what a later read returns.
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
