pub mod product;

pub use product::{Category, NewProduct, Product, ProductPatch};
