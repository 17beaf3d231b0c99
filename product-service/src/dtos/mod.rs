pub mod products;

pub use products::{
    ApiInfoResponse, CreateProductRequest, DataResponse, DataSource, DeleteProductResponse,
    ListProductsResponse, ProductResponse, UpdateProductRequest,
};
