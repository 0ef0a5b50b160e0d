pub mod cors;

pub use cors::upload_cors_middleware;
