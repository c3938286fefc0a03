pub mod image;
pub mod payload;

pub use image::{ImageRecord, NewImage};
pub use payload::{ErrorBody, GenerateRequest, GenerateResponse, ListResponse};
