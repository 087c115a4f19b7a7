pub mod data_url;
pub mod image_decoder;

pub use data_url::{decode_base64, parse_data_url, DataUrl};
pub use image_decoder::ImageDecoder;
