//! Request extractors whose rejections map onto [`AppError`](crate::error::AppError).

mod item_id;
mod json_body;

pub use item_id::ItemId;
pub use json_body::JsonBody;
