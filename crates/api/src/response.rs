//! Success envelopes shared by API handlers.
//!
//! Every response carries a `success` flag; failures are produced by
//! [`AppError`](crate::error::AppError) with `success: false`.

use serde::Serialize;

/// `{ "success": true, "data": [...], "count": n }` envelope for listings.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}
