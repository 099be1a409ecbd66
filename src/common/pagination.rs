use serde::{Deserialize, Serialize};

/// One page of a listing together with the total number of matching records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetPagination<T> {
    pub items: Vec<T>,
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
}
