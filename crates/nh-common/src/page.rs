//! Page Result Wrapper

use serde::{Deserialize, Serialize};

/// One page of a paged read: the items in store order plus the opaque
/// continuation token for the next page. `next_page_id` is present only when
/// more matching entities exist beyond this page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_id: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_id: Option<String>) -> Self {
        Self {
            items,
            next_page_id,
        }
    }
}
