use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// One page of a collection as returned by the server.
///
/// `records` keep server order; `total` is the size of the whole matching
/// set, not of this page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<E> {
    pub records: Vec<E>,
    pub total: u64,
}

impl<E> ListPage<E> {
    pub fn new(records: Vec<E>, total: u64) -> Self {
        Self { records, total }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parameters of a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: u32,
    pub size: u32,
    /// Restrict the collection to entities related to this member.
    pub user_id: Option<EntityId>,
}

impl PageQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: Option<EntityId>) -> Self {
        self.user_id = user_id;
        self
    }
}

/// How a fetched page joins the accumulated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Drop everything held so far (pull-to-refresh, first load).
    Replace,
    /// Concatenate after what is held (load more).
    Append,
}

/// Fold `incoming` into `existing`.
///
/// Append does not de-duplicate by key: if page boundaries shift between
/// requests the same record can appear twice.
pub fn merge<E>(mut existing: Vec<E>, incoming: Vec<E>, mode: MergeMode) -> Vec<E> {
    match mode {
        MergeMode::Replace => incoming,
        MergeMode::Append => {
            existing.extend(incoming);
            existing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_adds_page_length() {
        let existing = vec![1, 2, 3];
        let merged = merge(existing.clone(), vec![4, 5], MergeMode::Append);
        assert_eq!(merged.len(), existing.len() + 2);
        assert_eq!(merged, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn append_keeps_duplicates() {
        let merged = merge(vec![1, 2], vec![2, 3], MergeMode::Append);
        assert_eq!(merged, vec![1, 2, 2, 3]);
    }

    #[test]
    fn replace_discards_existing() {
        let merged = merge(vec![1, 2, 3], vec![9], MergeMode::Replace);
        assert_eq!(merged, vec![9]);
    }

    #[test]
    fn page_deserializes_from_wire() {
        let page: ListPage<u32> = serde_json::from_str(r#"{"records":[1,2],"total":7}"#).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 7);
    }
}
