//! Fixtures shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::error::Error;
use crate::list::{ListPage, PageQuery};
use crate::model::{Group, Member};
use crate::traits::{Entity, Fetcher};
use crate::types::EntityId;
use crate::Result;

pub fn group(id: &str, name: &str) -> Group {
    Group {
        id: EntityId::new(id).unwrap(),
        name: name.to_string(),
        description: None,
        category: None,
        member_count: 0,
        is_private: false,
        created_by: None,
        created_at: None,
    }
}

pub fn groups(n: usize) -> Vec<Group> {
    (0..n)
        .map(|i| group(&format!("g{i}"), &format!("Group {i}")))
        .collect()
}

pub fn member(id: &str, first: &str, last: &str) -> Member {
    Member {
        id: EntityId::new(id).unwrap(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: None,
        batch: None,
        department: None,
        role: None,
        profile_picture: None,
        following: false,
    }
}

/// In-memory collection served in pages. Pages after the first can be held
/// back until [`PagedFixture::open_gate`] is called.
pub struct PagedFixture<E> {
    records: Mutex<Vec<E>>,
    requests: Mutex<Vec<u32>>,
    gate: Option<Semaphore>,
}

impl<E: Entity> PagedFixture<E> {
    pub fn new(records: Vec<E>) -> Self {
        Self {
            records: Mutex::new(records),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gate_after_first_page(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn open_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.close();
        }
    }

    pub fn set_records(&self, records: Vec<E>) {
        *self.records.lock().unwrap() = records;
    }

    pub fn requests(&self) -> Vec<u32> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl<E: Entity> Fetcher<E> for PagedFixture<E> {
    async fn fetch_page(&self, query: &PageQuery) -> Result<ListPage<E>> {
        self.requests.lock().unwrap().push(query.page);

        let page = {
            let records = self.records.lock().unwrap();
            let start = ((query.page - 1) * query.size) as usize;
            let end = (start + query.size as usize).min(records.len());
            let slice = records.get(start..end).unwrap_or_default().to_vec();
            ListPage::new(slice, records.len() as u64)
        };

        if query.page > 1 {
            if let Some(gate) = &self.gate {
                let _ = gate.acquire().await;
            }
        }

        Ok(page)
    }

    async fn fetch_one(&self, id: &EntityId) -> Result<E> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id() == id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                resource: E::RESOURCE.to_string(),
                id: id.to_string(),
            })
    }
}
