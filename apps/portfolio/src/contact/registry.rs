//! Mounted contact forms, keyed by the `form_id` rendered into each page.
//!
//! Requests carrying the same id share one `ContactForm`, so the in-flight
//! guard holds across HTTP requests. The map is bounded: once full, the oldest
//! mount is evicted and any outcome still pending for it is discarded.

use std::collections::{HashMap, VecDeque};

use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::contact::form::ContactForm;

pub const DEFAULT_CAPACITY: usize = 1024;

pub struct FormRegistry {
    capacity: usize,
    inner: Mutex<Mounted>,
}

#[derive(Default)]
struct Mounted {
    forms: HashMap<String, ContactForm>,
    order: VecDeque<String>,
}

impl FormRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Mounted::default()),
        }
    }

    /// Mounts a fresh, empty form.
    pub async fn mount(&self) -> (String, ContactForm) {
        let mut inner = self.inner.lock().await;
        self.insert(&mut inner)
    }

    /// Returns the form mounted under `id`, or mounts a new one when the id is
    /// missing, unknown, or already evicted.
    pub async fn resolve(&self, id: Option<&str>) -> (String, ContactForm) {
        let mut inner = self.inner.lock().await;
        if let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) {
            if let Some(form) = inner.forms.get(id) {
                return (id.to_string(), form.clone());
            }
            debug!("Unknown contact form id {id}; mounting a new form");
        }
        self.insert(&mut inner)
    }

    fn insert(&self, inner: &mut Mounted) -> (String, ContactForm) {
        while inner.order.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.forms.remove(&oldest);
            }
        }
        let id = Uuid::new_v4().to_string();
        let form = ContactForm::default();
        inner.forms.insert(id.clone(), form.clone());
        inner.order.push_back(id.clone());
        (id, form)
    }
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
