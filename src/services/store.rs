//! Authoritative in-memory list of one entity type.

use crate::api::{ApiRequest, Resource, Transport};
use crate::services::FetchError;

/// Entities as last returned by the API, in server order.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectionStore<E> {
    items: Vec<E>,
}

impl<E> Default for CollectionStore<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: Resource> CollectionStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<E>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: E::Id) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Swaps in a freshly fetched collection.
    pub fn replace(&mut self, items: Vec<E>) {
        self.items = items;
    }

    /// Drops the entry with `id` locally, returning it if it was present.
    pub fn remove(&mut self, id: E::Id) -> Option<E> {
        let position = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(position))
    }
}

/// Fetches the full collection. Only `200` with a decodable array counts.
pub async fn fetch_collection<E, T>(transport: &T) -> Result<Vec<E>, FetchError>
where
    E: Resource,
    T: Transport,
{
    let response = transport
        .send(ApiRequest::get(E::COLLECTION_PATH))
        .await?;
    if response.status != 200 {
        return Err(FetchError::Status(response.status));
    }
    response
        .json::<Vec<E>>()
        .map_err(|err| FetchError::Decode(err.to_string()))
}
