//! Generic CRUD handle shared by the expense, income, payment and savings APIs

use std::fmt::Display;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::{ClientError, FinanceClient, RequestContext};
use crate::models::ListFilter;

/// CRUD handle for one `/api/v1` collection
pub struct ResourceApi<'a, D, I> {
    client: &'a FinanceClient,
    base_path: &'static str,
    _marker: PhantomData<fn() -> (D, I)>,
}

impl<'a, D, I> ResourceApi<'a, D, I>
where
    D: Serialize + DeserializeOwned,
    I: Display,
{
    pub fn new(client: &'a FinanceClient, base_path: &'static str) -> Self {
        Self {
            client,
            base_path,
            _marker: PhantomData,
        }
    }

    fn item_path(&self, id: &I) -> String {
        format!("{}/{}", self.base_path, id)
    }

    pub fn list_request(&self, filter: &ListFilter) -> Result<RequestContext, ClientError> {
        RequestContext::get(self.base_path).with_query(filter)
    }

    pub fn get_request(&self, id: &I) -> RequestContext {
        RequestContext::get(self.item_path(id))
    }

    pub fn create_request(&self, dto: &D) -> Result<RequestContext, ClientError> {
        RequestContext::post(self.base_path).with_json(dto)
    }

    pub fn update_request(&self, id: &I, dto: &D) -> Result<RequestContext, ClientError> {
        RequestContext::put(self.item_path(id)).with_json(dto)
    }

    pub fn delete_request(&self, id: &I) -> RequestContext {
        RequestContext::delete(self.item_path(id))
    }

    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<D>, ClientError> {
        self.client.execute(self.list_request(filter)?).await
    }

    pub async fn get(&self, id: I) -> Result<D, ClientError> {
        self.client.execute(self.get_request(&id)).await
    }

    pub async fn create(&self, dto: &D) -> Result<D, ClientError> {
        self.client.execute(self.create_request(dto)?).await
    }

    pub async fn update(&self, id: I, dto: &D) -> Result<D, ClientError> {
        self.client.execute(self.update_request(&id, dto)?).await
    }

    /// Delete a record; any 2xx answer counts as success
    pub async fn delete(&self, id: I) -> Result<(), ClientError> {
        self.client.execute_empty(self.delete_request(&id)).await
    }
}
