//! REST client for the storefront basket API.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET /basket?id={id}`
//! - `POST /basket`
//! - `DELETE /basket?id={id}`
//! - `GET /coupons/{code}`

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    api::BasketApi,
    error::{CartError, CartResult},
    models::{Cart, Coupon},
};

#[derive(Debug, Clone)]
pub struct HttpBasketClient {
    client: Client,
    base_url: Url,
}

impl HttpBasketClient {
    pub fn new(base_url: &str) -> CartResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> CartResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| CartError::BadRequest(format!("invalid base url {base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CartError::BadRequest(format!(
                "base url cannot carry paths: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn check(response: Response) -> CartResult<Response> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CartError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CartError::Remote {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> CartResult<T> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl BasketApi for HttpBasketClient {
    async fn get_basket(&self, id: &str) -> CartResult<Cart> {
        let response = self
            .client
            .get(self.endpoint(&["basket"]))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn set_basket(&self, cart: &Cart) -> CartResult<Cart> {
        let response = self
            .client
            .post(self.endpoint(&["basket"]))
            .json(cart)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_basket(&self, id: &str) -> CartResult<()> {
        let response = self
            .client
            .delete(self.endpoint(&["basket"]))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn get_coupon(&self, code: &str) -> CartResult<Coupon> {
        let response = self
            .client
            .get(self.endpoint(&["coupons", code]))
            .send()
            .await?;
        Self::decode(response).await
    }
}
