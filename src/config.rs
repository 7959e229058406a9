use std::env;

use crate::services::image_service::DEFAULT_PLACEHOLDER_URL;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub basket_api_url: String,
    pub client_origin: String,
    pub cart_store_path: String,
    pub placeholder_image_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let basket_api_url =
            env::var("BASKET_API_URL").unwrap_or_else(|_| "https://localhost:5001/api".to_string());
        let client_origin =
            env::var("CLIENT_ORIGIN").unwrap_or_else(|_| "https://localhost:4200".to_string());
        let cart_store_path =
            env::var("CART_STORE_PATH").unwrap_or_else(|_| ".storefront/cart.json".to_string());
        let placeholder_image_url = env::var("PLACEHOLDER_IMAGE_URL")
            .unwrap_or_else(|_| DEFAULT_PLACEHOLDER_URL.to_string());

        if basket_api_url.trim().is_empty() {
            anyhow::bail!("BASKET_API_URL must not be empty");
        }

        Ok(Self {
            basket_api_url,
            client_origin,
            cart_store_path,
            placeholder_image_url,
        })
    }
}
