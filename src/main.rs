use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_cart::{
    api::HttpBasketClient,
    config::AppConfig,
    services::{cart_service::CartService, image_service::ImageResolver},
    storage::FileStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_cart=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let api = Arc::new(HttpBasketClient::new(&config.basket_api_url)?);
    let storage = Arc::new(FileStore::new(&config.cart_store_path));
    let images = ImageResolver::new(&config.client_origin)
        .with_placeholder(&config.placeholder_image_url);
    let service = CartService::new(api, storage, images);

    match service.init().await {
        Some(cart) => tracing::info!(cart_id = %cart.id, "restored cart"),
        None => tracing::info!(
            store = %config.cart_store_path,
            "no active cart"
        ),
    }

    println!("{}", serde_json::to_string_pretty(&service.summary())?);

    Ok(())
}
