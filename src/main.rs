//! Demo session: open a cart, fill it from a menu, adjust it and check out.

use food_cart::clients::CartClient;
use food_cart::config::CartConfig;
use food_cart::lifecycle::tracing::setup_tracing;
use food_cart::lifecycle::CartSystem;
use food_cart::model::{format_price, CartCustomization, MenuItem};
use rust_decimal::Decimal;
use tracing::{info, Instrument};

fn menu() -> Vec<MenuItem> {
    let item = |id: &str, name: &str, cents: i64| MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        image_url: format!("https://cdn.example.com/storage/files/{id}/view"),
        description: String::new(),
        calories: None,
        protein: None,
        rating: None,
        kind: None,
    };
    vec![
        item("menu_burger", "Classic Burger", 500),
        item("menu_pizza", "Pepperoni Pizza", 1200),
    ]
}

async fn checkout(client: &CartClient, cart_id: &str) -> Result<(), String> {
    let lines = client.items(cart_id).await.map_err(|e| e.to_string())?;
    for line in &lines {
        info!(
            item = %line.name,
            quantity = line.quantity,
            line_total = %format_price(line.line_total()),
            "Checkout line"
        );
    }
    let total = client.total_price(cart_id).await.map_err(|e| e.to_string())?;
    info!(total = %format_price(total), "Order placed");
    client.clear_cart(cart_id).await.map_err(|e| e.to_string())?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    let system = CartSystem::new(config.clone());
    let client = system.cart_client.clone();

    let cart_id = client.open_cart().await.map_err(|e| e.to_string())?;
    info!(%cart_id, "Cart opened");

    // Stand-in for a UI badge: follow snapshots in the background.
    let mut snapshots = client.watch(&cart_id).await.map_err(|e| e.to_string())?;
    let badge = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let items = snapshots.borrow_and_update().total_items();
            info!(items, "Cart badge");
        }
    });

    let cheese = CartCustomization::topping("cheese", "Cheese", Decimal::new(50, 2));
    let fries = CartCustomization::side("fries", "Fries", Decimal::new(250, 2));
    let menu = menu();

    let span = tracing::info_span!("browsing");
    async {
        let burger = menu[0].to_cart_item(&config.project_id);
        let pizza = menu[1].to_cart_item(&config.project_id);

        client
            .add_items(&cart_id, burger.clone(), vec![cheese.clone()], 2)
            .await?;
        client
            .add_item(&cart_id, burger.clone(), vec![fries.clone(), cheese.clone()])
            .await?;
        client.add_item(&cart_id, pizza, vec![]).await?;
        client
            .remove_item(&cart_id, &burger.id, vec![cheese.clone()])
            .await?;
        Ok::<(), food_cart::cart_actor::CartError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let totals = client.totals(&cart_id).await.map_err(|e| e.to_string())?;
    info!(items = totals.items, price = %format_price(totals.price), "Cart totals");

    checkout(&client, &cart_id).await?;

    client.close_cart(&cart_id).await.map_err(|e| e.to_string())?;
    drop(client);
    if let Err(e) = badge.await {
        return Err(format!("Badge task failed: {e}"));
    }

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
