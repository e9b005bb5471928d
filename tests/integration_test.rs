use food_cart::cart_actor::{CartError, CartTotals};
use food_cart::config::CartConfig;
use food_cart::lifecycle::CartSystem;
use food_cart::model::{CartCustomization, MenuItem, NewCartItem};
use rust_decimal::Decimal;

fn burger() -> NewCartItem {
    NewCartItem::new("burger", "Burger", Decimal::new(500, 2), "burger.png")
}

fn cheese() -> CartCustomization {
    CartCustomization::topping("cheese", "Cheese", Decimal::new(50, 2))
}

fn bacon() -> CartCustomization {
    CartCustomization::topping("bacon", "Bacon", Decimal::new(150, 2))
}

/// The burger-with-cheese walkthrough, end to end through the real actor.
#[tokio::test]
async fn test_cart_system_walkthrough() {
    let system = CartSystem::new(CartConfig::default());
    let client = &system.cart_client;

    let cart_id = client.open_cart().await.expect("Failed to open cart");

    assert_eq!(client.add_item(&cart_id, burger(), vec![cheese()]).await, Ok(1));
    assert_eq!(client.add_item(&cart_id, burger(), vec![cheese()]).await, Ok(2));

    let items = client.items(&cart_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(
        client.totals(&cart_id).await.unwrap(),
        CartTotals {
            items: 2,
            price: Decimal::new(1100, 2),
        }
    );

    assert_eq!(client.remove_item(&cart_id, "burger", vec![cheese()]).await, Ok(Some(1)));
    assert_eq!(client.total_price(&cart_id).await, Ok(Decimal::new(550, 2)));

    assert_eq!(client.remove_item(&cart_id, "burger", vec![cheese()]).await, Ok(Some(0)));
    assert!(client.items(&cart_id).await.unwrap().is_empty());

    assert_eq!(client.remove_item(&cart_id, "burger", vec![cheese()]).await, Ok(None));

    system.shutdown().await.expect("Failed to shutdown system");
}

/// Carts are independent of each other and addressed by id.
#[tokio::test]
async fn test_separate_carts() {
    let system = CartSystem::new(CartConfig::default());
    let client = &system.cart_client;

    let first = client.open_cart().await.unwrap();
    let second = client.open_cart().await.unwrap();
    assert_ne!(first, second);

    client.add_items(&first, burger(), vec![bacon(), cheese()], 3).await.unwrap();
    client.add_item(&second, burger(), vec![]).await.unwrap();

    assert_eq!(client.total_items(&first).await, Ok(3));
    assert_eq!(client.total_items(&second).await, Ok(1));
    assert_eq!(client.total_price(&first).await, Ok(Decimal::new(2100, 2)));

    client.close_cart(&second).await.unwrap();
    assert_eq!(
        client.total_items(&second).await,
        Err(CartError::NotFound(second.clone()))
    );
    assert_eq!(client.close_cart(&second).await, Err(CartError::NotFound(second)));

    system.shutdown().await.unwrap();
}

/// Checkout reads the lines, then clears the cart.
#[tokio::test]
async fn test_checkout_flow_with_menu_items() {
    let config = CartConfig {
        project_id: "proj42".into(),
        ..CartConfig::default()
    };
    let system = CartSystem::new(config);
    let client = &system.cart_client;
    let project_id = system.config().project_id.clone();

    let pizza = MenuItem {
        id: "menu_pizza".into(),
        name: "Pizza".into(),
        price: Decimal::new(1200, 2),
        image_url: "https://cdn.example.com/pizza".into(),
        description: "Stone baked".into(),
        calories: Some(900),
        protein: Some(35),
        rating: Some(Decimal::new(45, 1)),
        kind: Some("pizza".into()),
    };

    let cart_id = client.open_cart().await.unwrap();
    client
        .add_items(&cart_id, pizza.to_cart_item(&project_id), vec![], 2)
        .await
        .unwrap();

    let lines = client.items(&cart_id).await.unwrap();
    assert_eq!(lines[0].image_url, "https://cdn.example.com/pizza?project=proj42");
    assert_eq!(lines[0].line_total(), Decimal::new(2400, 2));

    assert_eq!(client.clear_cart(&cart_id).await, Ok(1));
    assert_eq!(
        client.totals(&cart_id).await,
        Ok(CartTotals {
            items: 0,
            price: Decimal::ZERO,
        })
    );

    system.shutdown().await.unwrap();
}

/// A saved snapshot can be restored; bad snapshots are rejected.
#[tokio::test]
async fn test_restore_from_snapshot() {
    let system = CartSystem::new(CartConfig::default());
    let client = &system.cart_client;

    let original = client.open_cart().await.unwrap();
    client.add_items(&original, burger(), vec![cheese(), bacon()], 2).await.unwrap();
    let snapshot = client.items(&original).await.unwrap();

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored_lines = serde_json::from_str(&json).unwrap();
    let restored = client.restore_cart(restored_lines).await.unwrap();

    assert_eq!(client.items(&restored).await.unwrap(), snapshot);
    assert_eq!(
        client.increase_quantity(&restored, "burger", vec![bacon(), cheese()]).await,
        Ok(Some(3))
    );

    let mut broken = snapshot.clone();
    broken[0].quantity = 0;
    let result = client.restore_cart(broken).await;
    assert!(matches!(result, Err(CartError::InvalidSnapshot(_))));

    system.shutdown().await.unwrap();
}
