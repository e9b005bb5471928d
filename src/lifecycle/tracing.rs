//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the actor tags its
//! events with `entity_type` instead.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle** at `info`: start, cart opened/closed, shutdown with final size
//! - **Requests** at `debug`: every Create/Get/Action/Watch with its payload
//! - **Failures** at `warn`: unknown cart ids, rejected snapshots
//! - **Client calls**: one span per `CartClient` method (`add_items`, `clear_cart`, ...)
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run
//! RUST_LOG=food_cart::framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a single add looks like:
//!
//! ```text
//! DEBUG add_items{cart_id="cart_1" count=2 item_id=burger}: Sending request
//! DEBUG Action entity_type="Cart" id=cart_1 action=Add { item: NewCartItem { .. }, customizations: [..], count: 2 }
//! DEBUG Added item_id=burger quantity=2
//! DEBUG Cart state lines=1 items=2
//! DEBUG Action ok entity_type="Cart" id=cart_1 published=true
//! ```

/// Installs the global subscriber. Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
