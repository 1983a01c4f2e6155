//! Shared fixtures for integration tests

#![allow(dead_code)]

use listview::prelude::*;

/// 23 products; the seven whose name contains "lamp" have distinct prices
pub fn catalogue() -> Vec<Product> {
    let lamp_prices = [35.0, 12.5, 99.0, 48.0, 7.25, 60.0, 19.99];
    let mut products = Vec::new();
    let mut lamps = lamp_prices.iter();

    for i in 0..23 {
        let product = if i % 3 == 0 {
            match lamps.next() {
                Some(price) => Product::new(format!("p{i:02}"), format!("Desk Lamp {i}"))
                    .with_price(*price)
                    .with_category("lighting"),
                None => chair(i),
            }
        } else {
            chair(i)
        };
        products.push(product.with_stock((i % 4) as i64));
    }
    products
}

fn chair(i: usize) -> Product {
    Product::new(format!("p{i:02}"), format!("Chair {i}"))
        .with_price(100.0 + i as f64)
        .with_category("seating")
}

pub fn reviews() -> Vec<Review> {
    vec![
        Review::new("r1", "Great lamp").with_rating(5.0).with_user("Ada"),
        Review::new("r2", "Wobbly legs").with_rating(2.0).with_user("Grace"),
        Review::new("r3", "Fine").with_rating(3.0).with_user("Linus"),
    ]
}

/// An adapter over an in-memory store, already loaded
pub async fn loaded<T: ActionTarget>(store: &Arc<InMemoryDataSource<T>>) -> Arc<SourceAdapter<T>> {
    let source: Arc<dyn DataSource<T>> = store.clone();
    let adapter = Arc::new(SourceAdapter::new(source));
    adapter.refetch().await.unwrap();
    adapter
}

/// A runner wired to the store, reporting into a memory notifier
pub fn runner<T: ActionTarget>(
    store: &Arc<InMemoryDataSource<T>>,
    adapter: &Arc<SourceAdapter<T>>,
    notifier: &Arc<MemoryNotifier>,
) -> ActionRunner<T> {
    let actions: Arc<dyn ItemActions> = store.clone();
    let notifier: Arc<dyn Notifier> = notifier.clone();
    ActionRunner::new(adapter.clone(), actions, notifier)
}
