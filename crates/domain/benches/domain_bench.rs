use common::{ItemId, Money};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    ItemService, LineItem, OrderService, OrderTotals, PlaceOrder, ReviseOrder, SaveItem,
};
use store::InMemoryStore;

fn lines(item_id: ItemId, count: usize) -> Vec<LineItem> {
    (0..count)
        .map(|i| LineItem {
            item_id,
            quantity: (i % 4) as i32 + 1,
            price_at_order: Money::from_cents(1000),
        })
        .collect()
}

fn seeded() -> (tokio::runtime::Runtime, OrderService<InMemoryStore>, ItemId) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new();
    let items = ItemService::new(store.clone());
    let item_id = rt.block_on(async {
        items
            .create_item(SaveItem::new("Margherita", Money::from_cents(1000)))
            .await
            .unwrap()
            .id
    });
    (rt, OrderService::new(store), item_id)
}

fn bench_totals(c: &mut Criterion) {
    c.bench_function("domain/order_totals", |b| {
        b.iter(|| OrderTotals::from_subtotal(std::hint::black_box(Money::from_cents(123_456))));
    });
}

fn bench_create_order(c: &mut Criterion) {
    let (rt, orders, item_id) = seeded();

    c.bench_function("domain/create_order_10_lines", |b| {
        b.iter(|| {
            rt.block_on(async {
                orders
                    .create_order(PlaceOrder::new(
                        "Bench",
                        "",
                        Money::from_cents(10_000),
                        lines(item_id, 10),
                    ))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_update_order(c: &mut Criterion) {
    let (rt, orders, item_id) = seeded();
    let order_id = rt.block_on(async {
        orders
            .create_order(PlaceOrder::new(
                "Bench",
                "",
                Money::from_cents(10_000),
                lines(item_id, 10),
            ))
            .await
            .unwrap()
    });

    c.bench_function("domain/replace_order_10_lines", |b| {
        b.iter(|| {
            rt.block_on(async {
                orders
                    .update_order(ReviseOrder::new(
                        order_id,
                        "Bench",
                        "",
                        Money::from_cents(10_000),
                        lines(item_id, 10),
                    ))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_totals, bench_create_order, bench_update_order);
criterion_main!(benches);
