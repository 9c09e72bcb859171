//! Randomised operation sequences against the cart.
//!
//! Each sequence is replayed against a plain `(id, quantity)` model; after every
//! step the cart must agree with the model, hold one line per id, and report
//! totals equal to the sums over its own lines.

use proptest::prelude::*;

use storefront_cart::{
    cart::Cart,
    products::{Product, ProductId},
    storage::MemoryStorage,
};

const PRODUCT_COUNT: usize = 5;

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    SetQuantity(usize, u32),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..PRODUCT_COUNT).prop_map(Op::Add),
        1 => (0..PRODUCT_COUNT).prop_map(Op::Remove),
        2 => ((0..PRODUCT_COUNT), 0_u32..20).prop_map(|(i, q)| Op::SetQuantity(i, q)),
        1 => Just(Op::Clear),
    ]
}

fn products(prices: &[u64]) -> Vec<Product> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| Product::new(format!("p{i}"), format!("Product {i}"), price))
        .collect()
}

/// Catalog of `PRODUCT_COUNT` products with every optional field randomly set or absent.
fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(
        (
            0_u64..1_000_000,
            prop::option::of("[a-z0-9/._-]{1,24}"),
            prop::option::of("[ -~]{0,40}"),
            prop::option::of("[A-Za-z ]{1,12}"),
            prop::option::of(0_u32..100),
        ),
        PRODUCT_COUNT,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (price, image, description, category, stock))| Product {
                image,
                description,
                category,
                stock,
                ..Product::new(format!("p{i}"), format!("Product {i}"), price)
            })
            .collect()
    })
}

fn apply_model(model: &mut Vec<(ProductId, u32)>, op: &Op) {
    match *op {
        Op::Add(i) => {
            let id = ProductId::new(format!("p{i}"));
            match model.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, quantity)) => *quantity += 1,
                None => model.push((id, 1)),
            }
        }
        Op::Remove(i) => {
            let id = ProductId::new(format!("p{i}"));
            model.retain(|(existing, _)| *existing != id);
        }
        Op::SetQuantity(i, quantity) => {
            let id = ProductId::new(format!("p{i}"));
            if quantity == 0 {
                model.retain(|(existing, _)| *existing != id);
            } else if let Some((_, current)) = model.iter_mut().find(|(existing, _)| *existing == id) {
                *current = quantity;
            }
        }
        Op::Clear => model.clear(),
    }
}

fn apply_cart(cart: &mut Cart, catalog: &[Product], op: &Op) {
    match *op {
        Op::Add(i) => {
            if let Some(product) = catalog.get(i) {
                cart.add_item(product);
            }
        }
        Op::Remove(i) => cart.remove_item(&ProductId::new(format!("p{i}"))),
        Op::SetQuantity(i, quantity) => {
            cart.set_quantity(&ProductId::new(format!("p{i}")), quantity);
        }
        Op::Clear => cart.clear(),
    }
}

proptest! {
    #[test]
    fn totals_match_line_sums(
        prices in prop::collection::vec(0_u64..1_000_000, PRODUCT_COUNT),
        ops in prop::collection::vec(arb_op(), 0..60),
    ) {
        let catalog = products(&prices);
        let mut cart = Cart::new(MemoryStorage::new());
        let mut model = Vec::new();

        for op in &ops {
            apply_cart(&mut cart, &catalog, op);
            apply_model(&mut model, op);

            let lines: Vec<(ProductId, u32)> = cart
                .items()
                .iter()
                .map(|item| (item.id().clone(), item.quantity().get()))
                .collect();

            prop_assert_eq!(&lines, &model, "cart diverged from model after {:?}", op);

            let expected_amount: u64 = cart
                .items()
                .iter()
                .map(|item| item.price() * u64::from(item.quantity().get()))
                .sum();
            let expected_count: u64 = cart
                .items()
                .iter()
                .map(|item| u64::from(item.quantity().get()))
                .sum();

            prop_assert_eq!(cart.total_amount(), expected_amount);
            prop_assert_eq!(cart.total_item_count(), expected_count);
        }
    }

    #[test]
    fn repeated_adds_aggregate(n in 1_u32..50) {
        let mut cart = Cart::new(MemoryStorage::new());
        let product = Product::new("a", "A", 1_000);

        for _ in 0..n {
            cart.add_item(&product);
        }

        prop_assert_eq!(cart.len(), 1);
        prop_assert_eq!(cart.items().first().map(|item| item.quantity().get()), Some(n));
    }

    #[test]
    fn clear_always_empties(ops in prop::collection::vec(arb_op(), 0..30)) {
        let catalog = products(&[100, 200, 300, 400, 500]);
        let mut cart = Cart::new(MemoryStorage::new());

        for op in &ops {
            apply_cart(&mut cart, &catalog, op);
        }

        cart.clear();

        prop_assert!(cart.is_empty());
        prop_assert_eq!(cart.total_item_count(), 0);
        prop_assert_eq!(cart.total_amount(), 0);
    }

    #[test]
    fn reload_restores_identical_lines(
        catalog in arb_catalog(),
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        let mut cart = Cart::new(MemoryStorage::new());

        for op in &ops {
            apply_cart(&mut cart, &catalog, op);
        }

        let restored = Cart::load(cart.storage().clone());

        prop_assert_eq!(restored.items(), cart.items());
    }
}
