use std::collections::HashSet;

use proptest::prelude::*;
use whatsapp_storefront::{
    cart::{Cart, CartIntent, apply},
    models::ProductSnapshot,
};

fn arb_intent() -> impl Strategy<Value = CartIntent> {
    let id = prop::sample::select(vec!["p1", "p2", "p3", "p4"]);
    prop_oneof![
        (id.clone(), 0u64..10_000, -3i64..6).prop_map(|(id, price, increment_by)| {
            CartIntent::Add {
                product: ProductSnapshot::new(id, format!("Product {id}"), price),
                vendor: None,
                increment_by,
            }
        }),
        (id.clone(), -5i64..8).prop_map(|(id, quantity)| CartIntent::SetQuantity {
            product_id: id.to_string(),
            quantity,
        }),
        id.prop_map(|id| CartIntent::Remove {
            product_id: id.to_string(),
        }),
    ]
}

fn run(intents: Vec<CartIntent>) -> Cart {
    intents.into_iter().fold(Cart::new(), |cart, intent| {
        // Rejected intents leave the cart as it was.
        apply(&cart, intent).unwrap_or(cart)
    })
}

proptest! {
    #[test]
    fn product_ids_stay_unique(intents in prop::collection::vec(arb_intent(), 0..40)) {
        let cart = run(intents);
        let ids: HashSet<&str> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        prop_assert_eq!(ids.len(), cart.len());
    }

    #[test]
    fn quantities_stay_positive(intents in prop::collection::vec(arb_intent(), 0..40)) {
        let cart = run(intents);
        prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn total_matches_external_sum(intents in prop::collection::vec(arb_intent(), 0..40)) {
        let cart = run(intents);
        let expected: u64 = cart
            .lines()
            .iter()
            .map(|l| l.product.price * u64::from(l.quantity))
            .sum();
        prop_assert_eq!(cart.total(), expected);
    }

    #[test]
    fn remove_and_set_quantity_are_idempotent(
        intents in prop::collection::vec(arb_intent(), 0..20),
        quantity in -3i64..6,
    ) {
        let cart = run(intents);

        let once = apply(&cart, CartIntent::Remove { product_id: "p1".into() }).unwrap();
        let twice = apply(&once, CartIntent::Remove { product_id: "p1".into() }).unwrap();
        prop_assert_eq!(&once, &twice);

        let set = CartIntent::SetQuantity { product_id: "p2".into(), quantity };
        let once = apply(&cart, set.clone());
        let twice = once.clone().and_then(|c| apply(&c, set));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn persisted_form_round_trips(intents in prop::collection::vec(arb_intent(), 0..40)) {
        let cart = run(intents);
        let json = serde_json::to_string(&cart).unwrap();
        let decoded: Cart = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, cart);
    }
}
