//! End-to-end scenarios over the gate engine, driven through the in-memory
//! host fakes.

use cartgate_core::{CartMode, CategoryId, ItemClass, LineItem, MethodId, ProductId, VariationId};
use cartgate_policy::{
    admission, AddDecision, Admission, CartCheck, Gate, Package, Severity, SessionStore,
};
use cartgate_settings::{ResolveMode, Settings};
use cartgate_test_utils::{MemoryCart, MemoryCatalog, MemorySession};
use cartgate_token::{parse_query, ClearAddPayload, ClearAddRequest, TokenKey};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeMap;

const CART_URL: &str = "https://shop.test/cart";

/// Root category 10 with child 11 and grandchild 12.
/// Product 1 sits in the root, product 3 in the child, product 4 in the
/// grandchild; product 20 is regular. Variation 7 belongs to product 20 and
/// records a color attribute.
fn catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog.add_child_category(10, 11);
    catalog.add_child_category(11, 12);
    catalog.assign_product(1, &[10]);
    catalog.assign_product(3, &[11]);
    catalog.assign_product(4, &[12]);
    catalog.assign_product(20, &[50]);
    catalog.add_variation(7, 20, &[("color", "red")]);
    catalog
}

fn settings() -> Settings {
    Settings {
        exclusive_category: CategoryId::new(10),
        method_a: MethodId::from("pickup:3"),
        method_b: MethodId::from("pickup:4"),
        ..Settings::default()
    }
}

fn key() -> TokenKey {
    TokenKey::new(*b"an-example-key-of-32-bytes-....!")
}

fn gate<'a>(catalog: &'a MemoryCatalog, settings: Settings) -> Gate<'a, MemoryCatalog> {
    Gate::new(catalog, settings, CART_URL, key())
}

fn exclusive_cart() -> Vec<LineItem> {
    vec![LineItem::simple(ProductId::new(1))]
}

fn no_attrs() -> BTreeMap<String, String> {
    BTreeMap::new()
}

fn rates(ids: &[&str]) -> IndexMap<MethodId, &'static str> {
    ids.iter().map(|id| (MethodId::from(*id), "rate")).collect()
}

#[test]
fn block_mode_denies_regular_add_into_exclusive_cart() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    let decision = gate.validate_add(
        &exclusive_cart(),
        ProductId::new(20),
        VariationId::NONE,
        1,
        &no_attrs(),
    );

    assert_eq!(decision, AddDecision::Deny);
    assert!(!decision.permitted());
    let notices = gate.notices().as_slice();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
}

#[test]
fn descendant_products_conflict_like_root_products() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    // cart holds a grandchild-category product; a regular add still conflicts
    let cart = vec![LineItem::simple(ProductId::new(4))];
    assert_eq!(gate.cart_mode(&cart), CartMode::ExclusiveOnly);

    let decision =
        gate.validate_add(&cart, ProductId::new(20), VariationId::NONE, 1, &no_attrs());
    assert_eq!(decision, AddDecision::Deny);
}

#[test]
fn exclusive_add_into_exclusive_cart_is_allowed() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    let decision = gate.validate_add(
        &exclusive_cart(),
        ProductId::new(3),
        VariationId::NONE,
        1,
        &no_attrs(),
    );

    assert_eq!(decision, AddDecision::Allow);
    assert!(gate.notices().is_empty());
}

#[test]
fn unconfigured_category_disables_admission_checks() {
    let catalog = catalog();
    let mut gate = gate(
        &catalog,
        Settings {
            exclusive_category: CategoryId::UNSET,
            ..settings()
        },
    );

    let decision = gate.validate_add(
        &exclusive_cart(),
        ProductId::new(20),
        VariationId::NONE,
        1,
        &no_attrs(),
    );

    assert_eq!(decision, AddDecision::Allow);
}

#[test]
fn clear_add_mode_offers_link_verifying_against_incoming_item() {
    let catalog = catalog();
    let mut gate = gate(
        &catalog,
        Settings {
            resolve_mode: ResolveMode::ClearAndAdd,
            ..settings()
        },
    );

    let decision = gate.validate_add(
        &exclusive_cart(),
        ProductId::new(20),
        VariationId::NONE,
        1,
        &no_attrs(),
    );

    let url = match decision {
        AddDecision::DenyWithReset { url } => url,
        other => panic!("expected a reset link, got {other:?}"),
    };

    let (base, query) = url.split_once('?').unwrap();
    assert_eq!(base, CART_URL);

    let request = ClearAddRequest::from_query(&parse_query(query)).unwrap();
    assert!(request.verify(&key()));
    assert_eq!(
        request.payload(),
        ClearAddPayload::new(ProductId::new(20), VariationId::NONE, 1, [])
    );

    // the blocking notice carries the remediation link
    let notices = gate.notices().as_slice();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains(&url));
}

#[test]
fn advisory_mode_allows_and_records_one_advisory() {
    let catalog = catalog();
    let mut gate = gate(
        &catalog,
        Settings {
            advisory: true,
            ..settings()
        },
    );

    let mut items = exclusive_cart();
    let decision =
        gate.validate_add(&items, ProductId::new(20), VariationId::NONE, 1, &no_attrs());

    assert_eq!(decision, AddDecision::AllowAdvised);
    assert!(decision.permitted());

    let notices = gate.notices().as_slice();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Advisory);
    assert!(notices[0].message.starts_with("Test mode:"));

    // the host commits the permitted mutation; the cart is now mixed
    items.push(LineItem::simple(ProductId::new(20)));
    assert_eq!(gate.cart_mode(&items), CartMode::Mixed);
}

#[test]
fn repeated_conflicts_emit_one_notice() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    for _ in 0..3 {
        let _ = gate.validate_add(
            &exclusive_cart(),
            ProductId::new(20),
            VariationId::NONE,
            1,
            &no_attrs(),
        );
    }

    assert_eq!(gate.notices().len(), 1);
}

#[test]
fn safety_net_blocks_mixed_cart() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    let mixed = vec![
        LineItem::simple(ProductId::new(1)),
        LineItem::simple(ProductId::new(20)),
    ];
    assert_eq!(gate.check_cart(&mixed), CartCheck::Blocked);

    let notices = gate.notices().as_slice();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
}

#[test]
fn safety_net_advises_in_advisory_mode() {
    let catalog = catalog();
    let mut gate = gate(
        &catalog,
        Settings {
            advisory: true,
            ..settings()
        },
    );

    let mixed = vec![
        LineItem::simple(ProductId::new(1)),
        LineItem::simple(ProductId::new(20)),
    ];
    assert_eq!(gate.check_cart(&mixed), CartCheck::Advised);
    assert_eq!(gate.notices().as_slice()[0].severity, Severity::Advisory);
}

#[test]
fn safety_net_passes_uniform_and_empty_carts() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    assert_eq!(gate.check_cart(&[]), CartCheck::Pass);
    assert_eq!(gate.check_cart(&exclusive_cart()), CartCheck::Pass);
    assert!(gate.notices().is_empty());
}

#[test]
fn absent_desired_rate_flags_and_leaves_everything_alone() {
    let catalog = catalog();
    let gate = gate(&catalog, settings());
    let mut session = MemorySession::new();

    // regular cart desires pickup:4, which is not offered
    let cart = vec![LineItem::simple(ProductId::new(20))];
    let packages = vec![Package::new(rates(&["pickup:3"]))];

    gate.sync_session(&cart, &packages, &mut session);
    assert!(session.missing_desired_rate());
    assert_eq!(session.chosen_method(0), None);

    let filtered = gate.filter_rates(&cart, rates(&["pickup:3"]), &mut session);
    let keys: Vec<&str> = filtered.keys().map(MethodId::as_str).collect();
    assert_eq!(keys, vec!["pickup:3"]);
}

#[test]
fn present_desired_rate_is_forced_and_competitor_hidden() {
    let catalog = catalog();
    let gate = gate(&catalog, settings());
    let mut session = MemorySession::new();

    let cart = vec![LineItem::simple(ProductId::new(20))];
    let packages = vec![Package::new(rates(&["pickup:3", "pickup:4"]))];

    gate.sync_session(&cart, &packages, &mut session);
    assert_eq!(session.chosen_method(0), Some(MethodId::from("pickup:4")));
    assert!(!session.missing_desired_rate());

    let filtered = gate.filter_rates(&cart, rates(&["pickup:3", "pickup:4"]), &mut session);
    let keys: Vec<&str> = filtered.keys().map(MethodId::as_str).collect();
    assert_eq!(keys, vec!["pickup:4"]);
}

#[test]
fn missing_rate_notice_fires_once_from_session_flag() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());
    let mut session = MemorySession::new();
    session.set_missing_desired_rate(true);

    let cart = vec![LineItem::simple(ProductId::new(20))];
    gate.missing_rate_notice(&cart, &session);
    gate.missing_rate_notice(&cart, &session);

    assert_eq!(gate.notices().len(), 1);
    assert_eq!(gate.notices().as_slice()[0].severity, Severity::Error);
}

#[test]
fn missing_rate_notice_requires_flag_and_configuration() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());
    let session = MemorySession::new();

    let cart = vec![LineItem::simple(ProductId::new(20))];
    gate.missing_rate_notice(&cart, &session);
    assert!(gate.notices().is_empty());
}

#[test]
fn clear_add_link_round_trips_through_the_handler() {
    let catalog = catalog();

    // a conflicting add in clear-and-add mode produces the link
    let mut gate = gate(
        &catalog,
        Settings {
            resolve_mode: ResolveMode::ClearAndAdd,
            ..settings()
        },
    );
    let decision = gate.validate_add(
        &exclusive_cart(),
        ProductId::new(20),
        VariationId::NONE,
        2,
        &no_attrs(),
    );
    let AddDecision::DenyWithReset { url } = decision else {
        panic!("expected a reset link");
    };

    // following the link clears the cart and adds the item
    let (_, query) = url.split_once('?').unwrap();
    let request = ClearAddRequest::from_query(&parse_query(query)).unwrap();
    let mut cart = MemoryCart::with_items(exclusive_cart());

    let redirect = gate.handle_clear_add(&request, &mut cart);

    assert_eq!(redirect.url, CART_URL);
    assert_eq!(cart.cleared, 1);
    assert_eq!(cart.items, vec![LineItem::new(ProductId::new(20), VariationId::NONE, 2)]);
    assert!(gate
        .notices()
        .as_slice()
        .iter()
        .any(|n| n.severity == Severity::Success));
}

#[test]
fn tampered_link_mutates_nothing() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    let payload = ClearAddPayload::new(ProductId::new(20), VariationId::NONE, 1, []);
    let url = cartgate_token::build_url(CART_URL, &payload, &key()).unwrap();
    let (_, query) = url.split_once('?').unwrap();

    let mut tampered = parse_query(query);
    tampered.insert("product_id".to_string(), "1".to_string());
    let request = ClearAddRequest::from_query(&tampered).unwrap();

    let mut cart = MemoryCart::with_items(exclusive_cart());
    let redirect = gate.handle_clear_add(&request, &mut cart);

    assert_eq!(redirect.url, CART_URL);
    assert_eq!(cart.cleared, 0);
    assert_eq!(cart.items, exclusive_cart());
    assert!(gate
        .notices()
        .as_slice()
        .iter()
        .any(|n| n.message.contains("expired")));
}

#[test]
fn attributeless_variation_add_retries_with_recorded_attributes() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    let payload = ClearAddPayload::new(ProductId::new(20), VariationId::new(7), 1, []);
    let url = cartgate_token::build_url(CART_URL, &payload, &key()).unwrap();
    let (_, query) = url.split_once('?').unwrap();
    let request = ClearAddRequest::from_query(&parse_query(query)).unwrap();

    let mut cart = MemoryCart::new();
    cart.reject_without_attributes(7);

    let _ = gate.handle_clear_add(&request, &mut cart);

    // first attempt without attributes failed, retry used the recorded ones
    assert_eq!(cart.attempts.len(), 2);
    assert!(cart.attempts[0].attributes.is_empty());
    assert_eq!(
        cart.attempts[1].attributes.get("color").map(String::as_str),
        Some("red")
    );
    assert_eq!(cart.items.len(), 1);
}

#[test]
fn failed_add_leaves_cart_empty_and_reports() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    // variation 9 is unknown to the catalog, so the retry has nothing to use
    let payload = ClearAddPayload::new(ProductId::new(20), VariationId::new(9), 1, []);
    let url = cartgate_token::build_url(CART_URL, &payload, &key()).unwrap();
    let (_, query) = url.split_once('?').unwrap();
    let request = ClearAddRequest::from_query(&parse_query(query)).unwrap();

    let mut cart = MemoryCart::with_items(exclusive_cart());
    cart.reject_without_attributes(9);

    let redirect = gate.handle_clear_add(&request, &mut cart);

    assert_eq!(redirect.url, CART_URL);
    assert_eq!(cart.cleared, 1);
    // the destructive clear precedes the add by contract
    assert!(cart.items.is_empty());
    assert!(gate
        .notices()
        .as_slice()
        .iter()
        .any(|n| n.severity == Severity::Error));
}

proptest! {
    /// The admission table allows exactly the empty-cart and
    /// matching-class combinations.
    #[test]
    fn admission_allows_only_empty_or_matching(
        mode in prop_oneof![
            Just(CartMode::Empty),
            Just(CartMode::ExclusiveOnly),
            Just(CartMode::RegularOnly),
            Just(CartMode::Mixed),
        ],
        incoming in prop_oneof![Just(ItemClass::Exclusive), Just(ItemClass::Regular)]
    ) {
        let verdict = admission(mode, incoming);
        let expected_allow =
            mode == CartMode::Empty || mode.uniform_class() == Some(incoming);

        if expected_allow {
            prop_assert_eq!(verdict, Admission::Allow);
        } else {
            prop_assert_eq!(verdict, Admission::Conflict);
        }
    }
}

#[test]
fn zero_product_request_is_rejected_before_clearing() {
    let catalog = catalog();
    let mut gate = gate(&catalog, settings());

    let payload = ClearAddPayload::new(ProductId::UNSET, VariationId::NONE, 1, []);
    let url = cartgate_token::build_url(CART_URL, &payload, &key()).unwrap();
    let (_, query) = url.split_once('?').unwrap();
    let request = ClearAddRequest::from_query(&parse_query(query)).unwrap();

    let mut cart = MemoryCart::with_items(exclusive_cart());
    let _ = gate.handle_clear_add(&request, &mut cart);

    assert_eq!(cart.cleared, 0);
    assert_eq!(cart.items, exclusive_cart());
}
