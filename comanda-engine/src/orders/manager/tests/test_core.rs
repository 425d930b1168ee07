use super::*;
use shared::order::{CommandErrorCode, OrderEventType};

#[test]
fn test_open_order() {
    let fx = create_test_fixture();

    let response = fx.manager.execute_command(fx.open_cmd());

    assert!(response.success);
    assert!(response.order_id.is_some());

    let order_id = response.order_id.unwrap();
    let snapshot = fx.manager.get_snapshot(&order_id).unwrap();
    assert_eq!(snapshot.status, OrderStatus::Pending);
    assert_eq!(snapshot.table_id, fx.table_id);
    assert_eq!(snapshot.table_number, "T1");
    assert_eq!(snapshot.total_amount, 0.0);
    assert!(snapshot.order_number.starts_with("ORD-"));

    // Opening occupies the table
    assert_eq!(fx.table_status(), TableStatus::Occupied);
}

#[test]
fn test_idempotency() {
    let fx = create_test_fixture();
    let cmd = fx.open_cmd();

    let response1 = fx.manager.execute_command(cmd.clone());
    assert!(response1.success);

    // Execute same command again
    let response2 = fx.manager.execute_command(cmd);
    assert!(response2.success);
    assert_eq!(response2.order_id, None); // Duplicate returns no order_id

    // Should still only have one order
    assert_eq!(fx.manager.get_active_orders().len(), 1);
}

#[test]
fn test_add_lines_reconciles_total() {
    let fx = create_test_fixture();
    let order_id = fx.open_order();

    // 2 × 600 + 2 × 150 = 1500
    let response = fx
        .manager
        .execute_command(fx.add_lines_cmd(&order_id, &[(fx.salad_id, 2), (fx.juice_id, 2)]));
    assert!(response.success, "{:?}", response.error);

    let snapshot = fx.manager.get_snapshot(&order_id).unwrap();
    assert_eq!(snapshot.lines.len(), 2);
    assert_eq!(snapshot.total_amount, 1500.0);
    assert_eq!(fx.manager.order_total(&order_id).unwrap(), 1500.0);
    assert_eq!(fx.manager.order_lines(&order_id).unwrap().len(), 2);
}

#[test]
fn test_unit_price_is_frozen_at_order_time() {
    let fx = create_test_fixture();
    let order_id = fx.open_order();

    fx.manager
        .execute_command(fx.add_lines_cmd(&order_id, &[(fx.salad_id, 1)]));

    // Catalog price changes after the line was created
    fx.catalog
        .update_menu_item(
            fx.salad_id,
            shared::models::MenuItemUpdate {
                price: Some(999.0),
                ..Default::default()
            },
        )
        .unwrap();

    let snapshot = fx.manager.get_snapshot(&order_id).unwrap();
    assert_eq!(snapshot.lines[0].unit_price, 600.0);
    assert_eq!(snapshot.total_amount, 600.0);

    // A new line picks up the new price and must not merge with the old one
    fx.manager
        .execute_command(fx.add_lines_cmd(&order_id, &[(fx.salad_id, 1)]));
    let snapshot = fx.manager.get_snapshot(&order_id).unwrap();
    assert_eq!(snapshot.lines.len(), 2);
    assert_eq!(snapshot.total_amount, 1599.0);
}

#[test]
fn test_same_item_merges_into_one_line() {
    let fx = create_test_fixture();
    let order_id = fx.open_order();

    fx.manager
        .execute_command(fx.add_lines_cmd(&order_id, &[(fx.juice_id, 1)]));
    fx.manager
        .execute_command(fx.add_lines_cmd(&order_id, &[(fx.juice_id, 2)]));

    let snapshot = fx.manager.get_snapshot(&order_id).unwrap();
    assert_eq!(snapshot.lines.len(), 1);
    assert_eq!(snapshot.lines[0].quantity, 3);
    assert_eq!(snapshot.total_amount, 450.0);
}

#[test]
fn test_insufficient_payment_rejected() {
    let fx = create_test_fixture();
    let order_id = fx.open_order();
    fx.manager
        .execute_command(fx.add_lines_cmd(&order_id, &[(fx.salad_id, 2), (fx.juice_id, 2)]));

    let response = fx.manager.execute_command(fx.pay_cmd(&order_id, 1000.0));
    assert!(!response.success);
    assert_eq!(
        response.error.unwrap().code,
        CommandErrorCode::InsufficientPayment
    );

    // Nothing moved: order still open, table still occupied
    let snapshot = fx.manager.get_snapshot(&order_id).unwrap();
    assert_eq!(snapshot.status, OrderStatus::Pending);
    assert!(snapshot.payment.is_none());
    assert_eq!(fx.table_status(), TableStatus::Occupied);
}

#[test]
fn test_exact_payment_settles_and_frees_table() {
    let fx = create_test_fixture();
    let order_id = fx.open_order();
    fx.manager
        .execute_command(fx.add_lines_cmd(&order_id, &[(fx.salad_id, 2), (fx.juice_id, 2)]));

    let response = fx.manager.execute_command(fx.pay_cmd(&order_id, 1500.0));
    assert!(response.success, "{:?}", response.error);

    let snapshot = fx.manager.get_snapshot(&order_id).unwrap();
    assert_eq!(snapshot.status, OrderStatus::Paid);
    assert!(snapshot.end_time.is_some());
    let payment = snapshot.payment.unwrap();
    assert_eq!(payment.amount, 1500.0);
    assert_eq!(payment.change, 0.0);

    // Paid releases the table and removes the order from the active set
    assert_eq!(fx.table_status(), TableStatus::Available);
    assert!(fx.manager.get_active_orders().is_empty());
}

#[test]
fn test_set_status_to_paid_frees_table() {
    let fx = create_test_fixture();
    let order_id = fx.open_order();

    let response = fx
        .manager
        .execute_command(fx.set_status_cmd(&order_id, OrderStatus::Paid));
    assert!(response.success);
    assert_eq!(fx.table_status(), TableStatus::Available);
}

#[test]
fn test_non_paid_status_changes_leave_table_alone() {
    let fx = create_test_fixture();
    let order_id = fx.open_order();

    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
    ] {
        let response = fx
            .manager
            .execute_command(fx.set_status_cmd(&order_id, status));
        assert!(response.success);
        assert_eq!(fx.table_status(), TableStatus::Occupied);
    }
}

#[test]
fn test_events_carry_monotonic_sequences() {
    let fx = create_test_fixture();
    let order_id = fx.open_order();
    fx.manager
        .execute_command(fx.add_lines_cmd(&order_id, &[(fx.salad_id, 1)]));
    fx.manager.execute_command(fx.pay_cmd(&order_id, 600.0));

    let events = fx.manager.get_events_for_order(&order_id);
    // OrderOpened, LinesAdded, PaymentProcessed, StatusChanged
    assert_eq!(events.len(), 4);
    for pair in events.windows(2) {
        assert!(pair[0].sequence < pair[1].sequence);
    }
    assert_eq!(fx.manager.get_current_sequence(), 4);
    assert_eq!(fx.manager.get_events_since(2).len(), 2);
}

#[test]
fn test_event_broadcast() {
    let fx = create_test_fixture();
    let mut rx = fx.manager.subscribe();

    let order_id = fx.open_order();

    let event = rx.try_recv().expect("broadcast event");
    assert_eq!(event.order_id, order_id);
    assert_eq!(event.event_type, OrderEventType::OrderOpened);
}
