//! Tests for capture classification and tray grouping.

use boardmirror::{
    classify_captures, tray_slots, CapturedPiece, PieceRole, Side, TRAY_SLOTS,
};

fn cap(side: Side, role: PieceRole) -> CapturedPiece {
    CapturedPiece { side, role }
}

#[test]
fn test_empty_input_yields_empty_trays() {
    let trays = classify_captures(&[]);
    assert!(trays.white().is_empty());
    assert!(trays.black().is_empty());
}

#[test]
fn test_splits_records_per_side() {
    let records = [
        cap(Side::White, PieceRole::Pawn),
        cap(Side::White, PieceRole::Pawn),
        cap(Side::Black, PieceRole::Knight),
    ];

    let trays = classify_captures(&records);
    assert_eq!(trays.white(), &[PieceRole::Pawn, PieceRole::Pawn]);
    assert_eq!(trays.black(), &[PieceRole::Knight]);
}

#[test]
fn test_output_ordering_is_input_order_insensitive() {
    let forward = [
        cap(Side::White, PieceRole::Pawn),
        cap(Side::White, PieceRole::Queen),
        cap(Side::White, PieceRole::Rook),
    ];
    let mut reversed = forward;
    reversed.reverse();

    assert_eq!(classify_captures(&forward), classify_captures(&reversed));
}

#[test]
fn test_roles_sort_by_display_priority() {
    let records = [
        cap(Side::Black, PieceRole::Pawn),
        cap(Side::Black, PieceRole::Queen),
        cap(Side::Black, PieceRole::Knight),
    ];

    let trays = classify_captures(&records);
    assert_eq!(
        trays.black(),
        &[PieceRole::Queen, PieceRole::Knight, PieceRole::Pawn]
    );
}

#[test]
fn test_tray_slots_stack_duplicates() {
    let roles = [PieceRole::Pawn, PieceRole::Knight, PieceRole::Pawn];
    let slots = tray_slots(&roles);

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].role, PieceRole::Knight);
    assert_eq!(slots[0].count, 1);
    assert_eq!(slots[1].role, PieceRole::Pawn);
    assert_eq!(slots[1].count, 2);
}

#[test]
fn test_tray_overflow_drops_lowest_priority_roles() {
    // All six roles captured: one more distinct role than the tray holds.
    let roles = [
        PieceRole::Pawn,
        PieceRole::King,
        PieceRole::Knight,
        PieceRole::Queen,
        PieceRole::Bishop,
        PieceRole::Rook,
    ];

    let slots = tray_slots(&roles);
    assert_eq!(slots.len(), TRAY_SLOTS);
    assert!(slots.iter().all(|s| s.role != PieceRole::Pawn));
    assert_eq!(slots[0].role, PieceRole::King);
    assert_eq!(slots[4].role, PieceRole::Knight);
}

#[test]
fn test_wire_record_round_trip() {
    let record = cap(Side::White, PieceRole::Pawn);
    let value = serde_json::to_value(record).expect("serialize failed");
    assert_eq!(value, serde_json::json!({"color": "w", "role": "P"}));

    let back: CapturedPiece = serde_json::from_value(value).expect("deserialize failed");
    assert_eq!(back, record);
}
