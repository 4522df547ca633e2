use crate::matrix::{BitMatrix, empty_row};

fn chain(size: usize) -> BitMatrix {
    let mut m = BitMatrix::new(size);
    for i in 0..size - 1 {
        m.set(i, i + 1);
    }
    m
}

#[test]
fn new_matrix_is_empty() {
    let m = BitMatrix::new(3);
    assert_eq!(m.size(), 3);
    assert_eq!(m.count(), 0);
    assert!(!m.at(1, 2));
}

#[test]
fn set_and_read_back() {
    let mut m = BitMatrix::new(3);
    m.set(0, 2);
    assert!(m.at(0, 2));
    assert!(!m.at(2, 0));
    assert_eq!(m.row(0).iter_set_bits(..).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn column_collects_rows() {
    let mut m = BitMatrix::new(4);
    m.set(0, 3);
    m.set(2, 3);
    let col = m.column(3);
    assert_eq!(col.iter_set_bits(..).collect::<Vec<_>>(), vec![0, 2]);
}

#[test]
fn closure_of_chain_reaches_forward_only() {
    let c = chain(4).closure();
    insta::assert_snapshot!(format!("{:?}", c), @r"
    .111
    ..11
    ...1
    ....
    ");
}

#[test]
fn closure_detects_cycle() {
    let mut m = chain(3);
    m.set(2, 0);
    let c = m.closure();
    for i in 0..3 {
        assert!(c.at(i, i), "{i} should reach itself");
    }
}

#[test]
fn closure_is_idempotent() {
    let mut m = chain(5);
    m.set(3, 1);
    let once = m.closure();
    let twice = once.closure();
    assert_eq!(once, twice);
}

#[test]
fn empty_row_has_requested_length() {
    let row = empty_row(70);
    assert_eq!(row.len(), 70);
    assert_eq!(row.iter_set_bits(..).count(), 0);
}
