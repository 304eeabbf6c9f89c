//! Integration tests for DynamicVector construction, access and arithmetic.

use std::convert::TryFrom;
use std::ops::{Add, Mul};

use dynamic_matrix::{DynamicVector, LinalgError, Limits, MAX_VECTOR_SIZE};
use num_traits::Zero;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// String-backed element whose `+` and `*` are not commutative, used to pin
/// down accumulation order.
#[derive(Clone, Debug, Default, PartialEq)]
struct Word(String);

impl Word {
    fn new(s: &str) -> Self {
        Word(s.to_string())
    }
}

impl Add for Word {
    type Output = Word;

    fn add(self, rhs: Word) -> Word {
        Word(self.0 + &rhs.0)
    }
}

impl Mul for Word {
    type Output = Word;

    fn mul(self, rhs: Word) -> Word {
        Word(format!("({}{})", self.0, rhs.0))
    }
}

impl Zero for Word {
    fn zero() -> Self {
        Word(String::new())
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn can_create_vector_with_positive_length() {
    for size in [1usize, 2, 5, 100] {
        let v = DynamicVector::<i32>::new(size).unwrap();
        assert_eq!(v.size(), size);
    }
}

#[test]
fn new_vector_is_default_initialized() {
    let v = DynamicVector::<f64>::new(4).unwrap();
    assert!(v.iter().all(|x| *x == 0.0));
}

#[test]
fn default_vector_has_one_element() {
    let v: DynamicVector<i32> = DynamicVector::default();
    assert_eq!(v.size(), 1);
    assert_eq!(v[0], 0);
}

#[test]
fn zero_length_is_invalid_size() {
    init_logging();
    match DynamicVector::<i32>::new(0) {
        Err(LinalgError::InvalidSize { size, .. }) => assert_eq!(size, 0),
        other => panic!("expected InvalidSize, got {:?}", other),
    }
}

#[test]
fn too_large_vector_is_invalid_size() {
    match DynamicVector::<u8>::new(MAX_VECTOR_SIZE + 1) {
        Err(LinalgError::InvalidSize { size, max, .. }) => {
            assert_eq!(size, MAX_VECTOR_SIZE + 1);
            assert_eq!(max, MAX_VECTOR_SIZE);
        }
        other => panic!("expected InvalidSize, got {:?}", other),
    }
}

#[test]
fn custom_limits_bound_construction() {
    let limits = Limits::new(8, 4).unwrap();
    assert_eq!(DynamicVector::<i32>::with_limits(8, &limits).unwrap().size(), 8);
    assert!(matches!(
        DynamicVector::<i32>::with_limits(9, &limits),
        Err(LinalgError::InvalidSize { max: 8, .. })
    ));
}

#[test]
fn from_buffer_copies_prefix() {
    let buffer = [1, 2, 3, 4, 5];
    let v = DynamicVector::from_buffer(&buffer, 3).unwrap();
    assert_eq!(v.size(), 3);
    assert_eq!(v.into_vec(), vec![1, 2, 3]);
}

#[test]
fn from_short_buffer_is_contract_violation() {
    let buffer = [1, 2];
    let result = DynamicVector::from_buffer(&buffer, 3);
    assert!(matches!(result, Err(LinalgError::ContractViolation(_))));
}

#[test]
fn from_buffer_rejects_zero_length() {
    let buffer = [1, 2];
    let result = DynamicVector::from_buffer(&buffer, 0);
    assert!(matches!(result, Err(LinalgError::InvalidSize { .. })));
}

#[test]
fn try_from_vec_checks_length() {
    let v = DynamicVector::try_from(vec![1, 2, 3]).unwrap();
    assert_eq!(v.size(), 3);
    let empty: Result<DynamicVector<i32>, _> = DynamicVector::try_from(Vec::new());
    assert!(matches!(empty, Err(LinalgError::InvalidSize { .. })));
}

#[test]
fn from_vec_with_limits_uses_supplied_bound() {
    let limits = Limits::new(3, 3).unwrap();
    let v = DynamicVector::from_vec_with_limits(vec![1, 2, 3], &limits).unwrap();
    assert_eq!(v.size(), 3);
    assert!(matches!(
        DynamicVector::from_vec_with_limits(vec![1, 2, 3, 4], &limits),
        Err(LinalgError::InvalidSize { size: 4, max: 3, .. })
    ));
}

// ---------------------------------------------------------------------------
// Copy, assignment, swap
// ---------------------------------------------------------------------------

#[test]
fn copied_vector_is_equal_to_source() {
    let v = DynamicVector::try_from(vec![1, 2, 3]).unwrap();
    let copy = v.clone();
    assert_eq!(v, copy);
}

#[test]
fn copied_vector_has_its_own_memory() {
    let v = DynamicVector::try_from(vec![1, 2, 3]).unwrap();
    let mut copy = v.clone();
    copy[0] = 10;
    assert_eq!(v[0], 1);
    assert_eq!(copy[0], 10);
}

#[test]
fn can_assign_vector_to_itself() {
    let mut v = DynamicVector::try_from(vec![4, 5, 6]).unwrap();
    v = v.clone();
    assert_eq!(v.into_vec(), vec![4, 5, 6]);
}

#[test]
fn assign_changes_vector_size() {
    let source = DynamicVector::try_from(vec![1, 2, 3, 4]).unwrap();
    let mut target = DynamicVector::<i32>::new(2).unwrap();
    target.clone_from(&source);
    assert_eq!(target.size(), 4);
    assert_eq!(target, source);
}

#[test]
fn swap_exchanges_length_and_contents() {
    let mut a = DynamicVector::try_from(vec![1, 2]).unwrap();
    let mut b = DynamicVector::try_from(vec![7, 8, 9]).unwrap();
    a.swap(&mut b);
    assert_eq!(a.into_vec(), vec![7, 8, 9]);
    assert_eq!(b.into_vec(), vec![1, 2]);
}

// ---------------------------------------------------------------------------
// Indexing
// ---------------------------------------------------------------------------

#[test]
fn can_set_and_get_element() {
    let mut v = DynamicVector::<i32>::new(4).unwrap();
    v[2] = 42;
    *v.at_mut(3).unwrap() = 7;
    assert_eq!(v[2], 42);
    assert_eq!(*v.at(3).unwrap(), 7);
}

#[test]
fn at_rejects_index_equal_to_size() {
    let v = DynamicVector::<i32>::new(3).unwrap();
    match v.at(3) {
        Err(LinalgError::IndexOutOfRange { index, len }) => {
            assert_eq!(index, 3);
            assert_eq!(len, 3);
        }
        other => panic!("expected IndexOutOfRange, got {:?}", other),
    }
}

#[test]
fn at_rejects_negative_index_coerced_to_unsigned() {
    let mut v = DynamicVector::<i32>::new(3).unwrap();
    let index = -1i64 as usize;
    assert!(matches!(v.at(index), Err(LinalgError::IndexOutOfRange { .. })));
    assert!(matches!(v.at_mut(index), Err(LinalgError::IndexOutOfRange { .. })));
}

#[test]
#[should_panic(expected = "Index out of range")]
fn bracket_read_is_bounds_checked() {
    let v = DynamicVector::<i32>::new(3).unwrap();
    let _value = v[5];
}

#[test]
#[should_panic(expected = "Index out of range")]
fn bracket_write_is_bounds_checked() {
    let mut v = DynamicVector::<i32>::new(3).unwrap();
    v[3] = 1;
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

#[test]
fn compare_vector_with_itself_return_true() {
    let v = DynamicVector::try_from(vec![1, 2, 3]).unwrap();
    assert!(v == v);
}

#[test]
fn vectors_with_same_contents_are_equal() {
    let a = DynamicVector::from_buffer(&[1, 2, 3], 3).unwrap();
    let b = DynamicVector::try_from(vec![1, 2, 3]).unwrap();
    assert_eq!(a, b);
}

#[test]
fn vectors_with_different_size_are_not_equal() {
    let a = DynamicVector::<i32>::new(3).unwrap();
    let b = DynamicVector::<i32>::new(4).unwrap();
    assert_ne!(a, b);
}

// ---------------------------------------------------------------------------
// Scalar operations
// ---------------------------------------------------------------------------

#[test]
fn scalar_operations_leave_receiver_unchanged() {
    let v = DynamicVector::try_from(vec![1, 2, 3]).unwrap();
    assert_eq!(v.add_scalar(&1).into_vec(), vec![2, 3, 4]);
    assert_eq!(v.sub_scalar(&1).into_vec(), vec![0, 1, 2]);
    assert_eq!(v.mul_scalar(&3).into_vec(), vec![3, 6, 9]);
    assert_eq!(v.into_vec(), vec![1, 2, 3]);
}

#[test]
fn scalar_operators_match_named_methods() {
    let v = DynamicVector::try_from(vec![2.0f64, 4.0]).unwrap();
    assert_eq!(&v + 1.0f64, v.add_scalar(&1.0));
    assert_eq!(&v - 1.0f64, v.sub_scalar(&1.0));
    assert_eq!(&v * 0.5f64, v.mul_scalar(&0.5));
}

// ---------------------------------------------------------------------------
// Vector operations
// ---------------------------------------------------------------------------

#[test]
fn can_add_and_subtract_vectors_with_equal_size() {
    let a = DynamicVector::try_from(vec![1, 2, 3]).unwrap();
    let b = DynamicVector::try_from(vec![10, 20, 30]).unwrap();
    assert_eq!((&a + &b).unwrap().into_vec(), vec![11, 22, 33]);
    assert_eq!((&b - &a).unwrap().into_vec(), vec![9, 18, 27]);
}

#[test]
fn cant_add_or_subtract_vectors_with_not_equal_size() {
    init_logging();
    let a = DynamicVector::<i32>::new(3).unwrap();
    let b = DynamicVector::<i32>::new(4).unwrap();
    assert!(matches!(
        a.checked_add(&b),
        Err(LinalgError::SizeMismatch { lhs: 3, rhs: 4 })
    ));
    assert!(matches!(
        a.checked_sub(&b),
        Err(LinalgError::SizeMismatch { lhs: 3, rhs: 4 })
    ));
}

#[test]
fn dot_product_of_equal_size_vectors() {
    let a = DynamicVector::try_from(vec![1, 2, 3]).unwrap();
    let b = DynamicVector::try_from(vec![4, 5, 6]).unwrap();
    assert_eq!(a.dot(&b).unwrap(), 32);
    assert_eq!((&a * &b).unwrap(), 32);
}

#[test]
fn dot_product_requires_equal_size() {
    let a = DynamicVector::<i32>::new(2).unwrap();
    let b = DynamicVector::<i32>::new(5).unwrap();
    assert!(matches!(a.dot(&b), Err(LinalgError::SizeMismatch { .. })));
}

#[test]
fn dot_product_accumulates_in_index_order() {
    let a = DynamicVector::try_from(vec![Word::new("a"), Word::new("b"), Word::new("c")]).unwrap();
    let b = DynamicVector::try_from(vec![Word::new("x"), Word::new("y"), Word::new("z")]).unwrap();
    assert_eq!(a.dot(&b).unwrap(), Word::new("(ax)(by)(cz)"));
    assert_eq!(b.dot(&a).unwrap(), Word::new("(xa)(yb)(zc)"));
}
