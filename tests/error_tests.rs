use stridevec::{AllocError, BudgetAllocator, GrowthPolicy, StrideVec, StrideVecError};

#[test]
fn test_zero_element_size() {
    let expected = StrideVecError::InvalidArgument {
        reason: "element size must be non-zero",
    };
    assert_eq!(StrideVec::new(0, 4).unwrap_err(), expected);

    let mut buffer = [0u8; 8];
    assert_eq!(
        StrideVec::with_buffer(0, &mut buffer).unwrap_err(),
        expected
    );
}

#[test]
fn test_buffer_too_small_for_one_element() {
    let mut buffer = [0u8; 3];
    assert!(matches!(
        StrideVec::with_buffer(4, &mut buffer),
        Err(StrideVecError::InvalidArgument { .. })
    ));

    let mut empty: [u8; 0] = [];
    assert!(StrideVec::with_buffer(1, &mut empty).is_err());
}

#[test]
fn test_invalid_policy_parameters() {
    assert!(matches!(
        StrideVec::with_allocator(4, 4, &stridevec::Global, 0.9, 0.25),
        Err(StrideVecError::InvalidArgument { .. })
    ));
    assert!(matches!(
        StrideVec::with_allocator(4, 4, &stridevec::Global, 2.0, 1.01),
        Err(StrideVecError::InvalidArgument { .. })
    ));
    assert!(GrowthPolicy::new(f32::NAN, 0.5).is_err());
}

#[test]
fn test_wrong_element_length() {
    let mut vec = StrideVec::new(4, 4).unwrap();
    vec.push(&[0; 4]).unwrap();

    assert!(matches!(
        vec.push(&[0; 3]),
        Err(StrideVecError::InvalidArgument { .. })
    ));
    assert!(matches!(
        vec.insert(0, &[0; 5]),
        Err(StrideVecError::InvalidArgument { .. })
    ));
    assert!(matches!(
        vec.set(0, &[]),
        Err(StrideVecError::InvalidArgument { .. })
    ));
    assert!(matches!(
        vec.insert_many(0, &[0; 6]),
        Err(StrideVecError::InvalidArgument { .. })
    ));
    assert!(matches!(
        vec.insert_many(0, &[]),
        Err(StrideVecError::InvalidArgument { .. })
    ));
    assert_eq!(vec.len(), 1);
}

#[test]
fn test_delete_zero_count() {
    let mut vec = StrideVec::new(1, 4).unwrap();
    vec.push(b"a").unwrap();
    assert!(matches!(
        vec.delete_many(0, 0),
        Err(StrideVecError::InvalidArgument { .. })
    ));
    assert_eq!(vec.len(), 1);
}

#[test]
fn test_out_of_range_accesses() {
    let mut vec = StrideVec::new(1, 4).unwrap();
    vec.insert_many(0, b"ab").unwrap();

    let at_two = StrideVecError::OutOfRange {
        index: 2,
        count: 1,
        size: 2,
    };
    assert_eq!(vec.get(2).unwrap_err(), at_two);
    assert_eq!(vec.get_mut(2).unwrap_err(), at_two);
    assert_eq!(vec.set(2, b"x").unwrap_err(), at_two);
    assert_eq!(vec.delete(2).unwrap_err(), at_two);

    assert!(matches!(
        vec.insert(3, b"x"),
        Err(StrideVecError::OutOfRange { index: 3, .. })
    ));
    assert!(matches!(
        vec.emplace_at(3),
        Err(StrideVecError::OutOfRange { index: 3, .. })
    ));
    assert!(vec.delete_many(1, usize::MAX).is_err());
    assert_eq!(vec.as_bytes(), b"ab");
}

#[test]
fn test_pop_empty_vector() {
    let mut vec = StrideVec::new(1, 1).unwrap();
    assert_eq!(
        vec.pop().unwrap_err(),
        StrideVecError::OutOfRange {
            index: 0,
            count: 1,
            size: 0
        }
    );
}

#[test]
fn test_capacity_overflow() {
    let err = StrideVec::new(usize::MAX, 2).unwrap_err();
    assert_eq!(
        err,
        StrideVecError::Allocation(AllocError::CapacityOverflow {
            element_size: usize::MAX,
            capacity: 2
        })
    );
}

#[test]
fn test_budget_exhaustion_is_reported() {
    let budget = BudgetAllocator::new(4);
    assert_eq!(
        StrideVec::with_allocator(4, 2, &budget, 2.0, 0.25).unwrap_err(),
        StrideVecError::Allocation(AllocError::BudgetExceeded {
            requested: 8,
            remaining: 4
        })
    );
    assert_eq!(budget.used(), 0);
}

#[test]
fn test_failed_resize_keeps_size() {
    let budget = BudgetAllocator::new(16);
    let mut vec = StrideVec::with_allocator(4, 1, &budget, 2.0, 0.25).unwrap();
    vec.push(&[1; 4]).unwrap();

    assert!(vec.resize(10).is_err());
    assert_eq!(vec.len(), 1);
    assert_eq!(vec.capacity(), 1);
    assert!(vec.reserve(5).is_err());
    assert_eq!(vec.capacity(), 1);
}

#[test]
fn test_error_display() {
    let err = StrideVecError::OutOfRange {
        index: 5,
        count: 2,
        size: 3,
    };
    assert_eq!(
        err.to_string(),
        "Out of range: 2 element(s) at index 5 with vector length 3"
    );

    let err = StrideVecError::InsufficientBufferSize {
        required: 4,
        capacity: 3,
    };
    assert_eq!(
        err.to_string(),
        "Insufficient buffer size: 4 slots required, but only 3 available"
    );

    let err = StrideVecError::from(AllocError::OutOfMemory { requested: 64 });
    assert_eq!(
        err.to_string(),
        "Allocation failed: out of memory: 64 bytes requested"
    );

    let err = StrideVecError::Construction { reason: "bad" };
    assert_eq!(err.to_string(), "Element construction failed: bad");
}

#[test]
fn test_error_traits() {
    let err = StrideVecError::InvalidArgument { reason: "x" };
    let cloned = err.clone();
    assert_eq!(err, cloned);
    assert!(format!("{err:?}").contains("InvalidArgument"));

    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<StrideVecError>();
    assert_error::<AllocError>();
}
