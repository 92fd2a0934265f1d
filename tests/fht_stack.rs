use kwht::fht::{fht, fht_inplace_stack, ifht_inplace_stack, FhtError};

// The stack-only variant must agree with the allocating engine.
#[test]
fn stack_matches_allocating_engine() {
    let input = [1.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
    let mut stack_out = [0.0f32; 8];
    let mut heap_out = [0.0f32; 8];

    fht_inplace_stack(&input, &mut stack_out, false).unwrap();
    fht(&mut heap_out, &input, false).unwrap();
    assert_eq!(stack_out, heap_out);

    fht_inplace_stack(&input, &mut stack_out, true).unwrap();
    fht(&mut heap_out, &input, true).unwrap();
    for (a, b) in stack_out.iter().zip(heap_out.iter()) {
        assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
    }
}

#[test]
fn stack_matches_engine_larger_size() {
    let mut input = [0.0f32; 32];
    for (i, v) in input.iter_mut().enumerate() {
        *v = ((i * 5 % 11) as f32) - 5.0;
    }
    let mut stack_out = [0.0f32; 32];
    let mut heap_out = [0.0f32; 32];
    fht_inplace_stack(&input, &mut stack_out, false).unwrap();
    fht(&mut heap_out, &input, false).unwrap();
    assert_eq!(stack_out, heap_out);
}

#[test]
fn stack_roundtrip() {
    let input = [2.0f32, -4.0, 8.0, 1.0, 0.5, 0.0, -1.0, 3.0];
    let mut forward = [0.0f32; 8];
    let mut back = [0.0f32; 8];
    fht_inplace_stack(&input, &mut forward, false).unwrap();
    ifht_inplace_stack(&forward, &mut back, false).unwrap();
    for (a, b) in input.iter().zip(back.iter()) {
        assert!((a - b).abs() < 1e-5, "{} vs {}", a, b);
    }
}

#[test]
fn stack_unitary_involution() {
    let input = [2.0f32, -4.0, 8.0, 1.0, 0.5, 0.0, -1.0, 3.0];
    let mut once = [0.0f32; 8];
    let mut twice = [0.0f32; 8];
    fht_inplace_stack(&input, &mut once, true).unwrap();
    fht_inplace_stack(&once, &mut twice, true).unwrap();
    for (a, b) in input.iter().zip(twice.iter()) {
        assert!((a - b).abs() < 1e-5, "{} vs {}", a, b);
    }
}

#[test]
fn stack_rejects_non_power_of_two() {
    let input = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
    let mut out = [0.0f32; 6];
    assert_eq!(
        fht_inplace_stack(&input, &mut out, false).unwrap_err(),
        FhtError::InvalidLength
    );
    assert_eq!(
        ifht_inplace_stack(&input, &mut out, false).unwrap_err(),
        FhtError::InvalidLength
    );
}
