//! Basic usage example for kwht
//!
//! Transforms an 8-element sequence forward, twice, and back again in both
//! plain and unitary modes.

use kwht::fht::{fht, ifht, FhtPlan};

fn print_buf(name: &str, buf: &[f32]) {
    let rendered: Vec<String> = buf.iter().map(|v| format!("{:.3}", v)).collect();
    println!("   {:<14} [{}]", name, rendered.join(", "));
}

fn main() {
    println!("=== kwht Basic Usage Example ===\n");

    let x = [1.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
    let n = x.len();

    // 1. Plain (non-unitary) mode: HT(HT(x)) == N * x.
    println!("1. Plain transform");
    let mut ht = vec![0.0f32; n];
    let mut ht_ht = vec![0.0f32; n];
    let mut ht_iht = vec![0.0f32; n];
    fht(&mut ht, &x, false).unwrap();
    fht(&mut ht_ht, &ht, false).unwrap();
    ifht(&mut ht_iht, &ht, false).unwrap();
    print_buf("x:", &x);
    print_buf("HT(x):", &ht);
    print_buf("HT(HT(x)):", &ht_ht);
    print_buf("IHT(HT(x)):", &ht_iht);
    println!();

    // 2. Unitary mode: the transform is its own inverse.
    println!("2. Unitary transform");
    fht(&mut ht, &x, true).unwrap();
    fht(&mut ht_ht, &ht, true).unwrap();
    ifht(&mut ht_iht, &ht, true).unwrap();
    print_buf("x:", &x);
    print_buf("HT(x):", &ht);
    print_buf("HT(HT(x)):", &ht_ht);
    print_buf("IHT(HT(x)):", &ht_iht);
    println!();

    // 3. Reuse one plan for several transforms of the same length.
    println!("3. Plan reuse");
    let mut plan = FhtPlan::<f32>::new(n);
    let other = [8.0f32, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
    plan.fht(&mut ht, &x, false).unwrap();
    print_buf("HT(x):", &ht);
    plan.fht(&mut ht, &other, false).unwrap();
    print_buf("HT(other):", &ht);
}
