//! Benchmark example for kwht
//!
//! Times repeated transforms with and without a reused plan and reports
//! microseconds per iteration for each size.

use std::time::Instant;

use kwht::fht::{fht, FhtPlan};

fn main() {
    println!("=== kwht Benchmark Example ===\n");

    let sizes = [64usize, 256, 1024, 4096, 16384, 65536];
    let iterations = 1000;

    println!("Size\t\tplan (us/iter)\tstateless (us/iter)");
    println!("----\t\t--------------\t-------------------");

    for &size in &sizes {
        let input: Vec<f32> = (0..size).map(|i| ((i * 7 % 13) as f32) - 6.0).collect();
        let mut output = vec![0.0f32; size];

        // Warm up
        let mut plan = FhtPlan::<f32>::new(size);
        for _ in 0..10 {
            plan.fht(&mut output, &input, false).unwrap();
        }

        let start = Instant::now();
        for _ in 0..iterations {
            plan.fht(&mut output, &input, false).unwrap();
        }
        let plan_us = start.elapsed().as_micros() as f64 / iterations as f64;

        let start = Instant::now();
        for _ in 0..iterations {
            fht(&mut output, &input, false).unwrap();
        }
        let stateless_us = start.elapsed().as_micros() as f64 / iterations as f64;

        println!("{}\t\t{:.3}\t\t{:.3}", size, plan_us, stateless_us);
    }
}
