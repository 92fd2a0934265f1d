//! Demonstrates enabling verbose logging for kwht.
use kwht::fht::FhtPlan;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let x = [1.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
    let mut y = [0.0f32; 8];

    let mut plan = FhtPlan::<f32>::new(x.len());
    plan.fht(&mut y, &x, true).unwrap();
    println!("HT(x) = {:?}", y);
}
