//! `rollwatch run-id` — mint a run identifier for the apply step.

use rollwatch_core::Labeller;

pub fn run_id() {
    let labeller = Labeller::new();
    println!("{}", labeller.run_id());
    println!("selector: {}", labeller.selector());
}
