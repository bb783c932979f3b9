//! Headless run of the reference session: prints the velocity tables and
//! exits without opening a window.
//!
//! Run with:
//!   cargo run -p duct-core --example report

use duct_core::report::Report;
use duct_core::{Dataset, PhysicalConstants};

fn main() -> duct_core::Result<()> {
    let dataset = Dataset::reference()?;
    let analysis = duct_core::analyze(&dataset, &PhysicalConstants::default())?;
    println!("{}", Report(&analysis));
    Ok(())
}
