//! Order command: print the particle update order for one sweep.

use hpmc_moves::{MoveConfig, UpdateOrder};
use tracing::info;

use crate::Result;

/// Prints the visitation order for `sweep`.
pub fn run(config: &MoveConfig, sweep: u64) -> Result<()> {
    let mut order = UpdateOrder::from_config(config)?;
    order.shuffle(sweep);

    info!(
        sweep,
        mode = %order.mode(),
        every = order.cadence(),
        "Computed update order"
    );

    println!("Update order (sweep {}, mode {}):", sweep, order.mode());
    let line = order
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    Ok(())
}
