use crate::{ProjectArgs, group, vendor};
use objgen_core::Result;
use tracing::info;

/// Vendors the static content, then emits group resources when a plan is given.
pub fn run(args: &ProjectArgs) -> Result<()> {
    vendor::run(args)?;
    if args.plan.is_some() {
        group::run(args)?;
    } else {
        info!("No refactoring plan provided. Skipping group resources generation");
    }
    info!("Generation complete!");
    Ok(())
}
