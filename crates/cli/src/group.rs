use crate::ProjectArgs;
use objgen_core::Result;
use tracing::info;

pub fn run(args: &ProjectArgs) -> Result<()> {
    let project = args.project();
    let plan = args.refactoring_plan()?;
    let emitter = args.group_resource()?;

    info!(
        "Generating group resources for {} definitions into {}...",
        plan.definitions.len(),
        project.root.display()
    );
    let written = emitter.generate(&project, &plan)?;
    for path in written.iter().take(10) {
        info!(" - {}", path.display());
    }
    Ok(())
}
