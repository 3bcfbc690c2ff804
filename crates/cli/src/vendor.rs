use crate::ProjectArgs;
use objgen_core::Result;
use objgen_core::vendor::StaticContent;
use objgen_go::GoParser;
use tracing::info;

pub fn run(args: &ProjectArgs) -> Result<()> {
    let project = args.project();
    let config = args.generator_config()?;

    if project.apimachinery_release()?.is_none() {
        info!("No Kubernetes release provided. Skipping static content files generation");
        return Ok(());
    }

    let parser = GoParser::new()?;
    let fetcher = args.fetcher(&config)?;

    info!(
        "Vendoring {} apimachinery files into {}...",
        config.static_files.len(),
        project.root.display()
    );
    let report = StaticContent::new(&parser, &fetcher, &project, &config).copy_files()?;
    info!(
        "Vendored {} files from {}",
        report.written.len(),
        report.release.as_deref().unwrap_or("-")
    );
    Ok(())
}
