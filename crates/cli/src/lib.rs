mod generate;
mod group;
mod vendor;

use clap::{Args, Parser, Subcommand};
use objgen_core::config::GeneratorConfig;
use objgen_core::emit::{GroupResource, TemplateSet};
use objgen_core::fetch::MirrorFetcher;
use objgen_core::logging::{LogOptions, init_logging};
use objgen_core::plan::RefactoringPlan;
use objgen_core::project::Project;
use objgen_core::{ObjgenError, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "objgen",
    version,
    about = "Generates Go object libraries for the Kubernetes API",
    long_about = "Objgen completes a generated Kubernetes objects library: it vendors the \
                  apimachinery files the objects depend on, and writes the group/version/kind \
                  registration files of every generated package."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every generation step
    Generate {
        #[command(flatten)]
        args: ProjectArgs,
    },
    /// Copy upstream apimachinery files into the output tree
    #[command(
        long_about = "Fetches the configured apimachinery files for the release matching \
                      --kube-version, drops types already generated next to them and rewrites \
                      their imports onto the project module."
    )]
    Vendor {
        #[command(flatten)]
        args: ProjectArgs,
    },
    /// Write group info and kind files for the packages of a refactoring plan
    GroupResources {
        #[command(flatten)]
        args: ProjectArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Root of the generated library
    #[arg(long, value_name = "DIR", default_value = "./k8s-objects")]
    pub output: PathBuf,

    /// Module path of the generated library
    #[arg(long, default_value = "github.com/kubewarden/k8s-objects")]
    pub repo: String,

    /// Kubernetes version, e.g. 1.24 or v1.24.3
    #[arg(long)]
    pub kube_version: Option<String>,

    /// Refactoring plan (JSON) listing every definition and its package
    #[arg(long, value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Local directory mirroring the apimachinery repository, one sub-directory per release branch
    #[arg(long, value_name = "DIR")]
    pub apimachinery_mirror: Option<PathBuf>,

    /// Directory overriding the built-in templates
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Generator configuration (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory receiving the log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn project(&self) -> Project {
        Project::new(&self.output, &self.repo, self.kube_version.clone())
    }

    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        match &self.config {
            Some(path) => GeneratorConfig::from_file(path),
            None => Ok(GeneratorConfig::default()),
        }
    }

    pub fn fetcher(&self, config: &GeneratorConfig) -> Result<MirrorFetcher> {
        let mirror = self.apimachinery_mirror.as_ref().ok_or_else(|| {
            ObjgenError::Config("--apimachinery-mirror is required to vendor files".to_string())
        })?;
        Ok(MirrorFetcher::new(&config.apimachinery_repo, mirror))
    }

    pub fn refactoring_plan(&self) -> Result<RefactoringPlan> {
        let path = self.plan.as_ref().ok_or_else(|| {
            ObjgenError::Config("--plan is required to generate group resources".to_string())
        })?;
        RefactoringPlan::from_file(path)
    }

    pub fn group_resource(&self) -> Result<GroupResource> {
        let templates = match &self.templates {
            Some(dir) => TemplateSet::from_dir(dir)?,
            None => TemplateSet::builtin(),
        };
        Ok(GroupResource::new(templates))
    }

    fn log_options(&self) -> LogOptions {
        LogOptions {
            log_dir: self.log_dir.clone(),
            verbose: self.verbose,
            to_stderr: true,
        }
    }
}

pub fn run() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (component, args) = match &cli.command {
        Commands::Generate { args } => ("generate", args),
        Commands::Vendor { args } => ("vendor", args),
        Commands::GroupResources { args } => ("group-resources", args),
    };
    let _guard = init_logging(component, &args.log_options());

    match cli.command {
        Commands::Generate { args } => generate::run(&args)?,
        Commands::Vendor { args } => vendor::run(&args)?,
        Commands::GroupResources { args } => group::run(&args)?,
    }
    Ok(())
}
