//! Command line front ends for the installer and package drivers.

mod args;
mod output;

pub use args::{Args, PackageArgs, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    bundler::{InstallerPipeline, SystemRunner},
    error::Result,
    package::PackageBuild,
    source::SourceTree,
};

/// `charm_installer` entry point
pub async fn run() -> Result<i32> {
    run_installer(Args::parse_args()).await
}

/// Build the installer described by `args`.
pub async fn run_installer(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);
    let settings = args.into_settings()?;
    let runner = SystemRunner;

    let report = InstallerPipeline::new(&settings, &runner)
        .on_stage(|stage| config.section(&stage.to_string()))
        .run()
        .await?;

    for library in &report.non_qt {
        config.warn(&format!(
            "{} is not a Qt binary; no Qt dependencies were deployed for it",
            library.display()
        ));
    }
    config.success(&format!(
        "Generated package file: {}",
        report.installer.display()
    ));
    config.indent(&format!("size: {} bytes", report.size));
    config.indent(&format!("sha256: {}", report.checksum));
    if let Some(vcredist) = &report.vcredist_2013 {
        config.indent(&format!("vcredist2013: {vcredist}"));
    }
    if !report.signed.is_empty() {
        config.indent(&format!("signed {} file(s)", report.signed.len()));
    }
    Ok(0)
}

/// `charm_package` entry point
pub async fn run_package() -> Result<i32> {
    run_package_with(PackageArgs::parse_args()).await
}

/// Configure, build, install and test per `args`.
pub async fn run_package_with(args: PackageArgs) -> Result<i32> {
    let config = RuntimeConfig::from(&args);
    let source = SourceTree::resolve(&args.source)?;
    let recipe = args.recipe()?;

    let mut build = PackageBuild::new(source, recipe, args.build_dir.clone())
        .build_type(args.build_type)
        .generator(args.generator.clone())
        .install_prefix(args.install_prefix.clone());
    if let Some(jobs) = args.jobs {
        build = build.jobs(jobs);
    }

    let steps = build
        .run(&SystemRunner, |step| config.section(&step.to_string()))
        .await?;

    let meta = &build.recipe().metadata;
    config.success(&format!(
        "Built {} {} ({} steps)",
        meta.name,
        meta.version,
        steps.len()
    ));
    Ok(0)
}
