//! Package build driver: configure, build, install and test with CMake.
//!
//! The four steps always run in that order; the first failing step aborts the
//! build and nothing after it runs.

pub mod cmake;

use crate::{
    bundler::{
        BuildType, ToolRunner,
        error::{ErrorExt, Result},
        tools,
    },
    metadata::Recipe,
    source::SourceTree,
};
use cmake::CMakeOptions;
use std::{fmt, path::PathBuf};

/// Steps of a package build, in execution order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildStep {
    /// Generate the build tree.
    Configure,
    /// Compile.
    Build,
    /// Install into the prefix.
    Install,
    /// Run the test suite.
    Test,
}

impl BuildStep {
    /// Every step, in execution order.
    pub const ALL: [BuildStep; 4] = [
        BuildStep::Configure,
        BuildStep::Build,
        BuildStep::Install,
        BuildStep::Test,
    ];
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildStep::Configure => "configure",
            BuildStep::Build => "build",
            BuildStep::Install => "install",
            BuildStep::Test => "test",
        })
    }
}

/// One package build of a source tree.
#[derive(Debug, Clone)]
pub struct PackageBuild {
    source: SourceTree,
    recipe: Recipe,
    build_dir: PathBuf,
    build_type: BuildType,
    generator: Option<String>,
    install_prefix: Option<PathBuf>,
    jobs: usize,
}

impl PackageBuild {
    /// Build `source` per `recipe` into `build_dir`.
    pub fn new(source: SourceTree, recipe: Recipe, build_dir: PathBuf) -> Self {
        Self {
            source,
            recipe,
            build_dir,
            build_type: BuildType::Release,
            generator: None,
            install_prefix: None,
            jobs: num_cpus::get(),
        }
    }

    /// Build configuration. Default: Release
    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// CMake generator. Default: CMake's platform default
    pub fn generator(mut self, generator: Option<String>) -> Self {
        self.generator = generator;
        self
    }

    /// Install prefix. Default: CMake's platform default
    pub fn install_prefix(mut self, prefix: Option<PathBuf>) -> Self {
        self.install_prefix = prefix;
        self
    }

    /// Parallel compile jobs. Default: logical CPU count
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// The recipe this build follows.
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    fn options(&self) -> CMakeOptions<'_> {
        CMakeOptions {
            build_dir: &self.build_dir,
            build_type: self.build_type,
            generator: self.generator.as_deref(),
            install_prefix: self.install_prefix.as_deref(),
        }
    }

    /// Command line for `step`.
    pub fn command(&self, step: BuildStep) -> tools::ToolCommand {
        let options = self.options();
        match step {
            BuildStep::Configure => cmake::configure(&options, self.source.root(), &self.recipe.definitions),
            BuildStep::Build => cmake::build(&options, self.jobs),
            BuildStep::Install => cmake::install(&options),
            BuildStep::Test => cmake::test(&options),
        }
    }

    /// Run all steps, calling `observer` as each starts.
    ///
    /// # Returns
    ///
    /// The steps that completed (all of them on success).
    pub async fn run<R: ToolRunner>(&self, runner: &R, observer: impl Fn(BuildStep)) -> Result<Vec<BuildStep>> {
        let meta = &self.recipe.metadata;
        log::info!("Building {} {} ({})", meta.name, meta.version, meta.license);

        tokio::fs::create_dir_all(&self.build_dir)
            .await
            .fs_context("creating build directory", &self.build_dir)?;

        let mut done = Vec::with_capacity(BuildStep::ALL.len());
        for step in BuildStep::ALL {
            observer(step);
            tools::run_checked(runner, &self.command(step)).await?;
            done.push(step);
        }
        Ok(done)
    }
}
