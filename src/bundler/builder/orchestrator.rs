//! Installer pipeline: clean, populate, generate, sign.

use super::checksum::calculate_sha256;
use crate::bundler::{
    error::{ErrorExt, Result},
    platform::windows::{DeployHelper, nsis, sign},
    settings::Settings,
    tools::ToolRunner,
};
use std::{fmt, path::PathBuf};

/// Named steps of an installer run, in execution order.
///
/// A failing stage aborts the run; later stages never start.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Recreate the staging image empty.
    Clean,
    /// Copy binaries, plugins and runtimes into the image; optionally sign them.
    Populate,
    /// Run makensis over the image.
    Generate,
    /// Sign the produced installer (only when signing is enabled).
    SignInstaller,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Clean => "Cleaning staging image",
            Stage::Populate => "Populating staging image",
            Stage::Generate => "Generating installer",
            Stage::SignInstaller => "Signing installer",
        })
    }
}

/// Result of a successful run.
#[derive(Clone, Debug)]
pub struct InstallerReport {
    /// Absolute path of the installer.
    pub installer: PathBuf,
    /// Installer size in bytes.
    pub size: u64,
    /// Hex SHA-256 of the installer (after signing).
    pub checksum: String,
    /// Every file signed during the run, installer last.
    pub signed: Vec<PathBuf>,
    /// Staged VC++ 2013 redistributable, if any.
    pub vcredist_2013: Option<String>,
    /// Deployed libraries that got no Qt dependency pass because they do not link Qt.
    pub non_qt: Vec<PathBuf>,
    /// Stages that ran, in order.
    pub stages: Vec<Stage>,
}

/// Drives one installer build from an empty image to a (signed) setup.exe.
pub struct InstallerPipeline<'a, R> {
    settings: &'a Settings,
    runner: &'a R,
    observer: Option<Box<dyn Fn(Stage) + 'a>>,
}

impl<'a, R: ToolRunner> InstallerPipeline<'a, R> {
    /// Pipeline for `settings`, running tools through `runner`.
    pub fn new(settings: &'a Settings, runner: &'a R) -> Self {
        Self {
            settings,
            runner,
            observer: None,
        }
    }

    /// Call `observer` whenever a stage starts.
    pub fn on_stage(mut self, observer: impl Fn(Stage) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    fn enter(&self, stage: Stage, stages: &mut Vec<Stage>) {
        log::info!("{}", stage);
        if let Some(observer) = &self.observer {
            observer(stage);
        }
        stages.push(stage);
    }

    /// Run every stage in order, stopping at the first failure.
    pub async fn run(&self) -> Result<InstallerReport> {
        let helper = DeployHelper::new(self.settings, self.runner);
        let mut stages = Vec::new();

        self.enter(Stage::Clean, &mut stages);
        helper.clean_image().await?;

        self.enter(Stage::Populate, &mut stages);
        let mut outcome = helper.deploy().await?;

        self.enter(Stage::Generate, &mut stages);
        let installer =
            nsis::make_installer(self.runner, self.settings, outcome.vcredist_2013.as_deref()).await?;

        if sign::should_sign(self.settings) {
            self.enter(Stage::SignInstaller, &mut stages);
            sign::sign_file(self.runner, self.settings, &installer).await?;
            outcome.signed.push(installer.clone());
        }

        let size = tokio::fs::metadata(&installer)
            .await
            .fs_context("reading installer metadata", &installer)?
            .len();
        let checksum = calculate_sha256(&installer).await?;

        Ok(InstallerReport {
            installer,
            size,
            checksum,
            signed: outcome.signed,
            vcredist_2013: outcome.vcredist_2013,
            non_qt: outcome.non_qt,
            stages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        Error,
        settings::{ProductSettings, SettingsBuilder, WindowsSettings},
        tools::{ToolOutput, testing::FakeRunner},
    };
    use std::{
        cell::RefCell,
        path::Path,
        sync::{Arc, Mutex},
    };

    /// Runner whose makensis writes the installer named by `/Dsetupname=`.
    fn nsis_runner() -> FakeRunner {
        FakeRunner::with(|cmd| {
            if cmd.program() == "makensis" {
                let setup = cmd
                    .get_args()
                    .iter()
                    .find_map(|a| a.strip_prefix("/Dsetupname="))
                    .unwrap();
                std::fs::write(setup, b"installer").unwrap();
            }
            ToolOutput {
                status: Some(0),
                output: String::new(),
            }
        })
    }

    fn settings(root: &Path, windows: WindowsSettings) -> Settings {
        std::fs::create_dir_all(root.join("build/plugins")).unwrap();
        std::fs::write(root.join("build/charm.exe"), b"app").unwrap();
        std::fs::write(root.join("build/plugins/foo.dll"), b"plugin").unwrap();
        SettingsBuilder::new()
            .build_dir(root.join("build"))
            .application_file_name("charm.exe")
            .plugin_folders(["plugins"])
            .image_dir(root.join("deployImage"))
            .qml_dir(root)
            .product(ProductSettings {
                installer_name: root.join("Charm-setup.exe").to_string_lossy().into_owned(),
                ..Default::default()
            })
            .windows(WindowsSettings {
                nsis_script: Some(root.join("custom.nsi")),
                ..windows
            })
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn full_run_produces_installer() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = settings(tmp.path(), WindowsSettings::default());
        let runner = nsis_runner();
        let seen = RefCell::new(Vec::new());

        let report = InstallerPipeline::new(&settings, &runner)
            .on_stage(|stage| seen.borrow_mut().push(stage))
            .run()
            .await
            .unwrap();

        assert_eq!(report.installer, tmp.path().join("Charm-setup.exe"));
        assert_eq!(report.size, 9);
        assert_eq!(report.checksum.len(), 64);
        assert_eq!(report.stages, [Stage::Clean, Stage::Populate, Stage::Generate]);
        assert_eq!(*seen.borrow(), report.stages);
        assert!(tmp.path().join("deployImage/charm.exe").is_file());
        assert!(tmp.path().join("deployImage/foo.dll").is_file());

        let makensis = runner.calls_to("makensis");
        assert_eq!(makensis.len(), 1);
        let args = makensis[0].get_args();
        assert_eq!(args[0], "/NOCD");
        assert!(args.contains(&"/Dvcredist2013=none".to_string()));
        assert!(args.last().unwrap().ends_with("custom.nsi"));
    }

    #[tokio::test]
    async fn signing_includes_the_installer() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = settings(
            tmp.path(),
            WindowsSettings {
                sign: true,
                ..Default::default()
            },
        );
        let runner = nsis_runner();

        let report = InstallerPipeline::new(&settings, &runner).run().await.unwrap();

        assert_eq!(report.stages.last(), Some(&Stage::SignInstaller));
        let signed = runner.calls_to("signtool");
        assert_eq!(signed.len(), 3);
        assert!(signed[2].get_args().last().unwrap().ends_with("Charm-setup.exe"));
        assert_eq!(report.signed.last(), Some(&report.installer));
    }

    #[tokio::test]
    async fn missing_vcredist_stops_before_generation() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("redist")).unwrap();
        let settings = settings(
            tmp.path(),
            WindowsSettings {
                vc_redist: Some(tmp.path().join("redist")),
                ..Default::default()
            },
        );
        let runner = nsis_runner();

        let err = InstallerPipeline::new(&settings, &runner).run().await.unwrap_err();

        assert!(matches!(err, Error::VcRedistNotFound(_)));
        assert!(runner.calls_to("makensis").is_empty());
        assert!(!tmp.path().join("Charm-setup.exe").exists());
    }

    #[tokio::test]
    async fn built_in_template_never_touches_existing_scripts() {
        let tmp = tempfile::tempdir().unwrap();
        let base = settings(tmp.path(), WindowsSettings::default());
        let settings = SettingsBuilder::new()
            .build_dir(base.build_dir())
            .application_file_name("charm.exe")
            .image_dir(base.image_dir())
            .qml_dir(tmp.path())
            .product(base.product().clone())
            .build()
            .unwrap();
        let hand_written = tmp.path().join("NullsoftInstaller.nsi");
        std::fs::write(&hand_written, "; hand-written installer").unwrap();

        let script_seen = Arc::new(Mutex::new(None::<(PathBuf, Vec<u8>)>));
        let record = Arc::clone(&script_seen);
        let runner = FakeRunner::with(move |cmd| {
            if cmd.program() == "makensis" {
                let script = PathBuf::from(cmd.get_args().last().unwrap());
                let content = std::fs::read(&script).unwrap();
                *record.lock().unwrap() = Some((script, content));
                let setup = cmd
                    .get_args()
                    .iter()
                    .find_map(|a| a.strip_prefix("/Dsetupname="))
                    .unwrap();
                std::fs::write(setup, b"installer").unwrap();
            }
            ToolOutput {
                status: Some(0),
                output: String::new(),
            }
        });

        InstallerPipeline::new(&settings, &runner).run().await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&hand_written).unwrap(),
            "; hand-written installer"
        );
        let (script, content) = script_seen.lock().unwrap().take().unwrap();
        assert_ne!(script, hand_written);
        assert!(!script.starts_with(tmp.path()));
        assert_eq!(&content[..3], &[0xEF, 0xBB, 0xBF]);
        assert!(!script.exists());
        assert!(!tmp.path().join("deployImage/NullsoftInstaller.nsi").exists());
    }
}
