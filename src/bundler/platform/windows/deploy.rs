//! Staging image population.
//!
//! [`DeployHelper::deploy`] fills a freshly cleaned image in a fixed order:
//! listed DLLs, the application with its Qt runtime, flat plugins, namespaced
//! plugins, OpenSSL, the VC++ redistributable and finally signatures.

use super::{
    dll,
    image::StagingImage,
    qt::{self, DependencyPass},
    redist, sign,
};
use crate::bundler::{
    error::{Context, Error, Result},
    settings::Settings,
    tools::ToolRunner,
    utils::fs::glob_files,
};
use std::path::{Path, PathBuf};

/// Glob for plugin libraries below a plugin folder.
const PLUGIN_PATTERN: &str = "**/*.dll";

/// What the populate stage hands to installer generation.
#[derive(Clone, Debug, Default)]
pub struct DeployOutcome {
    /// File name of the staged VC++ 2013 redistributable, if one was deployed.
    pub vcredist_2013: Option<String>,
    /// Files signed in the image, in signing order.
    pub signed: Vec<PathBuf>,
    /// Deployed libraries windeployqt reported as not linking Qt.
    pub non_qt: Vec<PathBuf>,
}

/// Populates the staging image for one [`Settings`].
pub struct DeployHelper<'a, R> {
    settings: &'a Settings,
    runner: &'a R,
    image: StagingImage,
}

impl<'a, R: ToolRunner> DeployHelper<'a, R> {
    /// Create a helper staging into `settings.image_dir()`.
    pub fn new(settings: &'a Settings, runner: &'a R) -> Self {
        Self {
            settings,
            runner,
            image: StagingImage::new(settings.image_dir()),
        }
    }

    /// The staging image.
    pub fn image(&self) -> &StagingImage {
        &self.image
    }

    /// Recreate the staging directory empty.
    pub async fn clean_image(&self) -> Result<()> {
        self.image.clean().await
    }

    /// Populate the image. Expects [`clean_image`](Self::clean_image) to have run.
    pub async fn deploy(&self) -> Result<DeployOutcome> {
        let mut non_qt = Vec::new();
        self.deploy_listed_dlls(&mut non_qt).await?;
        self.deploy_application().await?;
        self.deploy_plugin_folders(&mut non_qt).await?;
        self.deploy_extra_plugin_folders(&mut non_qt).await?;
        self.deploy_openssl().await?;
        let vcredist_2013 = self.deploy_vc_redist().await?;

        let signed = if sign::should_sign(self.settings) {
            sign::sign_tree(self.runner, self.settings, self.image.root()).await?
        } else {
            Vec::new()
        };

        Ok(DeployOutcome {
            vcredist_2013,
            signed,
            non_qt,
        })
    }

    /// Copy a library into the image, then deploy its Qt dependencies.
    async fn copy_with_qt_deps(&self, src: &Path, dest_dir: Option<&Path>, non_qt: &mut Vec<PathBuf>) -> Result<()> {
        self.image.copy_in(src, dest_dir).await?;
        if qt::deploy_dependencies(self.runner, self.settings, src).await? == DependencyPass::NotQt {
            non_qt.push(src.to_path_buf());
        }
        Ok(())
    }

    async fn deploy_listed_dlls(&self, non_qt: &mut Vec<PathBuf>) -> Result<()> {
        if self.settings.deploy_dlls().is_empty() {
            return Ok(());
        }

        let system_path = std::env::var_os("PATH");
        let search_path = dll::dll_search_path(
            self.image.root(),
            system_path.as_deref(),
            self.settings.extra_search_dirs(),
        );
        log::debug!("DLL search path: {:?}", search_path);

        for name in self.settings.deploy_dlls() {
            let found = dll::locate_dll(name, &search_path, dll::DLL_EXTENSIONS)?;
            self.copy_with_qt_deps(&found, None, non_qt).await?;
        }
        Ok(())
    }

    async fn deploy_application(&self) -> Result<()> {
        let app = self.settings.application_path();
        self.image.copy_in(&app, None).await?;
        qt::deploy_application(self.runner, self.settings, &app).await
    }

    async fn deploy_plugin_folders(&self, non_qt: &mut Vec<PathBuf>) -> Result<()> {
        for folder in self.settings.plugin_folders() {
            for dll in glob_files(&self.settings.build_dir().join(folder), PLUGIN_PATTERN)? {
                self.copy_with_qt_deps(&dll, None, non_qt).await?;
            }
        }
        Ok(())
    }

    async fn deploy_extra_plugin_folders(&self, non_qt: &mut Vec<PathBuf>) -> Result<()> {
        for folder in self.settings.extra_plugin_folders() {
            let name = Path::new(folder)
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| Error::InvalidConfig(format!("Plugin folder {folder:?} has no base name")))?;
            let dest = self.image.subdir(name).await?;

            for dll in glob_files(&self.settings.build_dir().join(folder), PLUGIN_PATTERN)? {
                self.copy_with_qt_deps(&dll, Some(&dest), non_qt).await?;
            }
        }
        Ok(())
    }

    async fn deploy_openssl(&self) -> Result<()> {
        let windows = self.settings.windows();
        if let Some(root) = &windows.openssl_1_0 {
            for dll in redist::files_below(root, &redist::OPENSSL_1_0_DLLS) {
                self.image.copy_in(&dll, None).await?;
            }
        }
        if let Some(root) = &windows.openssl_1_1 {
            for dll in redist::files_below(root, &redist::OPENSSL_1_1_DLLS) {
                self.image.copy_in(&dll, None).await?;
            }
        }
        Ok(())
    }

    async fn deploy_vc_redist(&self) -> Result<Option<String>> {
        let Some(root) = &self.settings.windows().vc_redist else {
            return Ok(None);
        };

        let installer = redist::find_vcredist_2013(root)?;
        self.image.copy_in(&installer, None).await?;
        let name = installer
            .file_name()
            .context("vcredist installer path has no file name")?;
        Ok(Some(name.to_string_lossy().into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        settings::{SettingsBuilder, WindowsSettings},
        tools::{ToolOutput, testing::FakeRunner},
    };
    use std::collections::HashSet;

    struct Fixture {
        tmp: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let fixture = Self { tmp };
            fixture.touch("build/charm.exe");
            fixture.touch("build/plugins/foo.dll");
            fixture.touch("build/plugins/nested/bar.dll");
            fixture.touch("build/plugins/readme.txt");
            fixture.touch("build/sqldrivers/qsqlite.dll");
            fixture
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.tmp.path().join(rel)
        }

        fn touch(&self, rel: &str) {
            let path = self.path(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, rel.as_bytes()).unwrap();
        }

        fn builder(&self) -> SettingsBuilder {
            SettingsBuilder::new()
                .build_dir(self.path("build"))
                .application_file_name("charm.exe")
                .image_dir(self.path("deployImage"))
                .qml_dir(self.tmp.path())
                .plugin_folders(["plugins"])
        }

        fn image(&self, rel: &str) -> PathBuf {
            self.path("deployImage").join(rel)
        }
    }

    async fn clean_and_deploy(settings: &Settings, runner: &FakeRunner) -> Result<DeployOutcome> {
        let helper = DeployHelper::new(settings, runner);
        helper.clean_image().await?;
        helper.deploy().await
    }

    fn failing_for_non_app(output: &'static str) -> FakeRunner {
        FakeRunner::with(move |cmd| {
            if cmd.get_args().iter().any(|a| a == "--compiler-runtime") {
                ToolOutput { status: Some(0), output: String::new() }
            } else {
                ToolOutput { status: Some(1), output: output.to_string() }
            }
        })
    }

    #[tokio::test]
    async fn stages_application_and_plugins() {
        let fx = Fixture::new();
        let settings = fx.builder().extra_plugin_folders(["sqldrivers"]).build().unwrap();
        let runner = FakeRunner::succeeding();

        let outcome = clean_and_deploy(&settings, &runner).await.unwrap();

        assert!(outcome.non_qt.is_empty());
        assert!(fx.image("charm.exe").is_file());
        assert!(fx.image("foo.dll").is_file());
        assert!(fx.image("bar.dll").is_file());
        assert!(!fx.image("readme.txt").exists());
        assert!(fx.image("sqldrivers/qsqlite.dll").is_file());
        assert!(!fx.image("qsqlite.dll").exists());
        assert!(outcome.vcredist_2013.is_none());
        assert!(outcome.signed.is_empty());

        let deploys = runner.calls_to("windeployqt");
        assert_eq!(deploys.len(), 4);
        let app = &deploys[0];
        assert!(app.get_args().contains(&"--compiler-runtime".to_string()));
        assert_eq!(app.get_args()[0], "--release");
        assert!(app.get_args().last().unwrap().ends_with("charm.exe"));
        assert!(deploys[1..]
            .iter()
            .all(|c| !c.get_args().contains(&"--compiler-runtime".to_string())));
    }

    #[tokio::test]
    async fn non_qt_plugins_are_tolerated() {
        let fx = Fixture::new();
        let settings = fx.builder().build().unwrap();
        let runner = failing_for_non_app("foo.dll does not seem to be a Qt executable.");

        let outcome = clean_and_deploy(&settings, &runner).await.unwrap();
        assert!(fx.image("foo.dll").is_file());
        assert_eq!(outcome.non_qt.len(), 2);
        assert!(outcome.non_qt[0].ends_with("plugins/foo.dll"));
        assert!(outcome.non_qt[1].ends_with("plugins/nested/bar.dll"));
    }

    #[tokio::test]
    async fn other_plugin_deploy_failures_abort() {
        let fx = Fixture::new();
        let settings = fx.builder().build().unwrap();
        let runner = failing_for_non_app("Unable to find dependent libraries of foo.dll");

        let err = clean_and_deploy(&settings, &runner).await.unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }

    #[tokio::test]
    async fn application_deploy_failure_is_never_tolerated() {
        let fx = Fixture::new();
        let settings = fx.builder().build().unwrap();
        let runner = FakeRunner::with(|_| ToolOutput {
            status: Some(1),
            output: "charm.exe does not seem to be a Qt executable.".into(),
        });

        let err = clean_and_deploy(&settings, &runner).await.unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
        assert!(!fx.image("foo.dll").exists());
    }

    #[tokio::test]
    async fn listed_dlls_come_from_extra_search_dirs() {
        let fx = Fixture::new();
        fx.touch("thirdparty/bin/qt5keychain.dll");
        let settings = fx
            .builder()
            .deploy_dlls(["qt5keychain"])
            .extra_search_dirs([fx.path("thirdparty/bin").to_string_lossy().into_owned()])
            .build()
            .unwrap();
        let runner = FakeRunner::succeeding();

        clean_and_deploy(&settings, &runner).await.unwrap();
        assert!(fx.image("qt5keychain.dll").is_file());

        let first = &runner.calls_to("windeployqt")[0];
        assert!(first.get_args().last().unwrap().ends_with("qt5keychain.dll"));
    }

    #[tokio::test]
    async fn unknown_dll_aborts() {
        let fx = Fixture::new();
        let settings = fx
            .builder()
            .deploy_dlls(["charm-deploy-no-such-library"])
            .build()
            .unwrap();

        let err = clean_and_deploy(&settings, &FakeRunner::succeeding()).await.unwrap_err();
        assert_eq!(err.to_string(), "Unable to locate charm-deploy-no-such-library");
    }

    #[tokio::test]
    async fn openssl_and_vcredist_are_copied_without_qt_pass() {
        let fx = Fixture::new();
        for dll in redist::OPENSSL_1_0_DLLS {
            fx.touch(&format!("ossl10/{dll}"));
        }
        for dll in redist::OPENSSL_1_1_DLLS {
            fx.touch(&format!("ossl11/{dll}"));
        }
        fx.touch("redist/vcredist_x64-2013.exe");

        let settings = fx
            .builder()
            .plugin_folders(Vec::<String>::new())
            .windows(WindowsSettings {
                openssl_1_0: Some(fx.path("ossl10")),
                openssl_1_1: Some(fx.path("ossl11")),
                vc_redist: Some(fx.path("redist")),
                ..Default::default()
            })
            .build()
            .unwrap();
        let runner = FakeRunner::succeeding();

        let outcome = clean_and_deploy(&settings, &runner).await.unwrap();

        for name in ["libeay32.dll", "libssl32.dll", "ssleay32.dll", "libcrypto-1_1-x64.dll", "libssl-1_1-x64.dll"] {
            assert!(fx.image(name).is_file(), "{name} missing");
        }
        assert!(fx.image("vcredist_x64-2013.exe").is_file());
        assert_eq!(outcome.vcredist_2013.as_deref(), Some("vcredist_x64-2013.exe"));
        assert_eq!(runner.calls_to("windeployqt").len(), 1);
    }

    #[tokio::test]
    async fn missing_vcredist_aborts() {
        let fx = Fixture::new();
        std::fs::create_dir_all(fx.path("redist")).unwrap();
        let settings = fx
            .builder()
            .windows(WindowsSettings {
                vc_redist: Some(fx.path("redist")),
                ..Default::default()
            })
            .build()
            .unwrap();

        let err = clean_and_deploy(&settings, &FakeRunner::succeeding()).await.unwrap_err();
        assert!(matches!(err, Error::VcRedistNotFound(_)));
    }

    #[tokio::test]
    async fn unsigned_runs_never_call_signtool() {
        let fx = Fixture::new();
        let settings = fx.builder().build().unwrap();
        let runner = FakeRunner::succeeding();

        clean_and_deploy(&settings, &runner).await.unwrap();
        assert!(runner.calls_to("signtool").is_empty());
    }

    #[tokio::test]
    async fn signing_covers_every_binary_once() {
        let fx = Fixture::new();
        let settings = fx
            .builder()
            .extra_plugin_folders(["sqldrivers"])
            .windows(WindowsSettings {
                sign: true,
                ..Default::default()
            })
            .build()
            .unwrap();
        let runner = FakeRunner::succeeding();

        let outcome = clean_and_deploy(&settings, &runner).await.unwrap();

        let signed: Vec<String> = runner
            .calls_to("signtool")
            .iter()
            .map(|c| c.get_args().last().unwrap().clone())
            .collect();
        let unique: HashSet<&String> = signed.iter().collect();
        assert_eq!(signed.len(), 4);
        assert_eq!(unique.len(), 4);
        assert!(signed[0].ends_with("charm.exe"));
        assert_eq!(outcome.signed.len(), 4);

        let first = &runner.calls_to("signtool")[0];
        assert_eq!(
            first.get_args()[..6],
            ["sign", "-t", crate::bundler::DEFAULT_TIMESTAMP_URL, "-fd", "SHA256", "-v"]
        );
    }
}
