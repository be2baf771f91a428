//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    BundlerSettings,
    ConfigError,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: BundlerSettings,

    /// プロジェクトのルートパス
    project_root: PathBuf,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: BundlerSettings::default(), project_root: PathBuf::from(".") }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `project_root` - プロジェクトのルートパス
    /// * `config_file` - 明示的に指定された設定ファイル (省略時はプロジェクトルートを探す)
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(
        &mut self,
        project_root: PathBuf,
        config_file: Option<&Path>,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        let settings = if let Some(path) = config_file {
            loader::load_from_file(path)?
        } else {
            loader::load_from_project(&project_root)?.map_or_else(BundlerSettings::default, |s| {
                tracing::debug!("Loaded project settings: {:?}", s);
                s
            })
        };

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.project_root = project_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 設定を更新する (コマンドライン引数による上書き用)
    pub fn update_settings(&mut self, new_settings: BundlerSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &BundlerSettings {
        &self.current_settings
    }

    /// プロジェクトルートを取得
    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// プロジェクトルートからの相対パスを解決する (絶対パスはそのまま)
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }

    /// 翻訳フラグメントのルートディレクトリ
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.resolve(&self.current_settings.source_dir)
    }

    /// 結合ファイルの出力ディレクトリ
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.current_settings.output_dir)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::ComponentNaming;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().fragment_suffix, ".i18n.json");
        assert_eq!(manager.project_root(), Path::new("."));
    }

    /// load_settings: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"sourceDir": "i18n", "componentNaming": "stripSuffix"}"#;
        fs::write(temp_dir.path().join(".i18n-bundler.json"), config_content).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(temp_dir.path().to_path_buf(), None);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().component_naming, ComponentNaming::StripSuffix);
        assert_eq!(manager.source_dir(), temp_dir.path().join("i18n"));
    }

    /// load_settings: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(temp_dir.path().to_path_buf(), None);

        assert!(result.is_ok());
        assert_eq!(manager.source_dir(), temp_dir.path().join("src/main/resources/public"));
        assert_eq!(manager.output_dir(), temp_dir.path().join("target/generated-resources"));
    }

    /// load_settings: 明示的な設定ファイルを優先する
    #[rstest]
    fn test_load_settings_with_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".i18n-bundler.json"), r#"{"fragmentSuffix": ".a.json"}"#)
            .unwrap();
        let explicit = temp_dir.path().join("custom.json");
        fs::write(&explicit, r#"{"fragmentSuffix": ".b.json"}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(temp_dir.path().to_path_buf(), Some(&explicit));

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().fragment_suffix, ".b.json");
    }

    /// load_settings: 無効な設定ファイルはエラー
    #[rstest]
    fn test_load_settings_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".i18n-bundler.json"), r#"{"fragmentSuffix": ""}"#)
            .unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(temp_dir.path().to_path_buf(), None);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
    }

    /// update_settings: 有効な設定で更新成功
    #[rstest]
    fn test_update_settings_valid() {
        let mut manager = ConfigManager::new();
        let mut new_settings = BundlerSettings::default();
        new_settings.path_prefix = Some("app".to_string());

        let result = manager.update_settings(new_settings);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().path_prefix.as_deref(), Some("app"));
    }

    /// update_settings: 無効な設定でエラー
    #[rstest]
    fn test_update_settings_invalid() {
        let mut manager = ConfigManager::new();
        let mut new_settings = BundlerSettings::default();
        new_settings.fragment_suffix = String::new(); // 空文字は無効

        let result = manager.update_settings(new_settings);

        assert!(result.is_err());
    }

    /// resolve: 絶対パスはそのまま
    #[rstest]
    fn test_resolve_keeps_absolute_path() {
        let manager = ConfigManager::new();
        let absolute = std::env::temp_dir();

        assert_eq!(manager.resolve(&absolute), absolute);
    }
}
