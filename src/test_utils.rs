//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

/// テスト用のフラグメントファイルを作成する
///
/// # Arguments
/// * `root` - フラグメントのルートディレクトリ
/// * `relative` - ルートからの相対パス (例: "app/menu.i18n.json")
/// * `content` - ファイルの内容
///
/// # Returns
/// 作成されたファイルのパス
pub(crate) fn write_fragment(root: &Path, relative: &str, content: &Value) -> PathBuf {
    let path = root.join(relative);
    write_json_file(&path, content);
    path
}

/// JSON ファイルを書き込む (親ディレクトリも作成)
pub(crate) fn write_json_file(path: &Path, content: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(content).unwrap()).unwrap();
}

/// JSON ファイルを読み込む
pub(crate) fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
