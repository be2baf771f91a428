//! i18n-bundler
//!
//! コンポーネント単位の翻訳フラグメント (`*.i18n.json`) と言語単位の結合ファイルを相互に変換する
//!
//! - [`combine`]: フラグメントを言語ごとの結合ファイルにまとめる
//! - [`fill`]: ソース言語にあってターゲット言語にないキーをプレースホルダーで補完する
//! - [`split`]: 編集済みの結合ファイルをフラグメントに書き戻す

pub mod bundle;
pub mod config;
pub mod discovery;
pub mod document;
mod test_utils;

pub use bundle::{
    BundleError,
    CombineOptions,
    CombineReport,
    FillOptions,
    FillReport,
    SplitOptions,
    SplitReport,
    combine,
    fill,
    split,
};
