//! # Open Session Input DTO
//!
//! セッション開設の入力

use chrono::{DateTime, Utc};

/// セッション開設の入力
#[derive(Debug, Clone)]
pub struct OpenSessionInput {
    /// 開始日時
    pub start: DateTime<Utc>,
    /// 終了日時
    pub end: DateTime<Utc>,
    pub title: String,
    pub contents: String,
    /// カバー画像（バイナリ）
    pub cover_image: Option<Vec<u8>>,
    /// 定員（検証はドメイン側で行う）
    pub capacity: i64,
}

impl OpenSessionInput {
    /// 新しい入力を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use coursereg::application::dto::open_session_input::OpenSessionInput;
    ///
    /// let input = OpenSessionInput::new(
    ///     Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2024, 4, 30, 18, 0, 0).unwrap(),
    ///     "Rust入門".to_string(),
    ///     "所有権と借用".to_string(),
    ///     30,
    /// );
    ///
    /// assert_eq!(input.capacity, 30);
    /// assert!(input.cover_image.is_none());
    /// ```
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        title: String,
        contents: String,
        capacity: i64,
    ) -> Self {
        Self {
            start,
            end,
            title,
            contents,
            cover_image: None,
            capacity,
        }
    }

    /// カバー画像を設定する
    pub fn with_cover_image(mut self, image: Vec<u8>) -> Self {
        self.cover_image = Some(image);
        self
    }
}
