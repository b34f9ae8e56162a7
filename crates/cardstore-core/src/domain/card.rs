//! Card - ユーザーが作成するバースデーカード
//!
//! # 構成
//! - **Card**: id 付きの完全なレコード（コレクションに保存される単位）
//! - **CardFields**: 編集可能なフィールド一式（create / update の入力）
//! - **BackgroundColor**: パレットの色、または自由形式の色文字列
//! - **FontFamily**: サポートするフォントの列挙
//!
//! # 永続化フォーマット
//! `{ id, photo, title, bottomText, backgroundColor, fontFamily }` の JSON object。
//! `photo` のみ省略可能（null）で、それ以外はすべて文字列です。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::StoreError;
use super::ids::CardId;

/// タイトルが空のときのプレースホルダー
pub const DEFAULT_TITLE: &str = "Happy Birthday";

/// 下部テキストが空のときのプレースホルダー
pub const DEFAULT_BOTTOM_TEXT: &str = "Your Text Here";

/// 背景色の初期値
pub const DEFAULT_BACKGROUND_COLOR: &str = "#000";

/// Card は 1 枚のカード
///
/// `id` は作成時に割り当てられ、以後変更されません（getter のみ公開）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    #[serde(default)]
    pub photo: Option<String>,
    pub title: String,
    pub bottom_text: String,
    pub background_color: BackgroundColor,
    pub font_family: FontFamily,
}

impl Card {
    /// id とフィールドから Card を組み立てる
    pub fn new(id: CardId, fields: CardFields) -> Self {
        Self {
            id,
            photo: fields.photo,
            title: fields.title,
            bottom_text: fields.bottom_text,
            background_color: fields.background_color,
            font_family: fields.font_family,
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    /// 編集用にフィールドを取り出す
    ///
    /// update は完全なレコードの差し替えなので、呼び出し側はこれを
    /// 書き換えてから `CardStore::update` に渡します。
    pub fn fields(&self) -> CardFields {
        CardFields {
            title: self.title.clone(),
            bottom_text: self.bottom_text.clone(),
            photo: self.photo.clone(),
            background_color: self.background_color.clone(),
            font_family: self.font_family,
        }
    }
}

/// CardFields は id 以外の編集可能なフィールド
///
/// `Default` はエディタの初期状態（プレースホルダー、黒背景、Arial）です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFields {
    pub title: String,
    pub bottom_text: String,
    pub photo: Option<String>,
    pub background_color: BackgroundColor,
    pub font_family: FontFamily,
}

impl Default for CardFields {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            bottom_text: DEFAULT_BOTTOM_TEXT.to_string(),
            photo: None,
            background_color: BackgroundColor::default(),
            font_family: FontFamily::default(),
        }
    }
}

impl CardFields {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_bottom_text(mut self, bottom_text: impl Into<String>) -> Self {
        self.bottom_text = bottom_text.into();
        self
    }

    pub fn with_photo(mut self, photo: Option<String>) -> Self {
        self.photo = photo;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<BackgroundColor>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_font_family(mut self, font: FontFamily) -> Self {
        self.font_family = font;
        self
    }

    /// プレースホルダーを適用する
    ///
    /// - 空（空白のみ）の title / bottom_text はプレースホルダーに置き換え
    /// - 空文字列の photo は「写真なし」（None）
    /// - 空の background_color は初期値に戻す
    pub fn normalized(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = DEFAULT_TITLE.to_string();
        }
        if self.bottom_text.trim().is_empty() {
            self.bottom_text = DEFAULT_BOTTOM_TEXT.to_string();
        }
        if self.photo.as_deref().is_some_and(|p| p.trim().is_empty()) {
            self.photo = None;
        }
        if self.background_color.as_str().trim().is_empty() {
            self.background_color = BackgroundColor::default();
        }
        self
    }
}

// ========================================
// 背景色
// ========================================

/// Swatch はカラーピッカーのパレット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swatch {
    Tomato,
    Chartreuse,
    Chocolate,
    DeepSkyBlue,
    BlueViolet,
    DeepPink,
    Gray,
    Black,
}

impl Swatch {
    /// ピッカーに並ぶ順序
    pub const ALL: [Swatch; 8] = [
        Swatch::Tomato,
        Swatch::Chartreuse,
        Swatch::Chocolate,
        Swatch::DeepSkyBlue,
        Swatch::BlueViolet,
        Swatch::DeepPink,
        Swatch::Gray,
        Swatch::Black,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            Swatch::Tomato => "#FF6347",
            Swatch::Chartreuse => "#7FFF00",
            Swatch::Chocolate => "#D2691E",
            Swatch::DeepSkyBlue => "#00BFFF",
            Swatch::BlueViolet => "#8A2BE2",
            Swatch::DeepPink => "#FF1493",
            Swatch::Gray => "#808080",
            Swatch::Black => "#000000",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Swatch::Tomato => "tomato",
            Swatch::Chartreuse => "chartreuse",
            Swatch::Chocolate => "chocolate",
            Swatch::DeepSkyBlue => "deepskyblue",
            Swatch::BlueViolet => "blueviolet",
            Swatch::DeepPink => "deeppink",
            Swatch::Gray => "gray",
            Swatch::Black => "black",
        }
    }
}

/// BackgroundColor はカードの背景色
///
/// 保存されている文字列をそのまま保持します（パレット外の自由形式も可）。
/// 正規化しないので、encode → decode で値が変わることはありません。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackgroundColor(String);

impl BackgroundColor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// パレットの色であれば Swatch を返す（hex / 名前、大文字小文字は無視）
    pub fn swatch(&self) -> Option<Swatch> {
        let value = self.0.trim();
        Swatch::ALL.into_iter().find(|swatch| {
            swatch.hex().eq_ignore_ascii_case(value) || swatch.name().eq_ignore_ascii_case(value)
        })
    }

    /// ユーザー入力から背景色を作る
    ///
    /// パレットの名前（"tomato" など）は hex に展開し、それ以外はそのまま使います。
    pub fn from_user_input(input: &str) -> Self {
        let input = input.trim();
        match Swatch::ALL
            .into_iter()
            .find(|swatch| swatch.name().eq_ignore_ascii_case(input))
        {
            Some(swatch) => swatch.into(),
            None => Self::new(input),
        }
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND_COLOR)
    }
}

impl From<Swatch> for BackgroundColor {
    fn from(swatch: Swatch) -> Self {
        Self::new(swatch.hex())
    }
}

impl From<&str> for BackgroundColor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========================================
// フォント
// ========================================

/// FontFamily はサポートするフォント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    Arial,
    Courier,
    Georgia,
    TimesNewRoman,
    Verdana,
}

impl FontFamily {
    /// ピッカーに並ぶ順序
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Arial,
        FontFamily::Courier,
        FontFamily::Georgia,
        FontFamily::TimesNewRoman,
        FontFamily::Verdana,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Courier => "Courier",
            FontFamily::Georgia => "Georgia",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::Verdana => "Verdana",
        }
    }
}

impl FromStr for FontFamily {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FontFamily::ALL
            .into_iter()
            .find(|font| font.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| StoreError::InvalidField(format!("unsupported font family '{s}'")))
    }
}

impl TryFrom<String> for FontFamily {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FontFamily> for String {
    fn from(font: FontFamily) -> Self {
        font.as_str().to_string()
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_fields_match_editor_initial_state() {
        let fields = CardFields::default();

        assert_eq!(fields.title, "Happy Birthday");
        assert_eq!(fields.bottom_text, "Your Text Here");
        assert_eq!(fields.photo, None);
        assert_eq!(fields.background_color.as_str(), "#000");
        assert_eq!(fields.font_family, FontFamily::Arial);
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::newline("\n")]
    fn blank_texts_fall_back_to_placeholders(#[case] blank: &str) {
        let fields = CardFields::default()
            .with_title(blank)
            .with_bottom_text(blank)
            .normalized();

        assert_eq!(fields.title, DEFAULT_TITLE);
        assert_eq!(fields.bottom_text, DEFAULT_BOTTOM_TEXT);
    }

    #[test]
    fn normalize_keeps_user_text() {
        let fields = CardFields::default()
            .with_title("Happy 30th!")
            .with_bottom_text("From all of us")
            .normalized();

        assert_eq!(fields.title, "Happy 30th!");
        assert_eq!(fields.bottom_text, "From all of us");
    }

    #[test]
    fn empty_photo_means_no_photo() {
        let fields = CardFields::default()
            .with_photo(Some(String::new()))
            .normalized();
        assert_eq!(fields.photo, None);

        let fields = CardFields::default()
            .with_photo(Some("file:///tmp/cake.jpg".to_string()))
            .normalized();
        assert_eq!(fields.photo.as_deref(), Some("file:///tmp/cake.jpg"));
    }

    #[rstest]
    #[case::hex("#FF6347", Some(Swatch::Tomato))]
    #[case::lower_hex("#ff1493", Some(Swatch::DeepPink))]
    #[case::name("gray", Some(Swatch::Gray))]
    #[case::short_black("#000", None)]
    #[case::custom("rebeccapurple", None)]
    fn swatch_recognition(#[case] raw: &str, #[case] expected: Option<Swatch>) {
        assert_eq!(BackgroundColor::new(raw).swatch(), expected);
    }

    #[test]
    fn user_input_expands_swatch_names() {
        assert_eq!(
            BackgroundColor::from_user_input("DeepSkyBlue").as_str(),
            "#00BFFF"
        );
        assert_eq!(BackgroundColor::from_user_input("#123456").as_str(), "#123456");
    }

    #[rstest]
    #[case::exact("Arial", FontFamily::Arial)]
    #[case::lower("courier", FontFamily::Courier)]
    #[case::spaced("Times New Roman", FontFamily::TimesNewRoman)]
    #[case::padded(" verdana ", FontFamily::Verdana)]
    fn font_parsing(#[case] raw: &str, #[case] expected: FontFamily) {
        assert_eq!(raw.parse::<FontFamily>().unwrap(), expected);
    }

    #[test]
    fn unknown_font_is_invalid_field() {
        let result = "Comic Sans".parse::<FontFamily>();
        assert!(matches!(result, Err(StoreError::InvalidField(_))));
    }

    #[test]
    fn card_serializes_with_camel_case_keys() {
        let card = Card::new(
            CardId::new("1"),
            CardFields::default().with_font_family(FontFamily::TimesNewRoman),
        );

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "1",
                "photo": null,
                "title": "Happy Birthday",
                "bottomText": "Your Text Here",
                "backgroundColor": "#000",
                "fontFamily": "Times New Roman",
            })
        );
    }

    #[test]
    fn fields_roundtrip_through_card() {
        let fields = CardFields::default()
            .with_title("Hi")
            .with_background_color(Swatch::Chocolate);
        let card = Card::new(CardId::new("x"), fields.clone());

        assert_eq!(card.fields(), fields);
        assert_eq!(card.id().as_str(), "x");
    }
}
