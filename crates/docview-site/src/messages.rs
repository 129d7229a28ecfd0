//! Localized inline messages.

/// Fixed UI text shown in place of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    InvalidSlug,
    InvalidSlugDetail,
    ContentLoadFailed,
    LandingLoadFailed,
    NoSearchResults,
}

impl Message {
    /// Text for `lang`. Languages other than Korean get English.
    #[must_use]
    pub fn text(self, lang: &str) -> &'static str {
        let (ko, en) = match self {
            Self::InvalidSlug => ("잘못된 문서 경로입니다.", "Invalid document path."),
            Self::InvalidSlugDetail => ("잘못된 경로 형식", "Invalid slug format"),
            Self::ContentLoadFailed => (
                "문서를 불러오는 중 오류가 발생했습니다.",
                "Failed to load the document.",
            ),
            Self::LandingLoadFailed => (
                "시작 페이지를 불러오는 중 오류가 발생했습니다.",
                "Failed to load the start page.",
            ),
            Self::NoSearchResults => ("검색 결과 없음", "No results found"),
        };
        if lang == "ko" { ko } else { en }
    }
}
