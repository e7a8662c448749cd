//! Pipeline options and configuration.

/// Number of leading pages scanned for font statistics and the title.
pub const DEFAULT_TITLE_SCAN_PAGES: usize = 3;

/// Number of ranked chunks kept in an analysis.
pub const DEFAULT_TOP_K: usize = 10;

/// Maximum length, in characters, of a section title.
pub const DEFAULT_TITLE_CHARS: usize = 80;

/// How a failing document or page is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort the run on the first unreadable document or page
    #[default]
    Strict,
    /// Log a warning and skip the document or page
    Lenient,
}

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Leading pages that feed the font statistics and title detection
    pub title_scan_pages: usize,

    /// Error handling mode
    pub error_mode: ErrorMode,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many leading pages are scanned for the title.
    pub fn with_title_scan_pages(mut self, pages: usize) -> Self {
        self.title_scan_pages = pages;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip unreadable documents and pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            title_scan_pages: DEFAULT_TITLE_SCAN_PAGES,
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Options for relevance ranking.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// How many chunks survive ranking
    pub top_k: usize,

    /// Hard truncation length for section titles
    pub title_chars: usize,

    /// Error handling mode
    pub error_mode: ErrorMode,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of chunks kept.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the section title truncation length.
    pub fn with_title_chars(mut self, chars: usize) -> Self {
        self.title_chars = chars;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip unreadable documents instead of failing.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            title_chars: DEFAULT_TITLE_CHARS,
            error_mode: ErrorMode::Strict,
        }
    }
}
