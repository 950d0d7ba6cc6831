/// Transcript scroll position with an auto-follow policy.
///
/// While following, the view jumps to the newest line when content grows; a
/// manual scroll keeps its offset until then. Scrolling more than `threshold`
/// lines above the bottom stops following; scrolling back within the
/// threshold (or jumping to the latest line) resumes it.
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: u16,
    auto_scroll: bool,
    threshold: u16,
    last_total: u16,
    last_height: u16,
}

impl ScrollState {
    pub fn new(threshold: u16) -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
            threshold,
            last_total: 0,
            last_height: 0,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn is_following(&self) -> bool {
        self.auto_scroll
    }

    pub fn max_offset(total_lines: u16, available_height: u16) -> u16 {
        total_lines.saturating_sub(available_height)
    }

    pub fn distance_from_bottom(&self, total_lines: u16, available_height: u16) -> u16 {
        Self::max_offset(total_lines, available_height).saturating_sub(self.offset)
    }

    /// Reconcile with the current content size. Call before every render.
    /// Only growth (more lines, or a shorter area) moves a following view;
    /// otherwise the offset is just clamped.
    pub fn sync(&mut self, total_lines: u16, available_height: u16) {
        let max = Self::max_offset(total_lines, available_height);
        let grew = total_lines > self.last_total || available_height < self.last_height;
        if self.auto_scroll && grew {
            self.offset = max;
        } else {
            self.offset = self.offset.min(max);
        }
        self.remember(total_lines, available_height);
    }

    /// Whether the "scroll to latest" affordance should be shown.
    pub fn shows_jump_to_latest(&self, total_lines: u16, available_height: u16) -> bool {
        !self.auto_scroll && self.distance_from_bottom(total_lines, available_height) > 0
    }

    pub fn scroll_up(&mut self, lines: u16, total_lines: u16, available_height: u16) {
        self.offset = self.offset.saturating_sub(lines);
        self.update_follow(total_lines, available_height);
    }

    pub fn scroll_down(&mut self, lines: u16, total_lines: u16, available_height: u16) {
        let max = Self::max_offset(total_lines, available_height);
        self.offset = self.offset.saturating_add(lines).min(max);
        self.update_follow(total_lines, available_height);
    }

    /// Page up by one output area minus one line of overlap.
    pub fn page_up(&mut self, total_lines: u16, available_height: u16) {
        let step = available_height.saturating_sub(1).max(1);
        self.scroll_up(step, total_lines, available_height);
    }

    pub fn page_down(&mut self, total_lines: u16, available_height: u16) {
        let step = available_height.saturating_sub(1).max(1);
        self.scroll_down(step, total_lines, available_height);
    }

    pub fn scroll_to_top(&mut self, total_lines: u16, available_height: u16) {
        self.offset = 0;
        self.update_follow(total_lines, available_height);
    }

    /// Jump to the newest line and resume following.
    pub fn scroll_to_bottom(&mut self, total_lines: u16, available_height: u16) {
        self.offset = Self::max_offset(total_lines, available_height);
        self.auto_scroll = true;
        self.remember(total_lines, available_height);
    }

    fn update_follow(&mut self, total_lines: u16, available_height: u16) {
        self.auto_scroll = self.distance_from_bottom(total_lines, available_height) <= self.threshold;
        self.remember(total_lines, available_height);
    }

    fn remember(&mut self, total_lines: u16, available_height: u16) {
        self.last_total = total_lines;
        self.last_height = available_height;
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(crate::core::config::data::DEFAULT_SCROLL_THRESHOLD)
    }
}
