use super::types::RowKind;

const PAGE_SIZE: usize = 10;

impl super::ChecklistScreen {
    pub fn focused_kind(&self) -> Option<RowKind> {
        self.rows.get(self.cursor).map(|row| row.kind)
    }

    /// Section of the header or item under the cursor.
    pub fn focused_section(&self) -> Option<usize> {
        self.focused_kind().and_then(|kind| kind.section())
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.update_scroll();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor < self.rows.len().saturating_sub(1) {
            self.cursor += 1;
            self.update_scroll();
        }
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(PAGE_SIZE);
        self.update_scroll();
    }

    pub fn page_down(&mut self) {
        self.cursor = (self.cursor + PAGE_SIZE).min(self.rows.len().saturating_sub(1));
        self.update_scroll();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
        self.update_scroll();
    }

    /// Moves from an item to the header of its section.
    pub fn move_to_section_header(&mut self) {
        let Some(RowKind::Item { section, .. }) = self.focused_kind() else {
            return;
        };
        if let Some(index) = self.position_of(RowKind::Section(section)) {
            log::debug!("checklist: moved to section header at row {index}");
            self.cursor = index;
            self.update_scroll();
        }
    }

    pub fn update_scroll(&mut self) {
        self.update_scroll_with_height(self.current_visible_height);
    }

    /// Keeps the cursor out of the top and bottom quarter of the viewport.
    pub fn update_scroll_with_height(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }

        let max_offset = self.rows.len().saturating_sub(visible_height);
        let top_zone = visible_height / 4;
        let bottom_zone = visible_height.saturating_sub(visible_height / 4);
        let target_from_top = (visible_height * 3) / 4;

        let position = self.cursor.saturating_sub(self.scroll_offset);

        if self.cursor < self.scroll_offset || position < top_zone {
            self.scroll_offset = self.cursor.saturating_sub(top_zone);
        } else if self.cursor >= self.scroll_offset + visible_height || position >= bottom_zone {
            self.scroll_offset = self.cursor.saturating_sub(target_from_top);
        }

        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}
