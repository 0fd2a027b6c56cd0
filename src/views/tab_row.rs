use crate::kernel::Document;
use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const PADDING_LEFT: u16 = 1;
const PADDING_RIGHT: u16 = 1;
const CLOSE_BUTTON_WIDTH: u16 = 2;
const DIVIDER_WIDTH: u16 = 1;

pub const CLOSE_GLYPH: &str = "×";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabRowSlot {
    pub index: usize,
    pub start: u16,
    pub end: u16,
    pub title_x: u16,
    pub title_width: u16,
    pub close_start: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRowLayout {
    pub slots: Vec<TabRowSlot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabHit {
    Select(usize),
    Close(usize),
}

impl TabRowLayout {
    pub fn hit_test(&self, x: u16) -> Option<TabHit> {
        let slot = self.slots.iter().find(|s| x >= s.start && x < s.end)?;
        if x >= slot.close_start {
            Some(TabHit::Close(slot.index))
        } else {
            Some(TabHit::Select(slot.index))
        }
    }
}

/// Lays out one tab per open document; every tab carries a close button.
pub fn compute_tab_row_layout(area: Rect, docs: &[Document]) -> TabRowLayout {
    if area.width == 0 || area.height == 0 || docs.is_empty() {
        return TabRowLayout { slots: Vec::new() };
    }

    let preferred: Vec<usize> = docs
        .iter()
        .map(|d| UnicodeWidthStr::width(d.name.as_str()))
        .collect();
    let fixed = docs.len().saturating_sub(1) * DIVIDER_WIDTH as usize
        + docs.len() * (PADDING_LEFT + PADDING_RIGHT + CLOSE_BUTTON_WIDTH) as usize;
    let budget = (area.width as usize).saturating_sub(fixed);
    let widths = allocate_title_widths(&preferred, budget);

    let right = area.x.saturating_add(area.width);
    let mut x = area.x;
    let mut slots = Vec::with_capacity(docs.len());

    for index in 0..docs.len() {
        if x >= right {
            break;
        }
        let start = x;
        x = x.saturating_add(PADDING_LEFT).min(right);

        let title_x = x;
        let title_width = (widths.get(index).copied().unwrap_or(0).min(u16::MAX as usize) as u16)
            .min(right.saturating_sub(title_x));
        x = x.saturating_add(title_width).min(right);
        x = x.saturating_add(PADDING_RIGHT).min(right);

        let close_start = x;
        x = x.saturating_add(CLOSE_BUTTON_WIDTH).min(right);

        slots.push(TabRowSlot {
            index,
            start,
            end: x,
            title_x,
            title_width,
            close_start,
        });

        if index + 1 < docs.len() {
            x = x.saturating_add(DIVIDER_WIDTH).min(right);
        }
    }

    TabRowLayout { slots }
}

/// Byte length of the longest prefix of `s` that fits in `max_width` columns.
pub(crate) fn truncate_to_width(s: &str, max_width: usize) -> usize {
    if max_width == 0 || s.is_empty() {
        return 0;
    }

    let mut used = 0usize;
    let mut end = 0usize;
    for (idx, ch) in s.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        end = idx + ch.len_utf8();
    }

    end
}

pub fn ellipsize_title(title: &str, max_width: u16) -> String {
    let max_width = max_width as usize;
    if max_width == 0 {
        return String::new();
    }

    if UnicodeWidthStr::width(title) <= max_width {
        return title.to_string();
    }

    if max_width == 1 {
        return "…".to_string();
    }

    let keep = truncate_to_width(title, max_width - 1);
    if keep == 0 {
        return "…".to_string();
    }

    let mut out = String::with_capacity(keep + 3);
    out.push_str(&title[..keep]);
    out.push('…');
    out
}

fn allocate_title_widths(preferred: &[usize], budget: usize) -> Vec<usize> {
    let mut widths = vec![0; preferred.len()];
    let mut remaining = budget;

    for width in &mut widths {
        if remaining == 0 {
            break;
        }
        *width = 1;
        remaining -= 1;
    }

    if remaining == 0 {
        return widths;
    }

    let mut needs: Vec<usize> = preferred
        .iter()
        .zip(widths.iter())
        .map(|(preferred, assigned)| preferred.saturating_sub(*assigned))
        .collect();

    while remaining > 0 {
        let mut progressed = false;
        for (width, need) in widths.iter_mut().zip(needs.iter_mut()) {
            if *need == 0 {
                continue;
            }
            *width += 1;
            *need -= 1;
            remaining -= 1;
            progressed = true;
            if remaining == 0 {
                break;
            }
        }
        if !progressed {
            break;
        }
    }

    widths
}

#[cfg(test)]
#[path = "../../tests/unit/views/tab_row.rs"]
mod tests;
