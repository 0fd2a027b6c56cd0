use ratatui::layout::Rect;

pub(super) fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = area.width.saturating_mul(width_percent).saturating_div(100);
    let min_width = 10.min(area.width);
    let width = width.max(min_width).min(area.width);

    let min_height = 3.min(area.height);
    let height = height.max(min_height).min(area.height);

    let x = area.x + (area.width.saturating_sub(width) / 2);
    let y = area.y + (area.height.saturating_sub(height) / 2);

    Rect::new(x, y, width, height)
}

pub(super) fn rect_contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Splits `available` columns into navigator, content and assistant widths.
pub(super) fn panel_widths(available: u16) -> (u16, u16, u16) {
    let nav = available
        .saturating_mul(super::NAVIGATOR_WIDTH_PERCENT)
        .saturating_div(100);
    let content = available
        .saturating_mul(super::CONTENT_WIDTH_PERCENT)
        .saturating_div(100);
    let assistant = available.saturating_sub(nav).saturating_sub(content);
    (nav, content, assistant)
}
