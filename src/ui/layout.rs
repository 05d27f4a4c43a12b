use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

/// Top-level screen split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRegions {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Header and footer keep their height while they fit; the header wins on
/// very small terminals.
pub fn screen_regions(area: Rect) -> ScreenRegions {
    let header_height = HEADER_HEIGHT.min(area.height);
    let footer_height = FOOTER_HEIGHT.min(area.height - header_height);
    let body_height = area.height - header_height - footer_height;

    let row = |y: u16, height: u16| Rect::new(area.x, y, area.width, height);
    ScreenRegions {
        header: row(area.y, header_height),
        body: row(area.y + header_height, body_height),
        footer: row(area.y + header_height + body_height, footer_height),
    }
}

/// Splits the body into greeting, editor, suggestions and status rows,
/// horizontally centered with at most `max_width` columns.
pub fn body_regions(body: Rect, editor_height: u16, max_width: u16) -> [Rect; 4] {
    let width = body.width.min(max_width);
    let column = Rect {
        x: body.x + body.width.saturating_sub(width) / 2,
        y: body.y,
        width,
        height: body.height,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .flex(Flex::Center)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(editor_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(column);

    [rows[0], rows[1], rows[2], rows[3]]
}

/// A `width` x `height` rect centered in `area`, clipped to it.
pub fn centered_rect_by_size(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
