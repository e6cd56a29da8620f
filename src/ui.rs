use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use crate::appearance::{Font, Theme};
use crate::model::{PopupView, UIData};

pub const TOOLBAR_HEIGHT: usize = 1;
pub const TABLE_HEADER_HEIGHT: usize = 1;
pub const STATUSLINE_HEIGHT: usize = 1;
pub const COLUMN_WIDTH_MARGIN: usize = 2;

const EMPTY_MESSAGE: &str = "No Data Found";
const EMPTY_DESCRIPTION: &str = "There are no records to display at the moment";
const SPINNER_UNICODE: &[&str] = &["◐", "◓", "◑", "◒"];
const SPINNER_ASCII: &[&str] = &["|", "/", "-", "\\"];

/// Colors derived from the selected theme. `System` leaves the terminal's
/// own palette in place.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::DarkGray,
            },
            Theme::Dark => Palette {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::Gray,
            },
            Theme::System => Palette {
                fg: Color::Reset,
                bg: Color::Reset,
                accent: Color::Cyan,
                muted: Color::DarkGray,
            },
        }
    }
}

/// A terminal cannot switch font families, so the font preference selects
/// the glyph set: unicode for sans, plain ASCII for mono.
pub fn glyph(font: Font, s: &str) -> String {
    match font {
        Font::Sans => s.to_string(),
        Font::Mono => s
            .chars()
            .map(|c| match c {
                '▏' | '▍' => '|',
                '▋' | '█' => '#',
                '◌' => 'o',
                '✓' => 'v',
                '✗' => 'x',
                '➤' | '▷' => '>',
                '▤' => '=',
                '✎' => '*',
                '⋯' => '.',
                '⌕' => '?',
                c if c.is_ascii() => c,
                _ => '?',
            })
            .collect(),
    }
}

pub struct DashboardUI {
    spinner_idx: usize,
}

impl DashboardUI {
    pub fn new() -> Self {
        Self { spinner_idx: 0 }
    }

    pub fn draw(&mut self, data: &UIData, frame: &mut Frame) {
        let palette = Palette::for_theme(data.theme);
        let base = Style::default().fg(palette.fg).bg(palette.bg);
        frame.render_widget(Block::default().style(base), frame.area());

        let [toolbar_area, header_area, table_area, status_area] = Layout::vertical([
            Constraint::Length(TOOLBAR_HEIGHT as u16),
            Constraint::Length(TABLE_HEADER_HEIGHT as u16),
            Constraint::Min(1),
            Constraint::Length(STATUSLINE_HEIGHT as u16),
        ])
        .areas(frame.area());

        self.draw_toolbar(data, &palette, frame, toolbar_area);
        self.draw_header(data, &palette, frame, header_area);
        if data.rows.is_empty() {
            self.draw_empty_state(data, &palette, frame, table_area);
        } else {
            self.draw_rows(data, &palette, frame, table_area);
        }
        self.draw_statusline(data, &palette, frame, status_area);
        self.draw_popup(data, &palette, frame);
    }

    fn draw_toolbar(&self, data: &UIData, palette: &Palette, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        let search_style = if data.searching {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.fg)
        };
        spans.push(Span::styled(
            format!(
                "{} {:<24}",
                glyph(data.font, "⌕"),
                if data.search.input.is_empty() && !data.searching {
                    "Search documents...".to_string()
                } else {
                    data.search.input.clone()
                }
            ),
            search_style,
        ));

        for (title, selected) in &data.facet_chips {
            let chip = if *selected > 0 {
                format!(" [{title} ({selected})]")
            } else {
                format!(" [{title}]")
            };
            spans.push(Span::styled(chip, Style::default().fg(palette.accent)));
        }
        if data.is_filtered {
            spans.push(Span::styled(
                " [Reset ✕]".to_string(),
                Style::default().fg(palette.muted),
            ));
        }
        spans.push(Span::styled(
            format!(
                "  [Export] [{} {}] [View]",
                glyph(data.font, data.add_icon),
                data.add_title
            ),
            Style::default().fg(palette.fg),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_header(&self, data: &UIData, palette: &Palette, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for (title, width) in &data.header {
            spans.push(Span::styled(
                format!("{:<width$}", clip(title, *width), width = width + 1),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_rows(&self, data: &UIData, palette: &Palette, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        for (ridx, row) in data.rows.iter().enumerate().take(area.height as usize) {
            let style = if ridx == data.selected_row {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let mut spans: Vec<Span> = Vec::new();
            for (cell, (_, width)) in row.iter().zip(&data.header) {
                let text = match cell.icon {
                    Some(icon) => format!("{} {}", glyph(data.font, icon), cell.text),
                    None => glyph(data.font, &cell.text),
                };
                spans.push(Span::styled(
                    format!("{:<width$}", clip(&text, *width), width = width + 1),
                    style,
                ));
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Centered empty-state panel with a frame-stepped glyph standing in
    /// for the lottie animation.
    fn draw_empty_state(&mut self, data: &UIData, palette: &Palette, frame: &mut Frame, area: Rect) {
        let frames = match data.font {
            Font::Mono => SPINNER_ASCII,
            Font::Sans => SPINNER_UNICODE,
        };
        self.spinner_idx = (self.spinner_idx + 1) % frames.len();
        let lines = vec![
            Line::from(""),
            Line::from(frames[self.spinner_idx]).centered(),
            Line::from(""),
            Line::from(Span::styled(
                EMPTY_MESSAGE,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(
                EMPTY_DESCRIPTION,
                Style::default().fg(palette.muted),
            ))
            .centered(),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered()),
            centered_rect(area, 52, 7),
        );
    }

    fn draw_statusline(&self, data: &UIData, palette: &Palette, frame: &mut Frame, area: Rect) {
        let left = if data.status_message.is_empty() {
            data.hint.clone()
        } else {
            data.status_message.clone()
        };
        let right = format!("{}/{} documents", data.nrows_visible, data.nrows_total);
        let pad = (area.width as usize).saturating_sub(left.len() + right.len());
        let line = Line::from(vec![
            Span::raw(left),
            Span::raw(" ".repeat(pad)),
            Span::styled(right, Style::default().fg(palette.muted)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_popup(&self, data: &UIData, palette: &Palette, frame: &mut Frame) {
        let area = frame.area();
        let (title, lines): (String, Vec<Line>) = match &data.popup {
            PopupView::None => return,
            PopupView::Facet { title, options, cursor } => {
                let lines = options
                    .iter()
                    .enumerate()
                    .map(|(idx, opt)| {
                        let marker = if opt.selected { "[x]" } else { "[ ]" };
                        let style = if idx == *cursor {
                            Style::default().add_modifier(Modifier::REVERSED)
                        } else {
                            Style::default()
                        };
                        Line::from(Span::styled(
                            format!("{marker} {} ({})", opt.label, opt.count),
                            style,
                        ))
                    })
                    .collect();
                (format!(" {title} "), lines)
            }
            PopupView::ViewOptions { options, cursor } => {
                let lines = options
                    .iter()
                    .enumerate()
                    .map(|(idx, (name, visible))| {
                        let marker = if *visible { "[x]" } else { "[ ]" };
                        let style = if idx == *cursor {
                            Style::default().add_modifier(Modifier::REVERSED)
                        } else {
                            Style::default()
                        };
                        Line::from(Span::styled(format!("{marker} {name}"), style))
                    })
                    .collect();
                (" Toggle columns ".to_string(), lines)
            }
            PopupView::Dialog { icon, prompt } => {
                let lines = vec![
                    Line::from(format!("{} {}", glyph(data.font, icon), prompt)),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Enter to confirm, Esc to close",
                        Style::default().fg(palette.muted),
                    )),
                ];
                (" Add document ".to_string(), lines)
            }
            PopupView::Appearance { font, theme, focus_font, font_error, theme_error } => {
                let field = |name: &str, value: &str, focused: bool, error: &Option<String>| {
                    let style = if focused {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    let mut lines = vec![Line::from(Span::styled(
                        format!("{name}: < {value} >"),
                        style,
                    ))];
                    if let Some(msg) = error {
                        lines.push(Line::from(Span::styled(
                            format!("  {msg}"),
                            Style::default().fg(Color::Red),
                        )));
                    }
                    lines
                };
                let mut lines = field("Font ", font, *focus_font, font_error);
                lines.extend(field("Theme", theme, !focus_font, theme_error));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "←/→ change, ↑/↓ switch field, Enter save",
                    Style::default().fg(palette.muted),
                )));
                (" Appearance ".to_string(), lines)
            }
            PopupView::Help(text) => (
                " Help ".to_string(),
                text.lines().map(|l| Line::from(l.to_string())).collect(),
            ),
        };

        let height = (lines.len() + 2).min(area.height as usize) as u16;
        let popup_area = centered_rect(area, 46, height);
        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered().title(title)),
            popup_area,
        );
    }
}

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width < 3 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
