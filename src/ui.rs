use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use crate::app::{App, FocusPane, InputMode};
use crate::chat::Author;
use crate::profile::{self, HIGHLIGHTS, SOCIAL_LINKS};
use unicode_width::UnicodeWidthChar;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, profile + chat, bio, highlights, footer
    let [header_area, top_area, bio_area, highlights_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(12),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);

    let [profile_area, chat_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(top_area);

    render_profile(app, frame, profile_area);
    render_chat(app, frame, chat_area);
    render_bio(app, frame, bio_area);
    render_highlights(app, frame, highlights_area);
    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", profile::NAME), Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::Black));
    frame.render_widget(header, area);
}

fn render_profile(app: &App, frame: &mut Frame, area: Rect) {
    let links_focused = app.focus == FocusPane::Links;
    let border_color = if links_focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", profile::NAME))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [portrait_area, links_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    // No images in a terminal, so the asset is named in a framed placeholder
    let portrait = Paragraph::new(Text::from(vec![
        Line::default(),
        Line::from(Span::styled("Software Engineer · Indie Developer", Style::default().fg(Color::Yellow))),
        Line::default(),
        Line::from(Span::styled(
            format!("[ {} ]", profile::PORTRAIT),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(portrait, portrait_area);

    let mut spans = Vec::new();
    for (i, link) in SOCIAL_LINKS.iter().enumerate() {
        let style = if links_focused && i == app.selected_link {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} {} ", link.icon, link.name), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        links_area,
    );
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let [transcript_area, input_row] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    let transcript_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Chat ");

    let inner = transcript_block.inner(transcript_area);
    app.chat_area = Some(transcript_area);
    app.chat_height = inner.height;

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.chat.messages() {
        let (label_style, text_style) = match msg.author {
            Author::Josh => (
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                Style::default(),
            ),
            Author::You => (
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Cyan),
            ),
        };
        lines.push(Line::from(Span::styled(msg.author.label(), label_style)));
        lines.push(Line::from(Span::styled(msg.text.as_str(), text_style)));
        lines.push(Line::default());
    }

    if app.chat.is_loading() {
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Josh is typing{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    // Count rows with the same word wrapping the paragraph renders with
    let transcript = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    app.chat_lines = transcript.line_count(inner.width).min(u16::MAX as usize) as u16;
    app.chat_scroll = app.chat_scroll.min(app.max_chat_scroll());

    let transcript = transcript
        .block(transcript_block)
        .scroll((app.chat_scroll, 0));
    frame.render_widget(transcript, transcript_area);

    render_input(app, frame, input_row);
}

fn render_input(app: &mut App, frame: &mut Frame, area: Rect) {
    let [input_area, send_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(5),
    ])
    .areas(area);
    app.send_area = Some(send_area);

    let enabled = app.chat.accepts_input();
    let editing = app.input_mode == InputMode::Editing && app.focus == FocusPane::Input;

    let border_color = if !enabled {
        Color::DarkGray
    } else if editing {
        Color::Yellow
    } else if app.focus == FocusPane::Input {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let title = if app.chat.is_closed() {
        " Chat closed "
    } else if app.chat.is_loading() {
        " Waiting... "
    } else {
        " Ask "
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let inner_width = input_area.width.saturating_sub(2) as usize;
    let (visible_text, cursor_x) = input_window(&app.chat.input, app.chat.cursor, inner_width);

    let text_color = if enabled { Color::Cyan } else { Color::DarkGray };
    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(text_color))
        .block(input_block);
    frame.render_widget(input, input_area);

    let send_style = if enabled {
        Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let send = Paragraph::new(Span::styled(" → ", send_style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(send, send_area);

    if editing && enabled {
        frame.set_cursor_position((input_area.x + cursor_x + 1, input_area.y + 1));
    }
}

/// Slice of `input` that fits in `width` columns with the cursor kept in view,
/// plus the cursor's column inside that slice. Widths are display columns, so
/// CJK characters count double.
fn input_window(input: &str, cursor: usize, width: usize) -> (String, u16) {
    if width == 0 {
        return (String::new(), 0);
    }

    let chars: Vec<char> = input.chars().collect();
    let cursor = cursor.min(chars.len());
    let char_width = |c: &char| c.width().unwrap_or(0);

    // Drop leading characters until the text before the cursor leaves a
    // column free for the cursor itself.
    let mut start = 0;
    let mut before: usize = chars[..cursor].iter().map(char_width).sum();
    while before >= width && start < cursor {
        before -= char_width(&chars[start]);
        start += 1;
    }

    let mut used = 0;
    let visible: String = chars[start..]
        .iter()
        .take_while(|c| {
            used += char_width(*c);
            used <= width
        })
        .collect();

    (visible, before.min(u16::MAX as usize) as u16)
}

fn render_bio(app: &App, frame: &mut Frame, area: Rect) {
    let Some(bio) = profile::bio(app.locale) else {
        return;
    };

    let paragraph = Paragraph::new(Span::styled(
        bio,
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP | Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}

fn render_highlights(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Highlights;
    let cells = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    for (i, (highlight, cell)) in HIGHLIGHTS.iter().zip(cells.iter()).enumerate() {
        let selected = focused && i == app.selected_highlight;
        let border_color = if selected { Color::Cyan } else { Color::DarkGray };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let label_style = if selected {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let card = Paragraph::new(Text::from(vec![
            Line::from(Span::styled(
                format!("[ {} ]", highlight.image),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(highlight.label, label_style)),
            Line::from(Span::styled(highlight.href, Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED))),
        ]))
        .alignment(Alignment::Center)
        .block(block);

        frame.render_widget(card, *cell);
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Black).bg(Color::Gray);
    let label_style = Style::default().fg(Color::Gray);

    let (mode_text, mode_style) = match app.input_mode {
        InputMode::Normal => (" NORMAL ", Style::default().fg(Color::Black).bg(Color::Blue).bold()),
        InputMode::Editing => (" TYPING ", Style::default().fg(Color::Black).bg(Color::Yellow).bold()),
    };

    let hints: Vec<Span> = match app.input_mode {
        InputMode::Editing => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled(" links ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" stop typing ", label_style),
        ],
        InputMode::Normal => {
            let mut hints = vec![
                Span::styled(" Tab ", key_style),
                Span::styled(" focus ", label_style),
            ];
            if app.focus != FocusPane::Input {
                hints.extend(vec![
                    Span::styled(" ←→ ", key_style),
                    Span::styled(" select ", label_style),
                    Span::styled(" Enter ", key_style),
                    Span::styled(" open ", label_style),
                ]);
            }
            if app.chat.accepts_input() {
                hints.extend(vec![
                    Span::styled(" i ", key_style),
                    Span::styled(" type ", label_style),
                ]);
            } else if app.chat.is_closed() {
                hints.push(Span::styled(" chat closed ", Style::default().fg(Color::DarkGray)));
            }
            hints.extend(vec![
                Span::styled(" q ", key_style),
                Span::styled(" quit ", label_style),
            ]);
            hints
        }
    };

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}
