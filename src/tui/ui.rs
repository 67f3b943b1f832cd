use crate::storage::KeyValueStore;
use crate::tui::app::App;
use crate::tui::navigation::Focus;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search and category
            Constraint::Min(0),    // Items and favorites
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);
    draw_controls(frame, chunks[1], app);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .split(chunks[2]);

    draw_item_list(frame, main[0], app);
    draw_favorites_panel(frame, main[1], app);
    draw_footer(frame, chunks[3], app);

    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_header<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let header_text = format!("Club Library - {}", app.storage_label);
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("Bookshelf"))
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(header, area);
}

fn draw_controls<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let (search_text, search_border) = if app.search.search_mode {
        let (before_cursor, after_cursor) = app.search.split_at_cursor();
        (
            format!("{}█{}", before_cursor, after_cursor),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if app.store.search_text().is_empty() {
        (
            "Search by title... (/)".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.store.search_text().to_string(), Style::default())
    };

    let search = Paragraph::new(search_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(search_border),
    );
    frame.render_widget(search, chunks[0]);

    let category = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.store.selected_category().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Category (←/→)"));
    frame.render_widget(category, chunks[1]);
}

fn panel_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border)
}

fn draw_item_list<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let visible = app.store.filtered_items();
    let focused = app.navigation.focus == Focus::Items;
    let block = panel_block(format!("Books ({})", visible.len()), focused);

    if visible.is_empty() {
        let empty = Paragraph::new("No matching items.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|item| {
            let is_favorite = app.store.is_favorite(item.id);
            let marker = if is_favorite { "♥" } else { " " };
            let title_style = if is_favorite {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(Color::Magenta)),
                Span::styled(item.title.clone(), title_style),
                Span::styled(format!("  {}", item.author), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("  [{}]", item.category),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Yellow)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(app.navigation.item_index));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_favorites_panel<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let favorites = app.store.favorites();
    let focused = app.navigation.focus == Focus::Favorites;
    let block = panel_block(format!("Favorites ({})", favorites.len()), focused);

    if favorites.is_empty() {
        let empty = Paragraph::new("No favorites yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = favorites
        .iter()
        .map(|fav| {
            ListItem::new(Line::from(vec![
                Span::styled(fav.title.clone(), Style::default().fg(Color::Magenta)),
                Span::styled(format!(" - {}", fav.author), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Magenta)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(app.navigation.favorite_index));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_footer<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let footer_text = if app.search.search_mode {
        "SEARCH | type to filter | Enter/Esc: done | ←→: cursor | Backspace/Delete: edit"
            .to_string()
    } else {
        format!(
            "Search: \"{}\" | Category: {} | Favorites: {} | Enter: favorite | Tab: panel | x: clear | ?: help | q: quit",
            app.store.search_text(),
            app.store.selected_category(),
            app.store.favorite_count()
        )
    };

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = [
        "Bookshelf - Keyboard Commands",
        "",
        "BROWSING:",
        "  ↑↓ / j/k          Move selection",
        "  Tab               Switch between books and favorites",
        "  ←→ / h/l          Previous/next category",
        "",
        "SEARCH:",
        "  /                 Edit search text (Enter or Esc when done)",
        "",
        "FAVORITES:",
        "  Enter / Space     Toggle favorite (remove in favorites panel)",
        "  x                 Clear all favorites",
        "",
        "OTHER:",
        "  Esc               Back to the book list",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit application",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    let area = centered_rect(70, 70, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
