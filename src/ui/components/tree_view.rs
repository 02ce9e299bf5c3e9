//! Technique tree view.
//!
//! Flattens the taxonomy tree into depth-styled lines. The structure of each
//! node is decided once via [`NodeKind`] and dispatched by pattern matching:
//! categories and subcategories are headings, depth-2 groupings keep the same
//! recursive shape, and everything else renders as a leaf item with notes,
//! resource links, media, and any nested children below it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::config::UiConfig;
use crate::constants::TREE_INDENT;
use crate::techniques::{MediaItem, NodeKind, TechniqueNode, TechniqueTreeData};
use crate::ui::core::{Action, Component};

pub struct TreeViewComponent {
    data: Option<TechniqueTreeData>,
    loading: bool,
    error: Option<String>,
    items: Vec<ListItem<'static>>,
    list_state: ListState,
    show_media: bool,
    show_notes: bool,
}

impl TreeViewComponent {
    pub fn new(ui_config: &UiConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            data: None,
            loading: true,
            error: None,
            items: Vec::new(),
            list_state,
            show_media: ui_config.show_media,
            show_notes: ui_config.show_notes,
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn update_data(&mut self, data: TechniqueTreeData) {
        self.loading = false;
        self.error = None;
        self.items = self.flatten(&data);
        self.data = Some(data);
        let last = self.items.len().saturating_sub(1);
        if self.list_state.selected().unwrap_or(0) > last {
            self.list_state.select(Some(last));
        }
    }

    fn flatten(&self, data: &TechniqueTreeData) -> Vec<ListItem<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::from(Span::styled(
            format!("{} techniques", data.technique_count()),
            Style::default().fg(Color::DarkGray),
        )));
        for category in &data.tree {
            lines.push(Line::default());
            self.push_node(category, 0, &mut lines);
        }
        lines.into_iter().map(ListItem::new).collect()
    }

    fn push_node(&self, node: &TechniqueNode, depth: usize, out: &mut Vec<Line<'static>>) {
        let indent = " ".repeat(depth * TREE_INDENT);
        match NodeKind::of(node, depth) {
            NodeKind::Category => {
                out.push(Line::from(Span::styled(
                    format!("{}{}", indent, node.title),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )));
                self.push_media(&node.media, depth + 1, out);
                for child in &node.children {
                    self.push_node(child, depth + 1, out);
                }
            }
            NodeKind::Subcategory => {
                let mut spans = vec![Span::styled(
                    format!("{}{}", indent, node.title),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )];
                if self.show_notes {
                    if let Some(notes) = &node.notes {
                        spans.push(Span::styled(format!("  {notes}"), Style::default().fg(Color::DarkGray)));
                    }
                }
                out.push(Line::from(spans));
                // Media and children form one combined list under the heading
                self.push_media(&node.media, depth + 1, out);
                for child in &node.children {
                    self.push_node(child, depth + 1, out);
                }
            }
            NodeKind::Group => {
                out.push(Line::from(Span::styled(
                    format!("{}{}", indent, node.title),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                self.push_media(&node.media, depth + 1, out);
                for child in &node.children {
                    self.push_node(child, depth + 1, out);
                }
            }
            NodeKind::Leaf => {
                let mut spans = vec![Span::raw(format!("{indent}• {}", node.title))];
                if self.show_notes {
                    if let Some(notes) = &node.notes {
                        spans.push(Span::styled(
                            format!(" — {notes}"),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
                for resource in &node.resources {
                    // seed_title is the link text when present, the node's
                    // own title otherwise
                    let text = resource.seed_title.as_deref().unwrap_or(&node.title);
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        format!("[{text}]"),
                        Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                    ));
                }
                out.push(Line::from(spans));
                self.push_media(&node.media, depth + 1, out);
                // A leaf can still carry nested children, handled generically
                for child in &node.children {
                    self.push_node(child, depth + 1, out);
                }
            }
        }
    }

    fn push_media(&self, media: &[MediaItem], depth: usize, out: &mut Vec<Line<'static>>) {
        if !self.show_media {
            return;
        }
        let indent = " ".repeat(depth * TREE_INDENT);
        for item in media {
            out.push(Line::from(vec![
                Span::styled(format!("{indent}▶ "), Style::default().fg(Color::Magenta)),
                Span::raw(item.title.clone()),
                Span::styled(format!("  {}", item.url), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    fn scroll(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, last as isize) as usize;
        self.list_state.select(Some(next));
    }
}

impl Component for TreeViewComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::ScrollToTop,
            KeyCode::Char('G') | KeyCode::End => Action::ScrollToBottom,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ScrollDown => {
                self.scroll(1);
                Action::None
            }
            Action::ScrollUp => {
                self.scroll(-1);
                Action::None
            }
            Action::ScrollToTop => {
                self.list_state.select(Some(0));
                Action::None
            }
            Action::ScrollToBottom => {
                self.list_state.select(Some(self.items.len().saturating_sub(1)));
                Action::None
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Techniques ");

        if self.loading {
            let paragraph = Paragraph::new("Loading techniques...")
                .block(block)
                .style(Style::default().fg(Color::Yellow));
            f.render_widget(paragraph, rect);
            return;
        }

        if let Some(message) = &self.error {
            let paragraph = Paragraph::new(message.clone())
                .block(block)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, rect);
            return;
        }

        let list = List::new(self.items.clone())
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(list, rect, &mut self.list_state);
    }
}
