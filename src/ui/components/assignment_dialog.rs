//! Technique assignment popup.
//!
//! Resolves a target technique id — an existing node or one created on the
//! fly at category or subcategory level — and submits a media association to
//! it. The popup owns a [`SelectionState`] for its lifetime: created on open,
//! mutated by keys and by creation events coming back from the store,
//! discarded on close.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::constants::{POPUP_HEIGHT_PERCENT, POPUP_WIDTH_PERCENT};
use crate::selection::{CreationLevel, SelectionState};
use crate::techniques::{MediaInfo, TechniqueTreeData};
use crate::ui::core::{Action, Component};

/// Input focus inside the popup. Subcategory fields only exist while a
/// category is selected, mirroring the select that renders conditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusField {
    Category,
    NewCategory,
    Subcategory,
    NewSubcategory,
    Title,
}

pub struct AssignmentDialog {
    visible: bool,
    pub selection: SelectionState,
    focus: FocusField,
    tree: TechniqueTreeData,
    media: Option<MediaInfo>,
}

impl AssignmentDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            selection: SelectionState::new(),
            focus: FocusField::Category,
            tree: TechniqueTreeData::default(),
            media: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open the popup for a media item, pre-filling the title from its record.
    pub fn open(&mut self, media: Option<MediaInfo>) {
        self.visible = true;
        self.focus = FocusField::Category;
        self.selection = SelectionState::new();
        if let Some(media) = &media {
            self.selection.technique_title = media.title.clone();
        }
        self.media = media;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.selection = SelectionState::new();
    }

    /// Refresh the tree snapshot; selections keep their ids.
    pub fn update_tree(&mut self, tree: TechniqueTreeData) {
        self.tree = tree;
    }

    /// Late media load: pre-fill the title if the user has not typed one yet.
    pub fn set_media(&mut self, media: MediaInfo) {
        if self.visible && self.selection.technique_title.is_empty() {
            self.selection.technique_title = media.title.clone();
        }
        self.media = Some(media);
    }

    /// A node creation resolved; the new node becomes the selection.
    pub fn apply_created(&mut self, id: &str, level: CreationLevel) {
        if self.visible {
            self.selection.apply_created(id, level);
        }
    }

    /// A creation failed somewhere; the popup stays usable. A failed chain
    /// never reaches the association step, so the submitting flag has to be
    /// released here for the form to accept another attempt.
    pub fn creation_failed(&mut self) {
        self.selection.submitting = false;
        self.selection.clear_pending_flags();
    }

    /// Terminal association event. The popup closes on success only.
    pub fn submission_finished(&mut self, close_popup: bool) {
        self.selection.submitting = false;
        if close_popup {
            self.close();
        }
    }

    fn focus_order(&self) -> Vec<FocusField> {
        if self.selection.selected_category.is_empty() {
            vec![FocusField::Category, FocusField::NewCategory, FocusField::Title]
        } else {
            vec![
                FocusField::Category,
                FocusField::NewCategory,
                FocusField::Subcategory,
                FocusField::NewSubcategory,
                FocusField::Title,
            ]
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    /// Move the category selection through "" followed by the top-level ids.
    /// Changing the category always resets the subcategory selection.
    fn cycle_category(&mut self, forward: bool) {
        let mut options: Vec<String> = vec![String::new()];
        options.extend(self.tree.tree.iter().map(|node| node.id.clone()));
        let next = cycle_option(&options, &self.selection.selected_category, forward);
        if next != self.selection.selected_category {
            self.selection.select_category(next);
            if self.selection.selected_category.is_empty() && matches!(self.focus, FocusField::Subcategory | FocusField::NewSubcategory) {
                self.focus = FocusField::Category;
            }
        }
    }

    fn cycle_subcategory(&mut self, forward: bool) {
        let mut options: Vec<String> = vec![String::new()];
        options.extend(
            self.tree
                .subcategories(&self.selection.selected_category)
                .iter()
                .map(|node| node.id.clone()),
        );
        let next = cycle_option(&options, &self.selection.selected_subcategory, forward);
        self.selection.select_subcategory(next);
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            FocusField::NewCategory => Some(&mut self.selection.new_category_name),
            FocusField::NewSubcategory => Some(&mut self.selection.new_subcategory_name),
            FocusField::Title => Some(&mut self.selection.technique_title),
            _ => None,
        }
    }

    fn handle_enter(&mut self) -> Action {
        match self.focus {
            FocusField::NewCategory => {
                let name = self.selection.new_category_name.trim().to_string();
                if name.is_empty() || self.selection.creating_category {
                    return Action::None;
                }
                self.selection.creating_category = true;
                Action::CreateCategory {
                    title: name,
                    parent_id: None,
                }
            }
            FocusField::NewSubcategory => {
                let name = self.selection.new_subcategory_name.trim().to_string();
                if name.is_empty()
                    || self.selection.selected_category.is_empty()
                    || self.selection.creating_subcategory
                {
                    return Action::None;
                }
                self.selection.creating_subcategory = true;
                Action::CreateCategory {
                    title: name,
                    parent_id: Some(self.selection.selected_category.clone()),
                }
            }
            _ => {
                if !self.selection.can_submit() {
                    return Action::None;
                }
                // can_submit guarantees a resolvable target
                let Some(plan) = self.selection.resolve_target() else {
                    return Action::None;
                };
                self.selection.submitting = true;
                Action::Submit {
                    plan,
                    title: self.selection.technique_title.trim().to_string(),
                }
            }
        }
    }

    fn node_title(&self, id: &str) -> String {
        if let Some(category) = self.tree.category(id) {
            return category.title.clone();
        }
        for category in &self.tree.tree {
            if let Some(child) = category.children.iter().find(|node| node.id == id) {
                return child.title.clone();
            }
        }
        id.to_string()
    }

    fn field_block(&self, title: &str, field: FocusField) -> Block<'static> {
        let style = if self.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(style)
    }
}

impl Default for AssignmentDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AssignmentDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if !self.visible {
            return Action::None;
        }
        match key.code {
            KeyCode::Esc => Action::CloseAssignment,
            KeyCode::Tab => {
                self.cycle_focus(true);
                Action::None
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                Action::None
            }
            KeyCode::Down => {
                match self.focus {
                    FocusField::Category => self.cycle_category(true),
                    FocusField::Subcategory => self.cycle_subcategory(true),
                    _ => {}
                }
                Action::None
            }
            KeyCode::Up => {
                match self.focus {
                    FocusField::Category => self.cycle_category(false),
                    FocusField::Subcategory => self.cycle_subcategory(false),
                    _ => {}
                }
                Action::None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
                Action::None
            }
            KeyCode::Char(c) => {
                if let Some(input) = self.focused_input() {
                    input.push(c);
                }
                Action::None
            }
            KeyCode::Enter => self.handle_enter(),
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.visible {
            return;
        }

        let area = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT_PERCENT, rect);
        f.render_widget(Clear, area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(" Add to Techniques ")
            .title_alignment(Alignment::Center);
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let has_category = !self.selection.selected_category.is_empty();
        let constraints = if has_category {
            vec![
                Constraint::Length(3), // category select
                Constraint::Length(3), // new category input
                Constraint::Length(3), // subcategory select
                Constraint::Length(3), // new subcategory input
                Constraint::Length(3), // technique title
                Constraint::Length(2), // submit hint
                Constraint::Min(0),
            ]
        } else {
            vec![
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ]
        };
        let chunks = Layout::vertical(constraints).split(inner);

        let category_text = if has_category {
            self.node_title(&self.selection.selected_category)
        } else {
            "Select category...".to_string()
        };
        f.render_widget(
            Paragraph::new(category_text).block(self.field_block("Category (↑/↓)", FocusField::Category)),
            chunks[0],
        );

        let new_category_text = if self.selection.creating_category {
            "Creating...".to_string()
        } else if self.selection.new_category_name.is_empty() {
            "New category name...".to_string()
        } else {
            self.selection.new_category_name.clone()
        };
        f.render_widget(
            Paragraph::new(new_category_text).block(self.field_block("New category (Enter creates)", FocusField::NewCategory)),
            chunks[1],
        );

        let mut next = 2;
        if has_category {
            let subcategory_text = if self.selection.selected_subcategory.is_empty() {
                "Select subcategory...".to_string()
            } else {
                self.node_title(&self.selection.selected_subcategory)
            };
            f.render_widget(
                Paragraph::new(subcategory_text).block(self.field_block("Subcategory (↑/↓)", FocusField::Subcategory)),
                chunks[next],
            );
            next += 1;

            let new_subcategory_text = if self.selection.creating_subcategory {
                "Creating...".to_string()
            } else if self.selection.new_subcategory_name.is_empty() {
                "New subcategory name...".to_string()
            } else {
                self.selection.new_subcategory_name.clone()
            };
            f.render_widget(
                Paragraph::new(new_subcategory_text)
                    .block(self.field_block("New subcategory (Enter creates)", FocusField::NewSubcategory)),
                chunks[next],
            );
            next += 1;
        }

        f.render_widget(
            Paragraph::new(self.selection.technique_title.clone())
                .block(self.field_block("Technique title", FocusField::Title)),
            chunks[next],
        );
        next += 1;

        let submit_line = if self.selection.submitting {
            Line::from(Span::styled("Adding...", Style::default().fg(Color::Yellow)))
        } else if self.selection.can_submit() {
            Line::from(Span::styled(
                "Enter: add to techniques • Esc: close",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "Pick or create a target and give a title",
                Style::default().fg(Color::DarkGray),
            ))
        };
        f.render_widget(Paragraph::new(submit_line).alignment(Alignment::Center), chunks[next]);
    }
}

fn cycle_option(options: &[String], current: &str, forward: bool) -> String {
    let len = options.len();
    if len == 0 {
        return String::new();
    }
    let index = options.iter().position(|option| option == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    options[next].clone()
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(rect);
    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}
