use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{backend::TestBackend, Terminal};

use matwork::config::UiConfig;
use matwork::techniques::{MediaItem, TechniqueNode, TechniqueTreeData};
use matwork::ui::components::TreeViewComponent;
use matwork::ui::core::{Action, Component};

fn sample_tree() -> TechniqueTreeData {
    TechniqueTreeData {
        version: 1,
        tree: vec![TechniqueNode {
            id: "guard".to_string(),
            title: "Guard".to_string(),
            children: vec![TechniqueNode {
                id: "closed-guard".to_string(),
                title: "Closed Guard".to_string(),
                notes: Some("fundamental position".to_string()),
                children: vec![TechniqueNode {
                    id: "armbar".to_string(),
                    title: "Armbar".to_string(),
                    status: Some("active".to_string()),
                    media: vec![MediaItem {
                        friendly_token: "tok1".to_string(),
                        title: "Armbar breakdown".to_string(),
                        thumbnail_url: None,
                        url: "/view?m=tok1".to_string(),
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

fn render_to_text(view: &mut TreeViewComponent) -> String {
    let backend = TestBackend::new(60, 15);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| view.render(f, f.area())).unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_key_bindings_map_to_scroll_actions() {
    let mut view = TreeViewComponent::new(&UiConfig::default());
    assert!(matches!(
        view.handle_key_events(KeyEvent::from(KeyCode::Char('j'))),
        Action::ScrollDown
    ));
    assert!(matches!(
        view.handle_key_events(KeyEvent::from(KeyCode::Up)),
        Action::ScrollUp
    ));
    assert!(matches!(
        view.handle_key_events(KeyEvent::from(KeyCode::Char('g'))),
        Action::ScrollToTop
    ));
    assert!(matches!(
        view.handle_key_events(KeyEvent::from(KeyCode::Char('G'))),
        Action::ScrollToBottom
    ));
    assert!(matches!(
        view.handle_key_events(KeyEvent::from(KeyCode::Char('x'))),
        Action::None
    ));
}

#[test]
fn test_render_loading_state() {
    let mut view = TreeViewComponent::new(&UiConfig::default());
    let text = render_to_text(&mut view);
    assert!(text.contains("Loading techniques..."));
}

#[test]
fn test_render_error_state() {
    let mut view = TreeViewComponent::new(&UiConfig::default());
    view.set_error("You do not have access to this page.".to_string());
    let text = render_to_text(&mut view);
    assert!(text.contains("You do not have access"));
    assert!(!text.contains("Loading"));
}

#[test]
fn test_render_tree_with_count_and_nodes() {
    let mut view = TreeViewComponent::new(&UiConfig::default());
    view.update_data(sample_tree());
    let text = render_to_text(&mut view);

    assert!(text.contains("1 techniques"));
    assert!(text.contains("Guard"));
    assert!(text.contains("Closed Guard"));
    assert!(text.contains("Armbar"));
    assert!(text.contains("fundamental position"));
    assert!(text.contains("Armbar breakdown"));
}

#[test]
fn test_render_respects_ui_toggles() {
    let config = UiConfig {
        show_media: false,
        show_notes: false,
    };
    let mut view = TreeViewComponent::new(&config);
    view.update_data(sample_tree());
    let text = render_to_text(&mut view);

    assert!(text.contains("Armbar"));
    assert!(!text.contains("Armbar breakdown"));
    assert!(!text.contains("fundamental position"));
}
