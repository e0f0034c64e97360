use std::thread::sleep;
use std::time::Duration;

use crossterm::event::KeyCode;

use super::{AppState, Surface};
use crate::api::{ApiClient, Part, SearchError, SearchHit, SearchKind};

fn app() -> AppState {
    AppState::new(ApiClient::new("http://127.0.0.1:9").expect("client"))
}

fn part_hit(num: &str) -> SearchHit {
    SearchHit::Part(Part {
        part_num: num.to_string(),
        name: None,
        part_img_url: None,
        part_cat_id: None,
        part_material: None,
        year_from: None,
        year_to: None,
    })
}

fn absorb_until_settled(app: &mut AppState) {
    for _ in 0..200 {
        app.absorb();
        match app.surface {
            Surface::Loading { .. } => sleep(Duration::from_millis(5)),
            _ => return,
        }
    }
    panic!("surface never left the loading state");
}

#[test]
fn tab_switch_clears_rendered_card() {
    let mut app = app();
    app.surface = Surface::Result(part_hit("3001"));

    app.switch_tab(SearchKind::Element);

    assert_eq!(app.surface, Surface::Idle);
    assert_eq!(app.tab, SearchKind::Element);
}

#[test]
fn tab_switch_discards_in_flight_search() {
    let mut app = app();
    app.controller
        .submit_with(SearchKind::Part, "3001".to_string(), || {
            sleep(Duration::from_millis(100));
            Ok(part_hit("3001"))
        });
    app.surface = Surface::Loading {
        kind: SearchKind::Part,
        term: "3001".to_string(),
    };

    app.switch_tab(SearchKind::Element);
    assert!(!app.controller.is_pending());

    // The stale completion must not resurface later.
    sleep(Duration::from_millis(150));
    app.absorb();
    assert_eq!(app.surface, Surface::Idle);
}

#[test]
fn invalid_term_errors_without_touching_the_network() {
    let mut app = app();
    app.part_input = "ab".to_string();

    app.run_search();

    assert_eq!(
        app.surface,
        Surface::Error("Search term must be between 3 and 20 characters".to_string())
    );
    assert!(!app.controller.is_pending());
}

#[test]
fn valid_term_enters_loading_with_trimmed_term() {
    let mut app = app();
    app.part_input = "  3001 ".to_string();

    app.run_search();

    assert_eq!(
        app.surface,
        Surface::Loading {
            kind: SearchKind::Part,
            term: "3001".to_string(),
        }
    );
    assert!(app.controller.is_pending());
}

#[test]
fn transport_failure_surfaces_the_connectivity_message() {
    let mut app = app();
    app.surface = Surface::Loading {
        kind: SearchKind::Part,
        term: "3001".to_string(),
    };
    app.controller
        .submit_with(SearchKind::Part, "3001".to_string(), || {
            Err(SearchError::Transport)
        });

    absorb_until_settled(&mut app);

    assert_eq!(
        app.surface,
        Surface::Error("Unable to connect to the server. Please try again later.".to_string())
    );
}

#[test]
fn not_found_maps_to_no_results_with_term() {
    let mut app = app();
    app.surface = Surface::Loading {
        kind: SearchKind::Part,
        term: "xyz12".to_string(),
    };
    app.controller
        .submit_with(SearchKind::Part, "xyz12".to_string(), || {
            Err(SearchError::NotFound {
                kind: SearchKind::Part,
                term: "xyz12".to_string(),
            })
        });

    absorb_until_settled(&mut app);

    assert_eq!(
        app.surface,
        Surface::NoResults {
            kind: SearchKind::Part,
            term: "xyz12".to_string(),
        }
    );
}

#[test]
fn successful_search_renders_the_hit() {
    let mut app = app();
    app.surface = Surface::Loading {
        kind: SearchKind::Part,
        term: "3001".to_string(),
    };
    app.controller
        .submit_with(SearchKind::Part, "3001".to_string(), || Ok(part_hit("3001")));

    absorb_until_settled(&mut app);

    assert_eq!(app.surface, Surface::Result(part_hit("3001")));
}

#[test]
fn each_tab_keeps_its_own_input_buffer() {
    let mut app = app();
    for c in "3001".chars() {
        app.handle_key(KeyCode::Char(c));
    }

    app.handle_key(KeyCode::Tab);
    for c in "300121".chars() {
        app.handle_key(KeyCode::Char(c));
    }

    assert_eq!(app.part_input, "3001");
    assert_eq!(app.element_input, "300121");
}

#[test]
fn backspace_edits_the_active_buffer() {
    let mut app = app();
    for c in "30011".chars() {
        app.handle_key(KeyCode::Char(c));
    }
    app.handle_key(KeyCode::Backspace);

    assert_eq!(app.part_input, "3001");
}

#[test]
fn quit_only_from_normal_mode() {
    let mut app = app();
    // 'q' while typing is just input.
    assert!(app.handle_key(KeyCode::Char('q')));
    assert_eq!(app.part_input, "q");

    app.handle_key(KeyCode::Esc);
    assert!(!app.handle_key(KeyCode::Char('q')));
}
