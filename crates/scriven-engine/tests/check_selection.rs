//! Selection-check and toolbar-decision acceptance suite.

use std::time::{Duration, Instant};

use scriven_engine::{Editor, EditorOptions, RecordingToolbar, Toolbar};

fn editor(fragments: &[&str], options: EditorOptions) -> Editor<RecordingToolbar> {
    Editor::from_html(fragments, options, RecordingToolbar::new()).expect("well-formed fixtures")
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn check_reaches_the_toolbar_state_hook() {
    let mut ed = editor(&["lorem ipsum"], EditorOptions::default());
    ed.check_selection(Instant::now());
    assert_eq!(ed.toolbar().check_state_calls, 1);
}

#[test]
fn empty_selection_hides_an_active_toolbar() {
    let mut ed = editor(&["lorem ipsum"], EditorOptions::default());
    ed.toolbar_mut().set_active(true);
    ed.select_text_range(0, 0, 0);

    ed.check_selection(Instant::now());

    let toolbar = ed.toolbar();
    assert!(!toolbar.is_active());
    assert_eq!(toolbar.position_calls, 0);
    assert_eq!(toolbar.button_state_calls, 0);
    assert_eq!(toolbar.show_calls, 0);
}

#[test]
fn selection_shows_the_toolbar_after_the_window() {
    let mut ed = editor(&["lorem ipsum"], EditorOptions::default());
    ed.select_text_range(0, 0, 11);
    let t0 = Instant::now();

    ed.check_selection(t0);
    assert!(!ed.toolbar().is_active());

    ed.tick(t0 + ms(49));
    assert!(!ed.toolbar().is_active());

    ed.tick(t0 + ms(51));
    let toolbar = ed.toolbar();
    assert!(toolbar.is_active());
    assert_eq!(toolbar.position_calls, 1);
    assert_eq!(toolbar.button_state_calls, 1);
    assert_eq!(toolbar.show_calls, 1);
}

#[test]
fn repeated_checks_inside_the_window_produce_one_update_cycle() {
    let mut ed = editor(&["lorem ipsum"], EditorOptions::default());
    ed.select_text_range(0, 0, 11);
    let t0 = Instant::now();

    ed.check_selection(t0);
    ed.check_selection(t0 + ms(10));
    ed.check_selection(t0 + ms(30));
    ed.tick(t0 + ms(81));
    ed.tick(t0 + ms(200));

    let toolbar = ed.toolbar();
    assert_eq!(toolbar.position_calls, 1);
    assert_eq!(toolbar.button_state_calls, 1);
    assert_eq!(toolbar.show_calls, 1);
}

#[test]
fn broadcast_checks_batch_behind_the_long_window() {
    let mut ed = editor(&["lorem ipsum"], EditorOptions::default());
    ed.select_text_range(0, 0, 11);
    let t0 = Instant::now();

    ed.broadcast_check(t0);
    ed.tick(t0 + ms(400));
    assert!(!ed.toolbar().is_active());

    ed.tick(t0 + ms(501));
    assert!(ed.toolbar().is_active());
}

#[test]
fn multi_paragraph_selection_deactivates_when_disallowed() {
    let options = EditorOptions {
        allow_multi_paragraph_selection: false,
        ..EditorOptions::default()
    };
    let mut ed = editor(&["<p>lorem ipsum</p><p>lorem ipsum</p>"], options);
    let t0 = Instant::now();

    ed.select_text_range(0, 0, 11); // first paragraph only
    ed.check_selection(t0);
    ed.tick(t0 + ms(51));
    assert!(ed.toolbar().is_active());

    ed.select_text_range(0, 0, 22); // spans both paragraphs
    ed.check_selection(t0 + ms(60));
    assert!(!ed.toolbar().is_active());
    assert_eq!(ed.toolbar().show_calls, 1);
}

#[test]
fn multi_paragraph_selection_is_fine_by_default() {
    let mut ed = editor(&["<p>one</p><p>two</p>"], EditorOptions::default());
    let t0 = Instant::now();

    ed.select_text_range(0, 0, 6);
    ed.check_selection(t0);
    ed.tick(t0 + ms(51));
    assert!(ed.toolbar().is_active());
}

#[test]
fn update_on_empty_selection_refreshes_static_toolbar_button_states() {
    let options = EditorOptions {
        update_on_empty_selection: true,
        static_toolbar: true,
        ..EditorOptions::default()
    };
    let mut ed = editor(&["lorem ipsum"], options);
    ed.select_text_range(0, 0, 0);
    let t0 = Instant::now();

    ed.check_selection(t0);
    ed.tick(t0 + ms(51));

    let toolbar = ed.toolbar();
    assert_eq!(toolbar.button_state_calls, 1);
    assert_eq!(toolbar.position_calls, 0);
    assert_eq!(toolbar.show_calls, 0);
}

#[test]
fn selection_outside_every_root_behaves_as_empty() {
    let mut ed = editor(&["lorem ipsum"], EditorOptions::default());
    ed.toolbar_mut().set_active(true);
    ed.clear_selection();

    ed.check_selection(Instant::now());
    assert!(!ed.toolbar().is_active());
}
