mod common;

use common::{render_to_string, state_with, test_cli};
use orderdesk::{
    app::state::AppMode,
    backdrop::Variant,
    orders::{OrderDraft, ServiceChoice},
};

#[test]
fn tiny_terminal_shows_resize_hint() {
    let cli = test_cli();
    let state = state_with(&cli, Variant::Hail, false);
    let rendered = render_to_string(&state, &cli, 30, 8);
    assert!(rendered.contains("Terminal too small"));
}

#[test]
fn header_and_footer_describe_the_session() {
    let cli = test_cli();
    let state = state_with(&cli, Variant::Snowfall, true);
    let rendered = render_to_string(&state, &cli, 100, 30);

    let header = rendered.lines().next().expect("header row");
    assert!(header.contains("orderdesk"));
    assert!(header.contains("Snowfall"));
    assert!(header.contains("reduced motion"));
    assert!(header.contains("tester"));
    assert!(rendered.contains("n new order"));
    assert!(rendered.contains("Loading orders..."));
}

#[test]
fn backdrop_particles_show_through_around_panels() {
    let cli = test_cli();
    let mut state = state_with(&cli, Variant::Hail, false);
    state.handle_resize(100, 30);
    for _ in 0..3 {
        state.handle_tick_frame(std::time::Instant::now());
    }

    let rendered = render_to_string(&state, &cli, 100, 30);
    assert!(
        rendered.contains('•') || rendered.contains('●'),
        "expected hail pellets in:\n{rendered}"
    );
}

#[test]
fn disabled_backdrop_renders_plain_sky() {
    let mut cli = test_cli();
    cli.no_backdrop = true;
    let mut state = state_with(&cli, Variant::Hail, false);
    state.handle_resize(100, 30);

    let rendered = render_to_string(&state, &cli, 100, 30);
    assert!(!rendered.contains('•') && !rendered.contains('●'));
}

#[tokio::test]
async fn empty_history_and_profile_prompt() {
    let cli = test_cli();
    let mut state = state_with(&cli, Variant::Rain, false);
    state.load_account().await;
    assert_eq!(state.mode, AppMode::ProfileSetup);

    let rendered = render_to_string(&state, &cli, 100, 30);
    assert!(rendered.contains("No orders yet"));
    assert!(rendered.contains("Welcome"));
    assert!(rendered.contains("Please tell us your name"));
    assert!(rendered.contains("(admin)"));
}

#[tokio::test]
async fn submitted_order_is_listed_with_label_and_details() {
    let cli = test_cli();
    let mut state = state_with(&cli, Variant::Hail, false);
    let mut draft = OrderDraft {
        choice: Some(ServiceChoice::ConsumableReplacement),
        other_text: String::new(),
        details: "Printer toner on floor 3".to_string(),
    };
    state.desk.submit(&mut draft).await.expect("order created");

    let rendered = render_to_string(&state, &cli, 100, 30);
    assert!(rendered.contains("Consumable Replacement"));
    assert!(rendered.contains("#0"));
    assert!(rendered.contains("Printer toner on floor 3"));
    assert!(rendered.contains("Order created successfully!"));
}

#[test]
fn compose_form_shows_choices_and_counter() {
    let cli = test_cli();
    let mut state = state_with(&cli, Variant::Hail, false);
    state.mode = AppMode::Composing;
    state.draft.choice = Some(ServiceChoice::Other);
    state.draft.details = "abc".to_string();

    let rendered = render_to_string(&state, &cli, 120, 30);
    assert!(rendered.contains("New Service Order"));
    assert!(rendered.contains("Specify service type"));
    assert!(rendered.contains("(3/1000)"));
    assert!(rendered.contains("(•) 4 Other"));
}
