use pretty_assertions::assert_eq;
use vitrine_core::{HeadlessPage, NodeId, Page};
use vitrine_reveal::{RevealConfig, RevealController, RevealOutcome, RevealState};

fn page_with_sections(n: usize) -> (HeadlessPage, Vec<NodeId>) {
    let page = HeadlessPage::new();
    let body = page.body_node();
    let nodes = (0..n)
        .map(|_| {
            let section = page.element(body, "section");
            page.add_class(&section, "reveal");
            section
        })
        .collect();
    (page, nodes)
}

fn controller() -> RevealController<HeadlessPage> {
    RevealController::new(RevealConfig::default())
}

#[test]
fn intersecting_element_becomes_visible_and_is_released() {
    let (page, nodes) = page_with_sections(2);
    let mut reveal = controller();

    assert_eq!(reveal.setup(&page), RevealOutcome::Watching(2));
    assert!(page.is_observed(nodes[0]));
    assert!(page.is_observed(nodes[1]));

    page.intersect(nodes[0], 0.3);

    assert_eq!(reveal.state_of(&nodes[0]), Some(RevealState::Visible));
    assert!(page.has_class(&nodes[0], "visible"));
    assert!(!page.is_observed(nodes[0]));

    assert_eq!(reveal.state_of(&nodes[1]), Some(RevealState::Pending));
    assert!(!page.has_class(&nodes[1], "visible"));
    assert!(page.is_observed(nodes[1]));
}

#[test]
fn below_threshold_stays_pending() {
    let (page, nodes) = page_with_sections(1);
    let mut reveal = controller();
    reveal.setup(&page);

    page.intersect(nodes[0], 0.05);

    assert_eq!(reveal.state_of(&nodes[0]), Some(RevealState::Pending));
    assert!(page.is_observed(nodes[0]));

    page.intersect(nodes[0], 0.12);
    assert_eq!(reveal.state_of(&nodes[0]), Some(RevealState::Visible));
}

#[test]
fn visible_is_terminal() {
    let (page, nodes) = page_with_sections(3);
    let mut reveal = controller();
    reveal.setup(&page);

    page.intersect(nodes[1], 1.0);
    for ratio in [0.0, 0.5, 1.0] {
        page.intersect(nodes[1], ratio);
        assert_eq!(reveal.state_of(&nodes[1]), Some(RevealState::Visible));
    }
    assert_eq!(reveal.visible_count(), 1);
    assert_eq!(reveal.pending_count(), 2);
}

#[test]
fn reduced_motion_reveals_everything_without_watching() {
    let (page, nodes) = page_with_sections(4);
    page.set_reduced_motion(true);
    let mut reveal = controller();

    assert_eq!(reveal.setup(&page), RevealOutcome::Immediate(4));

    assert_eq!(page.watcher_count(), 0);
    assert!(!reveal.is_watching());
    for node in &nodes {
        assert_eq!(reveal.state_of(node), Some(RevealState::Visible));
        assert!(page.has_class(node, "visible"));
    }
}

#[test]
fn no_elements_is_a_no_op() {
    let page = HeadlessPage::new();
    let mut reveal = controller();

    assert_eq!(reveal.setup(&page), RevealOutcome::NoElements);
    assert_eq!(page.watcher_count(), 0);
}

#[test]
fn missing_watcher_support_degrades_to_pending() {
    let (page, nodes) = page_with_sections(2);
    page.set_intersection_supported(false);
    let mut reveal = controller();

    assert_eq!(reveal.setup(&page), RevealOutcome::Unsupported(2));
    assert_eq!(reveal.state_of(&nodes[0]), Some(RevealState::Pending));
}

#[test]
fn custom_threshold_is_passed_to_the_watcher() {
    let (page, nodes) = page_with_sections(1);
    let mut reveal = RevealController::new(RevealConfig {
        threshold: 0.5,
        ..RevealConfig::default()
    });
    reveal.setup(&page);

    page.intersect(nodes[0], 0.3);
    assert_eq!(reveal.state_of(&nodes[0]), Some(RevealState::Pending));
    page.intersect(nodes[0], 0.5);
    assert_eq!(reveal.state_of(&nodes[0]), Some(RevealState::Visible));
}

#[test]
fn setup_again_keeps_revealed_elements() {
    let (page, nodes) = page_with_sections(2);
    let mut reveal = controller();
    reveal.setup(&page);
    page.intersect(nodes[0], 1.0);

    assert_eq!(reveal.setup(&page), RevealOutcome::Watching(1));

    assert_eq!(reveal.state_of(&nodes[0]), Some(RevealState::Visible));
    assert!(page.has_class(&nodes[0], "visible"));
    assert!(!page.is_observed(nodes[0]));
    assert_eq!(reveal.state_of(&nodes[1]), Some(RevealState::Pending));
    assert!(page.is_observed(nodes[1]));

    page.intersect(nodes[1], 0.5);
    assert_eq!(reveal.visible_count(), 2);
}

#[test]
fn setup_again_picks_up_new_elements() {
    let (page, nodes) = page_with_sections(1);
    let mut reveal = controller();
    reveal.setup(&page);
    page.intersect(nodes[0], 1.0);

    let late = page.element(page.body_node(), "section");
    page.add_class(&late, "reveal");

    assert_eq!(reveal.setup(&page), RevealOutcome::Watching(1));
    assert_eq!(reveal.state_of(&nodes[0]), Some(RevealState::Visible));
    assert_eq!(reveal.state_of(&late), Some(RevealState::Pending));
    assert!(page.is_observed(late));
}

#[test]
fn setup_again_without_elements_forgets_them() {
    let (page, nodes) = page_with_sections(1);
    let mut reveal = controller();
    reveal.setup(&page);

    page.remove_class(&nodes[0], "reveal");

    assert_eq!(reveal.setup(&page), RevealOutcome::NoElements);
    assert_eq!(reveal.state_of(&nodes[0]), None);
    assert!(!page.is_observed(nodes[0]));
    assert!(!reveal.is_watching());
}
