use std::time::Duration;

use article_listing::timer::Debouncer;
use article_listing::{
    ListingAction, ListingConfig, ListingController, ListingView, RefreshOutcome, Visibility,
    VisibilityStep,
};
use listing_common::{FilterKind, ListingError, ListingResponse, SortKey};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Loading,
    Error(String, String),
    Articles(String),
    Badges(String),
    Pagination(String),
    Featured(Vec<VisibilityStep>),
    ViewAllLabel(String),
    History(String),
    Reveal,
    ClearSearch,
    Uncheck(String),
}

#[derive(Default)]
struct RecordingView {
    calls: Vec<Call>,
}

impl RecordingView {
    fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl ListingView for RecordingView {
    fn show_loading(&mut self) {
        self.calls.push(Call::Loading);
    }

    fn show_error(&mut self, message: &str, retry_label: &str) {
        self.calls
            .push(Call::Error(message.to_string(), retry_label.to_string()));
    }

    fn render_articles(&mut self, html: &str) {
        self.calls.push(Call::Articles(html.to_string()));
    }

    fn render_badges(&mut self, html: &str) {
        self.calls.push(Call::Badges(html.to_string()));
    }

    fn render_pagination(&mut self, html: &str) {
        self.calls.push(Call::Pagination(html.to_string()));
    }

    fn set_featured_visibility(&mut self, steps: &[VisibilityStep]) {
        self.calls.push(Call::Featured(steps.to_vec()));
    }

    fn set_view_all_label(&mut self, label: &str) {
        self.calls.push(Call::ViewAllLabel(label.to_string()));
    }

    fn push_history(&mut self, location: &str) {
        self.calls.push(Call::History(location.to_string()));
    }

    fn reveal_on_scroll(&mut self) {
        self.calls.push(Call::Reveal);
    }

    fn clear_search_input(&mut self) {
        self.calls.push(Call::ClearSearch);
    }

    fn uncheck_category(&mut self, value: &str) {
        self.calls.push(Call::Uncheck(value.to_string()));
    }
}

const PATH: &str = "/article/";

fn controller(query: &str) -> ListingController<RecordingView> {
    let mut controller = ListingController::new(RecordingView::default(), PATH, ListingConfig::default());
    controller.initialize(query);
    controller.view_mut().take();
    controller
}

fn response(has_search_or_filter: bool) -> ListingResponse {
    ListingResponse {
        articles_html: "<article>one</article>".to_string(),
        active_filters_html: "<span class=\"badge\"></span>".to_string(),
        pagination_html: "<nav></nav>".to_string(),
        has_search_or_filter,
    }
}

fn hidden_steps() -> Vec<VisibilityStep> {
    vec![
        VisibilityStep::AddHiddenClass,
        VisibilityStep::CollapseAfter(Duration::from_millis(300)),
    ]
}

fn shown_steps() -> Vec<VisibilityStep> {
    vec![
        VisibilityStep::RestoreLayout,
        VisibilityStep::ForceReflow,
        VisibilityStep::RemoveHiddenClass,
    ]
}

#[test]
fn initialize_reads_url_and_hides_featured_when_filtered() {
    let mut controller = ListingController::new(RecordingView::default(), PATH, ListingConfig::default());
    controller.initialize("?search=budget&category=3,1&page=2");

    let state = controller.state();
    assert_eq!(state.search(), "budget");
    assert_eq!(state.categories().iter().collect::<Vec<_>>(), vec!["1", "3"]);
    assert_eq!(state.page(), 2);
    assert_eq!(controller.featured(), Some(Visibility::Hidden));
    assert_eq!(
        controller.view_mut().take(),
        vec![
            Call::ViewAllLabel("View All Articles".to_string()),
            Call::Featured(hidden_steps()),
            Call::Reveal,
        ]
    );
}

#[test]
fn initialize_without_filters_shows_featured() {
    let mut controller = ListingController::new(RecordingView::default(), PATH, ListingConfig::default());
    controller.initialize("");
    assert_eq!(controller.featured(), Some(Visibility::Shown));
    assert!(controller.view().calls.contains(&Call::Featured(shown_steps())));
    // 服务端渲染的文章在首次请求前就要能滚动显现
    assert_eq!(controller.view().calls.last(), Some(&Call::Reveal));
}

#[test]
fn initialize_in_view_all_mode_uses_show_featured_label() {
    let mut controller = ListingController::new(RecordingView::default(), PATH, ListingConfig::default());
    controller.initialize("view_all=true");
    assert!(controller.state().view_all());
    assert_eq!(controller.featured(), Some(Visibility::Hidden));
    assert_eq!(
        controller.view().calls[0],
        Call::ViewAllLabel("Show Featured".to_string())
    );
}

#[test]
fn debounced_typing_sends_one_search_request() {
    let mut controller = controller("");
    let mut debouncer = Debouncer::new();

    let tickets: Vec<u64> = ["b", "bud", "budg", "budget"]
        .iter()
        .map(|text| debouncer.schedule(text.to_string()))
        .collect();

    let mut requests = Vec::new();
    for ticket in tickets {
        if let Some(value) = debouncer.take(ticket) {
            requests.extend(controller.dispatch(ListingAction::SearchSubmitted(value)));
        }
    }

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "/article/?search=budget&ajax=true");
}

#[test]
fn selecting_category_on_page_three_resets_page() {
    let mut controller = controller("page=3");
    assert_eq!(controller.state().page(), 3);

    let request = controller
        .dispatch(ListingAction::CategoriesChanged(vec!["7".to_string()]))
        .expect("category change should refresh");
    assert_eq!(request.url, "/article/?category=7&ajax=true");
    assert_eq!(controller.state().page(), 1);
}

#[test]
fn pagination_keeps_active_search() {
    let mut controller = controller("search=budget");
    let request = controller
        .dispatch(ListingAction::PageSelected(2))
        .expect("page change should refresh");
    assert_eq!(request.url, "/article/?search=budget&page=2&ajax=true");
}

#[test]
fn sort_change_resets_page_and_repeat_is_ignored() {
    let mut controller = controller("page=4");
    let request = controller
        .dispatch(ListingAction::SortSelected(Some(SortKey::Popular)))
        .expect("sort change should refresh");
    assert_eq!(request.url, "/article/?sort=popular&ajax=true");
    assert!(controller
        .dispatch(ListingAction::SortSelected(Some(SortKey::Popular)))
        .is_none());
}

#[test]
fn reordered_category_selection_does_not_refresh() {
    let mut controller = controller("category=1,2");
    let action = ListingAction::CategoriesChanged(vec!["2".to_string(), "1".to_string()]);
    assert!(controller.dispatch(action).is_none());
    assert!(controller.view().calls.is_empty());
}

#[test]
fn refresh_shows_loading_then_applies_response() {
    let mut controller = controller("");
    let request = controller
        .dispatch(ListingAction::SearchSubmitted("budget".to_string()))
        .unwrap();
    assert_eq!(controller.view_mut().take(), vec![Call::Loading]);

    let outcome = controller.complete(request.token, Ok(response(true)));
    assert_eq!(outcome, RefreshOutcome::Applied);
    assert_eq!(
        controller.view_mut().take(),
        vec![
            Call::Articles("<article>one</article>".to_string()),
            Call::Badges("<span class=\"badge\"></span>".to_string()),
            Call::Pagination("<nav></nav>".to_string()),
            Call::Featured(hidden_steps()),
            Call::History("/article/?search=budget".to_string()),
            Call::Reveal,
        ]
    );
}

#[test]
fn failed_fetch_renders_error_and_keeps_state() {
    let mut controller = controller("search=budget");
    let request = controller.dispatch(ListingAction::PageSelected(2)).unwrap();
    let before = controller.state().clone();
    controller.view_mut().take();

    let outcome = controller.complete(request.token, Err(ListingError::Network("offline".to_string())));
    assert_eq!(outcome, RefreshOutcome::Failed);
    assert_eq!(controller.state(), &before);
    assert_eq!(
        controller.view_mut().take(),
        vec![Call::Error(
            "Oops! Failed loading articles.".to_string(),
            "Try Again".to_string()
        )]
    );
}

#[test]
fn retry_reissues_current_request() {
    let mut controller = controller("search=budget&page=2");
    let first = controller.refresh();
    controller.complete(first.token, Err(ListingError::Status(502)));

    let retry = controller.dispatch(ListingAction::Retry).expect("retry always refreshes");
    assert_eq!(retry.url, first.url);
    assert!(retry.token > first.token);
}

#[test]
fn stale_response_is_discarded() {
    let mut controller = controller("");
    let older = controller
        .dispatch(ListingAction::SearchSubmitted("bud".to_string()))
        .unwrap();
    let newer = controller
        .dispatch(ListingAction::SearchSubmitted("budget".to_string()))
        .unwrap();
    controller.view_mut().take();

    assert_eq!(controller.complete(older.token, Ok(response(true))), RefreshOutcome::Stale);
    assert!(controller.view().calls.is_empty());

    assert_eq!(controller.complete(newer.token, Ok(response(true))), RefreshOutcome::Applied);
    assert!(controller
        .view()
        .calls
        .contains(&Call::History("/article/?search=budget".to_string())));
}

#[test]
fn removing_last_category_badge_shows_featured() {
    let mut controller = controller("category=5");
    let request = controller
        .dispatch(ListingAction::FilterRemoved {
            kind: FilterKind::Category,
            value: Some("5".to_string()),
        })
        .expect("removing a badge should refresh");
    assert!(!controller.state().has_search_or_filter());
    assert_eq!(request.url, "/article/?ajax=true");
    assert_eq!(
        controller.view_mut().take(),
        vec![Call::Uncheck("5".to_string()), Call::Loading]
    );

    controller.complete(request.token, Ok(response(false)));
    assert_eq!(controller.featured(), Some(Visibility::Shown));
    assert!(controller.view().calls.contains(&Call::Featured(shown_steps())));
    assert!(controller.view().calls.contains(&Call::History("/article/".to_string())));
}

#[test]
fn removing_search_badge_clears_input() {
    let mut controller = controller("search=budget&page=3");
    let request = controller
        .dispatch(ListingAction::FilterRemoved {
            kind: FilterKind::Search,
            value: Some("budget".to_string()),
        })
        .unwrap();
    assert_eq!(request.url, "/article/?ajax=true");
    assert_eq!(controller.view().calls[0], Call::ClearSearch);
}

#[test]
fn view_all_toggle_switches_label_and_featured() {
    let mut controller = controller("page=2");

    let request = controller.dispatch(ListingAction::ViewAllToggled).unwrap();
    assert_eq!(request.url, "/article/?view_all=true&ajax=true");
    assert_eq!(
        controller.view_mut().take(),
        vec![
            Call::ViewAllLabel("Show Featured".to_string()),
            Call::Featured(hidden_steps()),
            Call::Loading,
        ]
    );

    // 服务端未把浏览全部计入筛选条件，精选区仍保持隐藏
    controller.complete(request.token, Ok(response(false)));
    assert_eq!(controller.featured(), Some(Visibility::Hidden));
    controller.view_mut().take();

    let request = controller.dispatch(ListingAction::ViewAllToggled).unwrap();
    assert_eq!(request.url, "/article/?ajax=true");
    assert_eq!(
        controller.view_mut().take(),
        vec![
            Call::ViewAllLabel("View All Articles".to_string()),
            Call::Featured(shown_steps()),
            Call::Loading,
        ]
    );
}

#[test]
fn removing_view_all_badge_keeps_featured_hidden_while_search_active() {
    let mut controller = controller("search=budget&view_all=true");
    controller
        .dispatch(ListingAction::FilterRemoved {
            kind: FilterKind::ViewAll,
            value: None,
        })
        .unwrap();
    assert!(!controller.state().view_all());
    assert_eq!(controller.featured(), Some(Visibility::Hidden));
}

#[test]
fn unchanged_page_click_does_nothing() {
    let mut controller = controller("page=2");
    assert!(controller.dispatch(ListingAction::PageSelected(2)).is_none());
    assert!(controller.view().calls.is_empty());
}

#[test]
fn custom_endpoint_and_labels_are_used() {
    let config = ListingConfig {
        endpoint: Some("/artikel/".to_string()),
        error_message: "Gagal memuat artikel.".to_string(),
        retry_label: "Coba Lagi".to_string(),
        ..ListingConfig::default()
    };
    let mut controller = ListingController::new(RecordingView::default(), "/artikel/", config);
    controller.initialize("");
    let request = controller
        .dispatch(ListingAction::SearchSubmitted("anggaran".to_string()))
        .unwrap();
    assert_eq!(request.url, "/artikel/?search=anggaran&ajax=true");

    controller.view_mut().take();
    controller.complete(request.token, Err(ListingError::Status(500)));
    assert_eq!(
        controller.view().calls,
        vec![Call::Error("Gagal memuat artikel.".to_string(), "Coba Lagi".to_string())]
    );
}

#[test]
fn endpoint_is_requested_but_history_keeps_page_path() {
    let config = ListingConfig {
        endpoint: Some("/api/articles/".to_string()),
        ..ListingConfig::default()
    };
    let mut controller = ListingController::new(RecordingView::default(), PATH, config);
    controller.initialize("");
    controller.view_mut().take();

    let request = controller
        .dispatch(ListingAction::SearchSubmitted("budget".to_string()))
        .unwrap();
    assert_eq!(request.url, "/api/articles/?search=budget&ajax=true");

    assert_eq!(controller.complete(request.token, Ok(response(true))), RefreshOutcome::Applied);
    let calls = controller.view_mut().take();
    assert!(calls.contains(&Call::History("/article/?search=budget".to_string())));
    assert!(!calls
        .iter()
        .any(|call| matches!(call, Call::History(location) if location.starts_with("/api/"))));
}

#[test]
fn category_value_with_separator_is_stored_as_separate_ids() {
    let mut controller = controller("");
    let request = controller
        .dispatch(ListingAction::CategoriesChanged(vec!["4,1".to_string()]))
        .unwrap();
    assert_eq!(request.url, "/article/?category=1%2C4&ajax=true");
    assert_eq!(controller.state().categories().len(), 2);

    // 同一集合的另一种写法不再触发请求
    assert!(controller
        .dispatch(ListingAction::CategoriesChanged(vec!["1".to_string(), "4".to_string()]))
        .is_none());
}
