use notes_core::{
    History, MemoryHistory, MemoryMount, RouteOutcome, RouteParams, Router, NOT_FOUND_MARKUP,
};
use std::cell::RefCell;
use std::rc::Rc;

type TestRouter = Router<MemoryHistory, MemoryMount, ()>;

fn router_at(path: &str) -> TestRouter {
    let mut router = Router::new(MemoryHistory::new(path), MemoryMount::new());
    router.register_route("/", |_, _| r#"<h1>home</h1><a href="/create" data-link>new</a>"#.to_string());
    router.register_route("/create", |_, _| "<form id=\"note-form\"></form>".to_string());
    router.register_route("/note/:id", |_, request| {
        format!(
            r#"<p>note {}</p><a href="/" data-link>back</a>"#,
            request.params.get("id").unwrap_or("?")
        )
    });
    router
}

#[test]
fn init_renders_current_location() {
    let mut router = router_at("/");
    router.init(&());

    assert!(router.mount().content().contains("<h1>home</h1>"));
    assert_eq!(router.mount().renders(), 1);
    assert_eq!(router.last_outcome(), Some(&RouteOutcome::Literal("/".to_string())));
}

#[test]
fn dynamic_route_exposes_named_params() {
    let mut router = router_at("/");
    router.init(&());
    router.navigate_to("/note/42", &());

    let expected: RouteParams = [("id", "42")].into_iter().collect();
    assert_eq!(router.get_route_params(), &expected);
    assert_eq!(router.mount().content(), r#"<p>note 42</p><a href="/" data-link>back</a>"#);
    assert_eq!(
        router.last_outcome(),
        Some(&RouteOutcome::Dynamic("/note/:id".to_string()))
    );
}

#[test]
fn unknown_path_renders_not_found_and_clears_params() {
    let mut router = router_at("/note/7");
    router.init(&());
    assert_eq!(router.get_route_params().get("id"), Some("7"));

    router.navigate_to("/unknown/path", &());

    assert_eq!(router.mount().content(), NOT_FOUND_MARKUP);
    assert!(router.get_route_params().is_empty());
    assert_eq!(router.last_outcome(), Some(&RouteOutcome::NotFound));
    assert!(router.bound_links().is_empty());
}

#[test]
fn literal_match_clears_previous_params() {
    let mut router = router_at("/note/7");
    router.init(&());
    router.navigate_to("/create", &());
    assert!(router.get_route_params().is_empty());
}

#[test]
fn query_string_is_ignored_for_matching() {
    let mut router = router_at("/");
    router.navigate_to("/note/9?ref=list#top", &());
    assert_eq!(router.get_route_params().get("id"), Some("9"));
}

#[test]
fn navigate_pushes_history_and_back_forward_rerender() {
    let mut router = router_at("/");
    router.init(&());
    router.navigate_to("/create", &());
    router.navigate_to("/note/1", &());
    assert_eq!(router.history().entries(), ["/", "/create", "/note/1"]);

    assert!(router.back(&()));
    assert_eq!(router.current_path(), "/create");
    assert!(router.mount().content().contains("note-form"));

    assert!(router.back(&()));
    assert!(!router.back(&()));
    assert!(router.forward(&()));
    assert_eq!(router.current_path(), "/create");
    assert_eq!(router.mount().renders(), 6);
}

#[test]
fn links_are_bound_synchronously_after_each_render() {
    let mut router = router_at("/");
    router.init(&());
    assert_eq!(router.bound_links(), ["/create"]);

    assert!(router.follow_link("/create", &()));
    assert_eq!(router.current_path(), "/create");
    assert!(router.bound_links().is_empty());

    // The home link is gone from the new content, so clicks are not intercepted.
    assert!(!router.follow_link("/create", &()));
    assert_eq!(router.history().entries().len(), 2);
}

#[test]
fn reregistering_a_pattern_overwrites_its_view() {
    let mut router = router_at("/");
    router.register_route("/", |_, _| "replaced".to_string());
    router.init(&());

    assert_eq!(router.route_count(), 3);
    assert_eq!(router.mount().content(), "replaced");
}

#[test]
fn literal_registration_wins_over_dynamic_pattern() {
    let mut router = router_at("/");
    router.register_route("/note/special", |_, _| "special".to_string());
    router.navigate_to("/note/special", &());

    assert_eq!(router.mount().content(), "special");
    assert!(router.get_route_params().is_empty());
}

#[test]
fn first_registered_dynamic_pattern_wins() {
    let mut router: TestRouter = Router::new(MemoryHistory::new("/x/1"), MemoryMount::new());
    router.register_route("/x/:first", |_, _| "first".to_string());
    router.register_route("/x/:second", |_, _| "second".to_string());
    router.init(&());

    assert_eq!(router.mount().content(), "first");
    assert_eq!(router.get_route_params().get("first"), Some("1"));
    assert_eq!(router.get_route_params().get("second"), None);
}

#[test]
fn views_read_the_render_context() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut router: Router<MemoryHistory, MemoryMount, Rc<RefCell<Vec<String>>>> =
        Router::new(MemoryHistory::default(), MemoryMount::new());
    router.register_route("/", |ctx, request| {
        ctx.borrow_mut().push(request.path.to_string());
        format!("seen {}", ctx.borrow().len())
    });

    router.init(&log);
    router.handle_pop_state(&log);

    assert_eq!(router.mount().content(), "seen 2");
    assert_eq!(*log.borrow(), vec!["/", "/"]);
}

#[test]
fn history_current_path_tracks_navigation() {
    let mut history = MemoryHistory::new("/");
    history.push_state("/a");
    assert_eq!(history.current_path(), "/a");
}
