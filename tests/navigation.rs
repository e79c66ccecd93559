//! The dashboard route table and navigator end to end.

use clinica::navigation::{Navigator, RequireToken, ScrollReset, Viewport};
use clinica::routes::{app_routes, build_app_routes, Layout, Page};
use clinica::token::{MemoryTokenStore, TokenStore};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

const AUTHENTICATED: &[&str] = &[
    "/",
    "/profile",
    "/calendar",
    "/blank",
    "/form-elements",
    "/basic-tables",
    "/alerts",
    "/avatars",
    "/badge",
    "/buttons",
    "/images",
    "/videos",
    "/line-chart",
    "/bar-chart",
    "/usuarios/analistas",
    "/usuarios/doctores",
    "/usuarios/ti",
    "/roles",
    "/pacientes",
    "/archivos",
    "/tipos-observacion",
    "/admisiones",
    "/ocr-crudo",
    "/observaciones",
    "/revision-observaciones",
    "/prediccion",
    "/reportes",
];

#[derive(Clone, Default)]
struct CountingViewport {
    resets: Rc<Cell<usize>>,
}

impl Viewport for CountingViewport {
    fn scroll_to(&self, x: f64, y: f64) {
        assert_eq!((x, y), (0.0, 0.0));
        self.resets.set(self.resets.get() + 1);
    }
}

#[test]
fn test_every_declared_path_resolves_to_exactly_one_route() {
    let table = app_routes();

    for path in AUTHENTICATED {
        let matching = table.iter().filter(|d| d.pattern.matches(path).is_some() && !d.is_catch_all());
        assert_eq!(matching.count(), 1, "{}", path);

        let matched = table.resolve(path);
        assert_eq!(matched.layout(), Layout::Authenticated, "{}", path);
        assert!(!matched.is_not_found(), "{}", path);
    }

    for path in ["/signin", "/signup"] {
        let matched = table.resolve(path);
        assert_eq!(matched.layout(), Layout::Standalone);
    }
    assert_eq!(table.resolve("/signin").page(), Page::SignIn);
    assert_eq!(table.resolve("/signup").page(), Page::SignUp);
}

#[test]
fn test_table_shape() {
    let table = app_routes();
    assert_eq!(table.authenticated().count(), AUTHENTICATED.len());
    assert_eq!(table.standalone().count(), 2);
    assert_eq!(table.len(), AUTHENTICATED.len() + 3);

    let last = table.iter().last().unwrap();
    assert!(last.is_catch_all());
    assert_eq!(last.page, Page::NotFound);
    assert_eq!(last.layout, Layout::Bare);
}

#[test]
fn test_unmatched_paths_render_not_found() {
    let table = app_routes();
    for path in ["/nonexistent-path", "/usuarios", "/usuarios/otros", "/pacientes/1/extra"] {
        let matched = table.resolve(path);
        assert_eq!(matched.page(), Page::NotFound, "{}", path);
        assert_eq!(matched.layout(), Layout::Bare, "{}", path);
    }
}

#[test]
fn test_usuarios_variants_carry_role() {
    let table = app_routes();
    let cases = [
        ("/usuarios/analistas", "analista"),
        ("/usuarios/doctores", "doctor"),
        ("/usuarios/ti", "TI"),
    ];

    for (path, rol) in cases {
        let matched = table.resolve(path);
        assert_eq!(matched.page(), Page::Usuarios);
        assert_eq!(matched.param("rol"), Some(rol));
    }

    // Same page, three declarations
    assert_eq!(table.iter().filter(|d| d.page == Page::Usuarios).count(), 3);
}

#[test]
fn test_query_and_trailing_slash_do_not_change_resolution() {
    let table = app_routes();
    assert_eq!(table.resolve("/pacientes/").page(), Page::Pacientes);
    assert_eq!(table.resolve("/pacientes?activo=true").page(), Page::Pacientes);
    assert_eq!(table.resolve("/reportes#mensual").page(), Page::Reportes);
}

#[test]
fn test_paths_match_case_insensitively_after_decoding() {
    let table = app_routes();
    assert_eq!(table.resolve("/Pacientes").page(), Page::Pacientes);
    assert_eq!(table.resolve("/ROLES").page(), Page::Roles);
    assert_eq!(table.resolve("/tipos%2Dobservacion").page(), Page::TiposObservacion);
    assert_eq!(table.resolve("/Usuarios/TI").param("rol"), Some("TI"));
    assert_eq!(table.resolve("/SignIn").layout(), Layout::Standalone);
}

#[test]
fn test_scroll_resets_on_every_navigation() {
    let viewport = CountingViewport::default();
    let mut navigator = Navigator::new(app_routes()).with_hook(ScrollReset::new(viewport.clone()));

    let trail = ["/pacientes", "/usuarios/doctores", "/signin", "/nonexistent-path", "/"];
    for (i, path) in trail.iter().enumerate() {
        navigator.navigate(path);
        assert_eq!(viewport.resets.get(), i + 1);
    }
    assert_eq!(navigator.history().len(), trail.len() + 1);
}

#[test]
fn test_lifetime_expires_when_leaving_page() {
    let mut navigator = Navigator::new(app_routes());
    navigator.navigate("/observaciones");
    let observaciones = navigator.lifetime();

    navigator.navigate("/pacientes");
    assert!(!observaciones.is_current());
    assert!(navigator.lifetime().is_current());
}

#[test]
fn test_optional_guard_sends_visitors_to_sign_in() {
    let tokens = Arc::new(MemoryTokenStore::new());
    let mut navigator = Navigator::new(app_routes()).with_guard(RequireToken::new(tokens.clone()));

    assert_eq!(navigator.current().page(), Page::SignIn);
    assert_eq!(navigator.history(), ["/signin".to_string()]);

    assert_eq!(navigator.navigate("/reportes").page(), Page::SignIn);
    assert_eq!(navigator.navigate("/signup").page(), Page::SignUp);

    tokens.write_token("abc123").unwrap();
    assert_eq!(navigator.navigate("/reportes").page(), Page::Reportes);
}

#[test]
fn test_rebuilding_the_table_is_deterministic() {
    let a = build_app_routes().build(Page::NotFound).unwrap();
    let b = build_app_routes().build(Page::NotFound).unwrap();
    assert_eq!(a, b);
    assert_eq!(&a, app_routes());
}
