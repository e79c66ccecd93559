//! App Root Component
//!
//! Router, global providers and the shell that turns the current URL into a page.
//!
//! Leptos only sees one catch-all route. The shell resolves the location against
//! the `clinica` route table through a [`Navigator`], which applies the optional
//! sign-in guard, resets the scroll position and expires the previous page's
//! lifetime before the new page renders.

use clinica::navigation::{Navigator, PageLifetime, RequireToken, ScrollReset, Viewport};
use clinica::routes::{app_routes, Layout, Page, RouteMatch};
use clinica::token::TokenStore;
use leptos::*;
use leptos_router::*;

use crate::api::{provide_api_client, use_api};
use crate::components::{Header, Sidebar, Toast};
use crate::pages::{CollectionPage, Home, NotFound, Placeholder, SignIn, SignUp};
use crate::state::provide_global_state;

/// Browser window as a scroll target
struct WindowViewport;

impl Viewport for WindowViewport {
    fn scroll_to(&self, x: f64, y: f64) {
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(x, y);
        }
    }
}

/// Whether authenticated pages redirect to sign-in without a token
fn require_sign_in() -> bool {
    matches!(option_env!("CLINICA_REQUIRE_SIGN_IN"), Some("1" | "true" | "yes"))
}

/// Shell navigation state shared with pages
#[derive(Clone, Copy)]
pub struct ShellCtx {
    navigator: StoredValue<Navigator<'static>>,
}

impl ShellCtx {
    /// Lifetime of the page currently on screen
    pub fn lifetime(&self) -> PageLifetime {
        self.navigator.with_value(|navigator| navigator.lifetime())
    }
}

pub fn use_page_lifetime() -> PageLifetime {
    use_context::<ShellCtx>()
        .expect("ShellCtx not found")
        .lifetime()
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_api_client();
    let api = use_api();
    provide_global_state(api.tokens.read_token().is_some());

    view! {
        <Router>
            <Routes>
                <Route path="/*any" view=Shell />
            </Routes>
            <Toast />
        </Router>
    }
}

/// Resolves the location and renders the matched page in its layout
#[component]
fn Shell() -> impl IntoView {
    let api = use_api();
    let location = use_location();
    let navigate = use_navigate();

    let mut navigator = Navigator::new(app_routes()).with_hook(ScrollReset::new(WindowViewport));
    if require_sign_in() {
        navigator = navigator.with_guard(RequireToken::new(api.tokens.clone()));
    }
    let initial = navigator.resolve(&location.pathname.get_untracked());
    let navigator = store_value(navigator);
    provide_context(ShellCtx { navigator });

    let current = create_rw_signal(initial);

    create_effect(move |_| {
        let path = location.pathname.get();
        let matched = navigator
            .try_update_value(|navigator| navigator.navigate(&path).clone())
            .unwrap_or_else(|| app_routes().resolve(&path));

        // The guard sent us elsewhere: make the address bar agree
        if matched.path != clinica::routes::normalize_path(&path) {
            navigate(
                &matched.path,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }

        current.set(matched);
    });

    move || {
        let matched = current.get();
        match matched.layout() {
            Layout::Authenticated => {
                let page = render_page(&matched);
                view! { <AppLayout>{page}</AppLayout> }.into_view()
            }
            Layout::Standalone => render_page(&matched),
            Layout::Bare => view! { <NotFound /> }.into_view(),
        }
    }
}

/// Shared chrome around every authenticated page
#[component]
fn AppLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-900 text-white flex">
            <Sidebar />
            <div class="flex-1 flex flex-col">
                <Header />
                <main class="flex-1 container mx-auto px-6 py-8">
                    {children()}
                </main>
            </div>
        </div>
    }
}

fn render_page(matched: &RouteMatch) -> View {
    let page = matched.page();
    match page {
        Page::Home => view! { <Home /> }.into_view(),
        Page::SignIn => view! { <SignIn /> }.into_view(),
        Page::SignUp => view! { <SignUp /> }.into_view(),
        Page::NotFound => view! { <NotFound /> }.into_view(),
        _ if page.collection().is_some() => {
            let rol = matched.param("rol").map(str::to_string);
            view! { <CollectionPage page=page rol=rol /> }.into_view()
        }
        _ => view! { <Placeholder page=page /> }.into_view(),
    }
}

