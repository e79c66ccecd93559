//! Navigation
//!
//! The shell's state machine over the route table. A navigation resolves the URL,
//! consults the [`AuthGuard`] at the layout boundary, commits the new route, expires
//! the previous [`PageLifetime`], and runs every [`NavigationHook`] before the caller
//! renders the new page. Scroll reset is one such hook.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::routes::{Layout, RouteMatch, RouteTable};
use crate::token::TokenStore;

/// Redirects followed for a single navigation before giving up
pub const MAX_REDIRECTS: usize = 8;

pub const SIGN_IN_PATH: &str = "/signin";

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Hook at the authenticated layout boundary
///
/// Only consulted for routes rendered inside the shared layout.
pub trait AuthGuard {
    fn check(&self, target: &RouteMatch) -> GuardDecision;
}

/// Lets every navigation through
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AuthGuard for AllowAll {
    fn check(&self, _target: &RouteMatch) -> GuardDecision {
        GuardDecision::Allow
    }
}

/// Sends visitors without a stored token to the sign-in page
pub struct RequireToken {
    tokens: Arc<dyn TokenStore>,
    sign_in_path: String,
}

impl RequireToken {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            tokens,
            sign_in_path: SIGN_IN_PATH.to_string(),
        }
    }

    pub fn sign_in_path(mut self, path: impl Into<String>) -> Self {
        self.sign_in_path = path.into();
        self
    }
}

impl AuthGuard for RequireToken {
    fn check(&self, _target: &RouteMatch) -> GuardDecision {
        match self.tokens.read_token() {
            Some(_) => GuardDecision::Allow,
            None => GuardDecision::Redirect(self.sign_in_path.clone()),
        }
    }
}

/// Runs after a navigation commits, before the new page paints
pub trait NavigationHook {
    fn on_navigate(&self, from: &RouteMatch, to: &RouteMatch);
}

/// Something that can scroll
pub trait Viewport {
    fn scroll_to(&self, x: f64, y: f64);
}

/// Puts the viewport back at the top on every navigation
pub struct ScrollReset<V> {
    viewport: V,
}

impl<V: Viewport> ScrollReset<V> {
    pub fn new(viewport: V) -> Self {
        Self { viewport }
    }
}

impl<V: Viewport> NavigationHook for ScrollReset<V> {
    fn on_navigate(&self, _from: &RouteMatch, _to: &RouteMatch) {
        self.viewport.scroll_to(0.0, 0.0);
    }
}

/// Cancellation token tied to the page that was active when it was taken
///
/// It expires on the next committed navigation. Data loads scoped to it drop their
/// result instead of updating a page that is gone.
#[derive(Debug, Clone)]
pub struct PageLifetime {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl PageLifetime {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }

    /// Await `future`; `None` if the page was left in the meantime
    pub async fn scope<F: Future>(&self, future: F) -> Option<F::Output> {
        let output = future.await;
        if self.is_current() {
            Some(output)
        } else {
            tracing::debug!("Dropping result for an expired page");
            None
        }
    }
}

/// How a navigation affects history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Push,
    Replace,
}

/// The shell's current route and navigation history
pub struct Navigator<'t> {
    table: &'t RouteTable,
    guard: Box<dyn AuthGuard>,
    hooks: Vec<Box<dyn NavigationHook>>,
    current: RouteMatch,
    history: Vec<String>,
    generation: Arc<AtomicU64>,
}

impl<'t> Navigator<'t> {
    /// Start at the application root
    pub fn new(table: &'t RouteTable) -> Self {
        let current = table.resolve("/");
        Self {
            table,
            guard: Box::new(AllowAll),
            hooks: Vec::new(),
            history: vec![current.path.clone()],
            current,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Install a guard; the starting route is resolved again under it
    pub fn with_guard(mut self, guard: impl AuthGuard + 'static) -> Self {
        self.guard = Box::new(guard);
        self.current = self.resolve(&self.current.path);
        if let Some(last) = self.history.last_mut() {
            *last = self.current.path.clone();
        }
        self
    }

    pub fn with_hook(mut self, hook: impl NavigationHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn current(&self) -> &RouteMatch {
        &self.current
    }

    pub fn table(&self) -> &'t RouteTable {
        self.table
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Token for data loads started by the current page
    pub fn lifetime(&self) -> PageLifetime {
        PageLifetime {
            current: Arc::clone(&self.generation),
            generation: self.generation.load(Ordering::Acquire),
        }
    }

    /// User navigation: push a history entry
    pub fn navigate(&mut self, url: &str) -> &RouteMatch {
        self.go(url, Entry::Push)
    }

    /// Programmatic redirect: replace the current history entry
    pub fn replace(&mut self, url: &str) -> &RouteMatch {
        self.go(url, Entry::Replace)
    }

    /// Resolve a URL, following guard redirects
    pub fn resolve(&self, url: &str) -> RouteMatch {
        let mut target = self.table.resolve(url);

        for _ in 0..MAX_REDIRECTS {
            if target.layout() != Layout::Authenticated {
                return target;
            }
            match self.guard.check(&target) {
                GuardDecision::Allow => return target,
                GuardDecision::Redirect(to) => {
                    tracing::debug!(from = %target.path, to = %to, "Guard redirect");
                    target = self.table.resolve(&to);
                }
            }
        }

        tracing::warn!("Too many guard redirects for {}, showing not found", url);
        let fallback = self.table.fallback().clone();
        RouteMatch {
            path: target.path,
            descriptor: fallback,
            params: Default::default(),
        }
    }

    fn go(&mut self, url: &str, entry: Entry) -> &RouteMatch {
        let target = self.resolve(url);

        // Same URL: nothing to commit
        if target.path == self.current.path {
            return &self.current;
        }

        tracing::debug!(from = %self.current.path, to = %target.path, page = ?target.page(), "Navigating");

        match entry {
            Entry::Push => self.history.push(target.path.clone()),
            Entry::Replace => {
                if let Some(last) = self.history.last_mut() {
                    *last = target.path.clone();
                }
            }
        }

        let previous = std::mem::replace(&mut self.current, target);
        self.generation.fetch_add(1, Ordering::AcqRel);

        for hook in &self.hooks {
            hook.on_navigate(&previous, &self.current);
        }

        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Page;
    use crate::token::MemoryTokenStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn table() -> RouteTable {
        RouteTable::builder()
            .authenticated("/", Page::Home)
            .authenticated("/pacientes", Page::Pacientes)
            .authenticated("/roles", Page::Roles)
            .standalone("/signin", Page::SignIn)
            .build(Page::NotFound)
            .unwrap()
    }

    #[derive(Clone, Default)]
    struct FakeViewport {
        scrolls: Rc<RefCell<Vec<(f64, f64)>>>,
    }

    impl Viewport for FakeViewport {
        fn scroll_to(&self, x: f64, y: f64) {
            self.scrolls.borrow_mut().push((x, y));
        }
    }

    #[test]
    fn test_starts_at_root() {
        let table = table();
        let navigator = Navigator::new(&table);
        assert_eq!(navigator.current().page(), Page::Home);
        assert_eq!(navigator.history(), ["/".to_string()]);
    }

    #[test]
    fn test_navigate_pushes_and_replace_rewrites() {
        let table = table();
        let mut navigator = Navigator::new(&table);

        navigator.navigate("/pacientes");
        navigator.replace("/roles");
        assert_eq!(navigator.current().page(), Page::Roles);
        assert_eq!(navigator.history(), ["/".to_string(), "/roles".to_string()]);
    }

    #[test]
    fn test_scroll_reset_on_each_navigation() {
        let table = table();
        let viewport = FakeViewport::default();
        let mut navigator = Navigator::new(&table).with_hook(ScrollReset::new(viewport.clone()));

        navigator.navigate("/pacientes");
        navigator.navigate("/roles");
        navigator.navigate("/nowhere");
        assert_eq!(*viewport.scrolls.borrow(), vec![(0.0, 0.0); 3]);

        // Same URL is not a navigation
        navigator.navigate("/nowhere/");
        assert_eq!(viewport.scrolls.borrow().len(), 3);
    }

    #[test]
    fn test_not_found_is_a_sink_but_explicit_navigation_leaves_it() {
        let table = table();
        let mut navigator = Navigator::new(&table);

        assert!(navigator.navigate("/nonexistent-path").is_not_found());
        assert_eq!(navigator.navigate("/roles").page(), Page::Roles);
    }

    #[test]
    fn test_require_token_redirects_authenticated_routes() {
        let table = table();
        let tokens = Arc::new(MemoryTokenStore::new());
        let mut navigator = Navigator::new(&table).with_guard(RequireToken::new(tokens.clone()));

        assert_eq!(navigator.navigate("/pacientes").page(), Page::SignIn);
        // Standalone and catch-all routes are outside the guard
        assert!(navigator.navigate("/missing").is_not_found());

        tokens.write_token("abc123").unwrap();
        assert_eq!(navigator.navigate("/pacientes").page(), Page::Pacientes);
    }

    struct Loop;

    impl AuthGuard for Loop {
        fn check(&self, target: &RouteMatch) -> GuardDecision {
            let next = if target.path == "/roles" { "/pacientes" } else { "/roles" };
            GuardDecision::Redirect(next.to_string())
        }
    }

    #[test]
    fn test_redirect_loop_ends_at_not_found() {
        let table = table();
        let mut navigator = Navigator::new(&table).with_guard(Loop);
        assert!(navigator.navigate("/roles").is_not_found());
    }

    #[tokio::test]
    async fn test_page_lifetime_expires_on_navigation() {
        let table = table();
        let mut navigator = Navigator::new(&table);

        let lifetime = navigator.lifetime();
        assert!(lifetime.is_current());
        assert_eq!(lifetime.scope(async { 7 }).await, Some(7));

        navigator.navigate("/pacientes");
        assert!(!lifetime.is_current());
        assert_eq!(lifetime.scope(async { 7 }).await, None);
        assert!(navigator.lifetime().is_current());
    }
}
