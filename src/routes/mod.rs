//! Route Table
//!
//! Maps URLs to pages and the layout partition they render in.
//!
//! The table is an ordered list evaluated first-match: the authenticated subtree
//! (rendered inside the shared layout), then the standalone auth pages, then the
//! catch-all. The catch-all can only be supplied to [`RouteTableBuilder::build`], so
//! it is always the last entry.

mod page;
mod pattern;

pub use page::{app_routes, build_app_routes, Page};
pub use pattern::{normalize_path, PathPattern};

use std::collections::BTreeMap;
use thiserror::Error;

/// Key/value mapping handed to the matched page
pub type Params = BTreeMap<String, String>;

/// Which layout wraps a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Inside the shared navigation layout
    Authenticated,
    /// Rendered on its own (sign-in, sign-up)
    Standalone,
    /// The catch-all page, no layout
    Bare,
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    pub pattern: PathPattern,
    pub page: Page,
    pub layout: Layout,
    /// Values bound at declaration time
    pub props: Params,
}

impl RouteDescriptor {
    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_catch_all(&self) -> bool {
        self.pattern.is_catch_all()
    }
}

/// Result of resolving a URL
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// The normalized path that was resolved
    pub path: String,
    pub descriptor: RouteDescriptor,
    /// Declared props merged with path captures (captures win)
    pub params: Params,
}

impl RouteMatch {
    pub fn page(&self) -> Page {
        self.descriptor.page
    }

    pub fn layout(&self) -> Layout {
        self.descriptor.layout
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn is_not_found(&self) -> bool {
        self.descriptor.is_catch_all()
    }
}

/// Route table construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route path must start with '/': {0}")]
    NotAbsolute(String),

    #[error("Wildcards are reserved for the catch-all route: {0}")]
    Wildcard(String),

    #[error("Route parameter without a name: {0}")]
    EmptyParam(String),

    #[error("Route declared twice: {0}")]
    Duplicate(String),
}

/// Builder for the immutable [`RouteTable`]
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    authenticated: Vec<(String, Page, Params)>,
    standalone: Vec<(String, Page)>,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a page inside the shared layout
    pub fn authenticated(self, path: &str, page: Page) -> Self {
        self.authenticated_with(path, page, &[])
    }

    /// Declare a page inside the shared layout with static props
    pub fn authenticated_with(mut self, path: &str, page: Page, props: &[(&str, &str)]) -> Self {
        let props = props
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.authenticated.push((path.to_string(), page, props));
        self
    }

    /// Declare a page rendered without the shared layout
    pub fn standalone(mut self, path: &str, page: Page) -> Self {
        self.standalone.push((path.to_string(), page));
        self
    }

    /// Compile patterns and append the catch-all
    pub fn build(self, fallback: Page) -> Result<RouteTable, RouteError> {
        let mut routes = Vec::with_capacity(self.authenticated.len() + self.standalone.len() + 1);

        let declared = self
            .authenticated
            .into_iter()
            .map(|(path, page, props)| (path, page, props, Layout::Authenticated))
            .chain(
                self.standalone
                    .into_iter()
                    .map(|(path, page)| (path, page, Params::new(), Layout::Standalone)),
            );

        for (path, page, props, layout) in declared {
            let pattern = PathPattern::parse(&path)?;
            if routes
                .iter()
                .any(|existing: &RouteDescriptor| existing.pattern == pattern)
            {
                return Err(RouteError::Duplicate(pattern.to_string()));
            }
            routes.push(RouteDescriptor {
                pattern,
                page,
                layout,
                props,
            });
        }

        routes.push(RouteDescriptor {
            pattern: PathPattern::catch_all(),
            page: fallback,
            layout: Layout::Bare,
            props: Params::new(),
        });

        Ok(RouteTable { routes })
    }
}

/// The immutable, ordered route table
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// Resolve a URL. Unmatched paths resolve to the catch-all.
    pub fn resolve(&self, url: &str) -> RouteMatch {
        let path = normalize_path(url);

        for descriptor in &self.routes {
            if let Some(captures) = descriptor.pattern.matches(&path) {
                let mut params = descriptor.props.clone();
                params.extend(captures);
                return RouteMatch {
                    path,
                    descriptor: descriptor.clone(),
                    params,
                };
            }
        }

        // The catch-all is always present and matches everything
        RouteMatch {
            path,
            descriptor: self.fallback().clone(),
            params: Params::new(),
        }
    }

    /// All entries in evaluation order, catch-all last
    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn fallback(&self) -> &RouteDescriptor {
        &self.routes[self.routes.len() - 1]
    }

    pub fn authenticated(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.by_layout(Layout::Authenticated)
    }

    pub fn standalone(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.by_layout(Layout::Standalone)
    }

    /// Descriptor serving a page, if declared
    pub fn find(&self, page: Page) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|d| d.page == page)
    }

    fn by_layout(&self, layout: Layout) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().filter(move |d| d.layout == layout)
    }
}
