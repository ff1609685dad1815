//! Hash router.
//!
//! The location fragment selects what the page shows. A fragment whose name
//! is a registered route dispatches to that route's handler; any other
//! fragment names a board. The empty fragment shows every board.

mod fragment;
mod table;

pub use fragment::{heading_for, Fragment};
pub use table::{RouteTable, RouteTableBuilder};

/// Board name that lists posts from every board.
pub const ALL_BOARDS: &str = "all";

/// Heading shown for the empty fragment.
pub const ALL_HEADING: &str = "All";

/// Result of resolving a fragment.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<'a, H> {
    /// A registered route.
    Route {
        handler: &'a H,
        name: String,
        /// The id after `=`, or empty.
        id: String,
        heading: String,
    },
    /// A board listing.
    Board { board: String, heading: String },
}

impl<H> Resolution<'_, H> {
    /// Heading to display for this resolution.
    pub fn heading(&self) -> &str {
        match self {
            Resolution::Route { heading, .. } | Resolution::Board { heading, .. } => heading,
        }
    }
}

/// Router over an immutable route table.
#[derive(Debug, Clone)]
pub struct HashRouter<H> {
    table: RouteTable<H>,
}

impl<H> HashRouter<H> {
    /// Create a router over `table`.
    pub fn new(table: RouteTable<H>) -> Self {
        Self { table }
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable<H> {
        &self.table
    }

    /// Whether a board called `board` would be hidden by a route.
    pub fn shadows(&self, board: &str) -> bool {
        self.table.contains(board)
    }

    /// Resolve a fragment (with or without `#`).
    pub fn resolve(&self, fragment: &str) -> Resolution<'_, H> {
        let fragment = Fragment::parse(fragment);
        if let Some(handler) = self.table.get(fragment.name()) {
            return Resolution::Route {
                handler,
                name: fragment.name().to_string(),
                id: fragment.id().unwrap_or_default().to_string(),
                heading: fragment.heading(),
            };
        }
        if fragment.is_empty() {
            return Resolution::Board {
                board: ALL_BOARDS.to_string(),
                heading: ALL_HEADING.to_string(),
            };
        }
        Resolution::Board {
            board: fragment.name().to_string(),
            heading: fragment.heading(),
        }
    }
}
