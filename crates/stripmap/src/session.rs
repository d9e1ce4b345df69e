//! Accepted route state and trip visibility selection.
//!
//! A [`Session`] plays the part of the interactive shell around the layout
//! core: it only replaces its route when new input validates, and resets the
//! visible selection whenever it does.

use log::{debug, info};

use stripmap_core::route::RouteData;

use crate::{DiagramBuilder, error::StripmapError, input, output::DiagramOutput};

/// The currently accepted route and the trips selected for display.
#[derive(Debug, Clone, Default)]
pub struct Session {
    route: RouteData,
    visible: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from an already validated route, showing every trip.
    pub fn with_route(route: RouteData) -> Self {
        let visible = all_trip_ids(&route);
        Self { route, visible }
    }

    pub fn route(&self) -> &RouteData {
        &self.route
    }

    /// Validates `src` and, on success, replaces the route wholesale and makes
    /// every trip visible.
    ///
    /// # Errors
    ///
    /// Returns the input error; the previous route and selection are kept.
    pub fn accept(&mut self, src: &str) -> Result<(), StripmapError> {
        let route = input::parse_route(src)?;
        info!(trips = route.trips().len(), stops = route.stops().len(); "Route accepted");
        self.visible = all_trip_ids(&route);
        self.route = route;
        Ok(())
    }

    /// Hides a visible trip or shows a hidden one.
    ///
    /// Ids that name no trip of the current route are ignored. Returns
    /// whether the trip is visible afterwards.
    pub fn toggle_trip(&mut self, id: &str) -> bool {
        if let Some(index) = self.visible.iter().position(|visible| visible == id) {
            self.visible.remove(index);
            debug!(trip = id; "Trip hidden");
            return false;
        }
        if self.route.trip(id).is_none() {
            debug!(trip = id; "Ignoring toggle of unknown trip");
            return false;
        }
        self.visible.push(id.to_string());
        self.sort_visible();
        debug!(trip = id; "Trip shown");
        true
    }

    /// Replaces the selection; unknown ids are dropped.
    pub fn set_visible<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: Vec<S> = ids.into_iter().collect();
        self.visible = self
            .route
            .trips()
            .iter()
            .map(|trip| trip.id())
            .filter(|id| requested.iter().any(|r| r.as_ref() == *id))
            .map(str::to_string)
            .collect();
    }

    /// Visible trip ids in route order.
    pub fn visible_trip_ids(&self) -> &[String] {
        &self.visible
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.iter().any(|visible| visible == id)
    }

    /// Lays out the current route and keeps the visible trips' paths.
    pub fn render(&self, builder: &DiagramBuilder) -> DiagramOutput {
        let mut output = builder.build(&self.route);
        output.retain_trips(|id| self.is_visible(id));
        output
    }

    fn sort_visible(&mut self) {
        let trips = self.route.trips();
        self.visible.sort_by_key(|id| {
            trips
                .iter()
                .position(|trip| trip.id() == id)
                .unwrap_or(usize::MAX)
        });
    }
}

fn all_trip_ids(route: &RouteData) -> Vec<String> {
    route.trips().iter().map(|trip| trip.id().to_string()).collect()
}
