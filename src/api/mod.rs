//! Default route groups served by the binary.
//!
//! Both groups are thin document-collection resources; the mount table
//! accepts any other pair of routers in their place.

pub mod documents;
pub mod licenses;
pub mod users;

use crate::routing::RouteGroups;

pub fn route_groups() -> RouteGroups {
    RouteGroups::new(users::router(), licenses::router())
}
