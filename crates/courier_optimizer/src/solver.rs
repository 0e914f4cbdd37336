pub mod dispatch;
pub mod nearest_neighbor;
pub mod route_summary;
