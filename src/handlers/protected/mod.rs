// handlers/protected - session required
//
// Every handler here checks the session itself, independently of the edge
// gate in front of the router.
pub mod dashboard;
pub mod per_minute;
pub mod players;
