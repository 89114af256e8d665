// Two tiers: public (no session) and protected (session checked in-handler)
pub mod protected;
pub mod public;
