// Two handler tiers: public (no credential) and protected (auth guard
// required, ownership enforced per record).
pub mod protected;
pub mod public;
