pub mod future_wealth;
pub mod retirement;
pub mod sip_swp;
