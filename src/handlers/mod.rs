// Handlers are split by security tier: public routes need no credentials,
// protected routes sit behind the bearer-token filter.
pub mod protected;
pub mod public;
