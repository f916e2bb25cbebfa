// Protected handlers: everything here sits behind the bearer-token filter,
// applied as a layer on the /api/items routes in main.rs.
pub mod items;
