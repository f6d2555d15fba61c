pub(crate) mod attrs;
pub(crate) mod state;
