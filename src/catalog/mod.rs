pub(crate) mod model;
pub(crate) mod provider;
pub(crate) mod store;
