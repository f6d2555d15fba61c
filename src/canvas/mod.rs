pub(crate) mod composite;
pub(crate) mod headless;
pub(crate) mod surface;
